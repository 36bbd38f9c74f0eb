//! Given steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, wait_until};
use rstest_bdd_macros::given;
use sprint_planner::planning::domain::SprintId;

#[given("an empty planner")]
fn empty_planner(world: &mut PlanningWorld) -> Result<(), eyre::Report> {
    let stored = world.context.store().document_count()?;
    if stored != 0 {
        return Err(eyre::eyre!("expected an empty store, found {stored} documents"));
    }
    Ok(())
}

#[given("the home screen is listing sprints")]
fn home_screen_listing(world: &mut PlanningWorld) -> Result<(), eyre::Report> {
    let home = world.context.home_screen();
    let states = home.subscribe();
    wait_until(states, |state| !state.status.is_loading)?;
    world.home = Some(home);
    Ok(())
}

#[given(r#"the detail screen of sprint "{sprint}" is open"#)]
fn detail_screen_open(world: &mut PlanningWorld, sprint: String) -> Result<(), eyre::Report> {
    let detail = world.context.sprint_screen(SprintId::new(sprint)?);
    let states = detail.subscribe();
    wait_until(states, |state| !state.status.is_loading)?;
    world.detail = Some(detail);
    Ok(())
}
