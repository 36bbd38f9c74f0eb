//! When steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, run_async};
use futures::StreamExt;
use rstest_bdd_macros::when;
use sprint_planner::planning::{
    domain::{Platform, Points, Sprint, SprintId, TaskCode, TaskDraft},
    ports::SprintRepository,
};

#[when(r#"sprint "{sprint}" is created from the home screen"#)]
fn create_sprint_from_home(world: &mut PlanningWorld, sprint: String) -> Result<(), eyre::Report> {
    world.home()?.create_sprint(Sprint::new(SprintId::new(sprint)?))?;
    Ok(())
}

#[when(r#"task "{code}" is created for platform "{platform}" with {story:u32} story points"#)]
fn create_task_on_detail(
    world: &mut PlanningWorld,
    code: String,
    platform: String,
    story: u32,
) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new(format!("Scenario task {code}"))
        .with_task_code(TaskCode::new(code)?)
        .with_platform(Platform::from_label(&platform))
        .with_points(Points::new(story), Points::ZERO, Points::ZERO);
    world.detail()?.create_task(draft)?;
    Ok(())
}

#[when(r#"sprint "{sprint}" is deleted through the repository"#)]
fn delete_sprint_directly(world: &mut PlanningWorld, sprint: String) -> Result<(), eyre::Report> {
    let envelopes = world
        .context
        .sprint_repository()
        .delete_sprint(SprintId::new(sprint)?);
    world.last_write = run_async(envelopes.collect());
    Ok(())
}

#[when("the store drops every subscription")]
fn store_drops_subscriptions(world: &mut PlanningWorld) {
    world.context.store().break_subscriptions("connection reset");
}
