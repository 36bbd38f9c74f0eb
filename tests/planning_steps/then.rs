//! Then steps for sprint planning BDD scenarios.

use super::world::{PlanningWorld, run_async, wait_until};
use rstest_bdd_macros::then;
use sprint_planner::planning::{
    domain::{Platform, PlatformFilter, RemoteResult, SprintId, TaskId},
    services::ErrorNotifier,
};

#[then(r#"sprint "{sprint}" exists on the home screen"#)]
fn sprint_exists(world: &PlanningWorld, sprint: String) -> Result<(), eyre::Report> {
    let id = SprintId::new(sprint)?;
    let home = world.home()?;
    wait_until(home.subscribe(), |state| {
        state.sprints.iter().any(|listed| listed.id() == &id)
    })?;
    if !home.exists(&id) {
        return Err(eyre::eyre!("expected sprint {id} to exist"));
    }
    Ok(())
}

#[then(r#"the "{platform}" filter shows task "{code}""#)]
fn filter_shows_task(world: &PlanningWorld, platform: String, code: String) -> Result<(), eyre::Report> {
    let detail = world.detail()?;
    let expected = TaskId::new(code)?;
    wait_until(detail.subscribe(), |state| !state.tasks.is_empty())?;
    detail.set_platform_filter(PlatformFilter::Only(Platform::from_label(&platform)));

    let state = detail.state();
    let visible: Vec<&TaskId> = state.board.visible().iter().map(|task| task.id()).collect();
    if visible != [&expected] {
        return Err(eyre::eyre!("expected only {expected} under {platform}, found {visible:?}"));
    }
    Ok(())
}

#[then(r#"the "{platform}" filter shows no tasks"#)]
fn filter_shows_nothing(world: &PlanningWorld, platform: String) -> Result<(), eyre::Report> {
    let detail = world.detail()?;
    detail.set_platform_filter(PlatformFilter::Only(Platform::from_label(&platform)));
    let visible = detail.state().board.visible().len();
    if visible != 0 {
        return Err(eyre::eyre!("expected no tasks under {platform}, found {visible}"));
    }
    Ok(())
}

#[then("the visible story point total is {total:u64}")]
fn visible_story_total(world: &PlanningWorld, total: u64) -> Result<(), eyre::Report> {
    let found = world.detail()?.state().board.visible_totals().story;
    if found != total {
        return Err(eyre::eyre!("expected visible story total {total}, found {found}"));
    }
    Ok(())
}

#[then("the repository reports success")]
fn repository_reports_success(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let expected = vec![RemoteResult::Loading, RemoteResult::success(())];
    if world.last_write != expected {
        return Err(eyre::eyre!("unexpected envelopes: {:?}", world.last_write));
    }
    Ok(())
}

#[then("the home screen shows exactly one error")]
fn home_shows_one_error(world: &PlanningWorld) -> Result<(), eyre::Report> {
    let home = world.home()?;
    let state = wait_until(home.subscribe(), |state| state.status.error_message.is_some())?;

    let mut notifier = ErrorNotifier::new();
    if notifier.take(&state.status).is_none() {
        return Err(eyre::eyre!("expected an error notification"));
    }
    // Give a misbehaving stream the chance to deliver a second error.
    run_async(tokio::time::sleep(std::time::Duration::from_millis(50)));
    if notifier.take(&home.state().status).is_some() {
        return Err(eyre::eyre!("error surfaced more than once"));
    }
    Ok(())
}
