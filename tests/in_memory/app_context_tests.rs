//! Screens wired through [`AppContext`] share one store.

use crate::in_memory::helpers::{STEP_TIMEOUT, sprint_id};
use rstest::{fixture, rstest};
use sprint_planner::{
    app::AppContext,
    config::PlannerConfig,
    planning::domain::{Sprint, TaskDraft},
    store::adapters::memory::InMemoryDocumentStore,
};

#[fixture]
fn config() -> PlannerConfig {
    PlannerConfig::parse(
        r#"
        [store]
        project_id = "planner"
        application_id = "app"
        api_key = "key"

        [planning]
        assignees = ["Ada", "Grace"]
        "#,
    )
    .expect("valid config")
}

#[rstest]
fn context_scopes_store_and_roster(config: PlannerConfig) {
    let context = AppContext::in_memory(&config);
    assert_eq!(context.store().project_id(), Some("planner"));
    assert_eq!(context.roster(), ["Unassigned", "Ada", "Grace"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_created_on_home_screen_shows_on_detail_screen(
    config: PlannerConfig,
) -> eyre::Result<()> {
    let context: AppContext<InMemoryDocumentStore> = AppContext::in_memory(&config);
    let home = context.home_screen();
    let mut home_states = home.subscribe();
    home.create_sprint(Sprint::new(sprint_id("101")?).with_notes("kickoff"))?;
    tokio::time::timeout(STEP_TIMEOUT, home_states.wait_for(|state| !state.sprints.is_empty()))
        .await??;

    let detail = context.sprint_screen(sprint_id("101")?);
    let mut detail_states = detail.subscribe();
    detail.create_task(TaskDraft::new("Untitled"))?;

    let state = tokio::time::timeout(
        STEP_TIMEOUT,
        detail_states.wait_for(|state| state.sprint.is_some() && state.tasks.len() == 1),
    )
    .await??
    .clone();

    assert_eq!(
        state.sprint.as_ref().and_then(Sprint::notes),
        Some("kickoff")
    );
    assert_eq!(detail.assignee_options().len(), 4);
    assert_eq!(context.store().document_count()?, 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_a_screen_stops_its_updates(config: PlannerConfig) -> eyre::Result<()> {
    let context = AppContext::in_memory(&config);
    let home = context.home_screen();
    let mut states = home.subscribe();
    tokio::time::timeout(STEP_TIMEOUT, states.wait_for(|state| !state.status.is_loading))
        .await??;

    drop(home);
    let writer = context.home_screen();
    writer.create_sprint(Sprint::new(sprint_id("102")?))?;
    writer.settle().await;

    // The state channel closes once the aborted subscription releases it.
    tokio::time::timeout(STEP_TIMEOUT, async {
        while states.changed().await.is_ok() {}
    })
    .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opened_screens_list_existing_records(config: PlannerConfig) -> eyre::Result<()> {
    let context = AppContext::in_memory(&config);
    let sprint_writer = context.home_screen();
    sprint_writer.create_sprint(Sprint::new(sprint_id("101")?))?;
    sprint_writer.settle().await;
    let task_writer = context.sprint_screen(sprint_id("101")?);
    task_writer.create_task(TaskDraft::new("Untitled"))?;
    task_writer.settle().await;

    let home = context.home_screen();
    let mut home_states = home.subscribe();
    let listed = tokio::time::timeout(
        STEP_TIMEOUT,
        home_states.wait_for(|state| !state.sprints.is_empty()),
    )
    .await??
    .clone();
    assert_eq!(listed.sprints.len(), 1);

    let detail = context.sprint_screen(sprint_id("101")?);
    let mut detail_states = detail.subscribe();
    tokio::time::timeout(
        STEP_TIMEOUT,
        detail_states.wait_for(|state| state.sprint.is_some() && state.tasks.len() == 1),
    )
    .await??;
    Ok(())
}
