//! Envelope sequences emitted by the document-backed repositories.

use crate::in_memory::helpers::{
    collect_all, next_envelope, sprint_id, sprints, store, task_id, tasks,
};
use rstest::rstest;
use sprint_planner::{
    planning::{
        domain::{
            AssigneeFilter, Platform, PlatformFilter, Points, RemoteResult, Sprint, TaskCode,
            TaskDraft, TaskPatch, project,
        },
        ports::{SprintRepository, TaskRepository},
    },
    store::adapters::memory::InMemoryDocumentStore,
};
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_sprint_appears_in_next_snapshot(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let repository = sprints(&store);
    let mut listing = repository.list_sprints();
    assert_eq!(next_envelope(&mut listing).await?, RemoteResult::Loading);
    assert_eq!(next_envelope(&mut listing).await?, RemoteResult::success(Vec::new()));

    let created = collect_all(repository.create_sprint(Sprint::new(sprint_id("101")?))).await?;
    assert_eq!(created, vec![RemoteResult::Loading, RemoteResult::success(())]);

    let snapshot = next_envelope(&mut listing).await?;
    let ids: Vec<String> = snapshot
        .data()
        .map(|list| list.iter().map(|sprint| sprint.id().to_string()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["101"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprints_are_listed_in_identifier_order(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let repository = sprints(&store);
    for raw in ["103", "101", "102"] {
        collect_all(repository.create_sprint(Sprint::new(sprint_id(raw)?))).await?;
    }

    let mut listing = repository.list_sprints();
    next_envelope(&mut listing).await?;
    let snapshot = next_envelope(&mut listing).await?;
    let ids: Vec<String> = snapshot
        .data()
        .map(|list| list.iter().map(|sprint| sprint.id().to_string()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["101", "102", "103"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_sprint_succeeds(store: Arc<InMemoryDocumentStore>) -> eyre::Result<()> {
    let envelopes = collect_all(sprints(&store).delete_sprint(sprint_id("404")?)).await?;
    assert_eq!(envelopes, vec![RemoteResult::Loading, RemoteResult::success(())]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_sprint_keeps_its_tasks(store: Arc<InMemoryDocumentStore>) -> eyre::Result<()> {
    let id = sprint_id("101")?;
    collect_all(sprints(&store).create_sprint(Sprint::new(id.clone()))).await?;
    collect_all(tasks(&store).create_task(id.clone(), TaskDraft::new("Orphan"))).await?;

    collect_all(sprints(&store).delete_sprint(id.clone())).await?;

    let mut listing = tasks(&store).list_tasks(id);
    next_envelope(&mut listing).await?;
    let remaining = next_envelope(&mut listing).await?;
    assert_eq!(remaining.data().map(Vec::len), Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_android_task_passes_only_android_filter(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let id = sprint_id("101")?;
    let draft = TaskDraft::new("Login screen")
        .with_task_code(TaskCode::new("MAPP-1")?)
        .with_platform(Platform::Android)
        .with_points(Points::new(3), Points::ZERO, Points::ZERO);

    let created = collect_all(tasks(&store).create_task(id.clone(), draft)).await?;
    assert_eq!(created.last(), Some(&RemoteResult::success(task_id("MAPP-1")?)));

    let mut listing = tasks(&store).list_tasks(id);
    next_envelope(&mut listing).await?;
    let snapshot = next_envelope(&mut listing).await?;
    let listed = snapshot.data().cloned().unwrap_or_default();

    let android = project(&listed, PlatformFilter::Only(Platform::Android), &AssigneeFilter::All);
    let ios = project(&listed, PlatformFilter::Only(Platform::Ios), &AssigneeFilter::All);
    assert_eq!(android.len(), 1);
    assert!(ios.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_task_reports_error(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let envelopes = collect_all(tasks(&store).update_task(
        sprint_id("101")?,
        task_id("MAPP-404")?,
        TaskPatch::new().with_notes("blocked"),
    ))
    .await?;

    assert_eq!(envelopes.len(), 2);
    assert!(envelopes.last().is_some_and(RemoteResult::is_error));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn broken_subscription_emits_one_error_then_ends(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let mut listing = sprints(&store).list_sprints();
    next_envelope(&mut listing).await?;
    next_envelope(&mut listing).await?;

    store.break_subscriptions("listener detached");

    let failure = next_envelope(&mut listing).await?;
    assert_eq!(
        failure.error_message(),
        Some("subscription failed: listener detached")
    );
    let rest = collect_all(listing).await?;
    assert!(rest.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_properties_follow_merge_writes(
    store: Arc<InMemoryDocumentStore>,
) -> eyre::Result<()> {
    let id = sprint_id("101")?;
    let repository = sprints(&store);
    collect_all(repository.create_sprint(Sprint::new(id.clone()).with_holiday_count(1.0))).await?;

    let mut properties = repository.get_sprint_properties(id.clone());
    next_envelope(&mut properties).await?;
    next_envelope(&mut properties).await?;

    collect_all(
        repository.update_sprint_properties(id.clone(), Sprint::new(id).with_notes("retro moved")),
    )
    .await?;
    let updated = next_envelope(&mut properties).await?;
    let sprint = updated
        .data()
        .cloned()
        .ok_or_else(|| eyre::eyre!("expected sprint snapshot"))?;
    assert_eq!(sprint.notes(), Some("retro moved"));
    assert_eq!(sprint.holiday_count(), Some(1.0));
    Ok(())
}
