//! `PostgreSQL` integration tests for task storage and collaboration.

use crate::postgres::harness::{BoxError, PreparedStack, prepared_stack};
use chrono::{TimeZone, Utc};
use corkboard::identity::domain::{Session, UserId};
use corkboard::outcome::ServiceError;
use corkboard::task::{
    domain::{
        DueDate, NewTaskData, TagSet, Task, TaskChangeSet, TaskDescription, TaskId, TaskPriority,
        TaskStatus, TaskTitle, TaskView,
    },
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use mockable::DefaultClock;
use rstest::rstest;

fn titles(views: &[TaskView]) -> Vec<&str> {
    views.iter().map(|view| view.title.as_str()).collect()
}

fn assignee_email(view: &TaskView) -> Option<&str> {
    view.assigned_to.as_ref().map(|summary| summary.email.as_str())
}

fn signed_in_user(session: &Session) -> Result<UserId, BoxError> {
    session.user_id().ok_or_else(|| {
        Box::new(std::io::Error::other(
            "session should carry a signed-in user",
        )) as BoxError
    })
}

fn missing_task_error() -> BoxError {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "expected task to exist",
    ))
}

fn draft_task(created_by: UserId, assigned_to: UserId) -> Result<Task, BoxError> {
    let data = NewTaskData {
        title: TaskTitle::new("Directly stored task")?,
        description: TaskDescription::empty(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: TagSet::empty(),
        created_by,
        assigned_to,
    };
    Ok(Task::new(data, &DefaultClock))
}

#[rstest]
#[tokio::test]
async fn task_round_trips_through_storage_with_participants(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP301", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let bob = ctx
        .stack
        .register_employee("EMP302", "Bob", "Okafor", "bob@example.com")
        .await?;

    let request = CreateTaskRequest::new("Ship the beta")
        .with_description("Cut a release candidate and announce it")
        .with_status("in progress")
        .with_priority("urgent")
        .with_due_date("2031-06-15")
        .with_tags(vec!["Release".to_owned(), " beta ".to_owned()])
        .with_assignee("bob@example.com");
    let view = ctx.stack.collaboration.create_task(&alice, request).await?;

    assert_eq!(view.created_by.name, "Alice Nguyen");
    assert_eq!(assignee_email(&view), Some("bob@example.com"));

    let stored = ctx
        .stack
        .tasks
        .find_by_id(view.id)
        .await?
        .ok_or_else(missing_task_error)?;
    assert_eq!(stored.title().as_str(), "Ship the beta");
    assert_eq!(
        stored.description().as_str(),
        "Cut a release candidate and announce it"
    );
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert_eq!(stored.priority(), TaskPriority::Urgent);
    assert_eq!(stored.tags().as_slice(), ["release", "beta"]);
    assert_eq!(
        stored.due_date().map(DueDate::value),
        Utc.with_ymd_and_hms(2031, 6, 15, 0, 0, 0).single()
    );
    assert_eq!(Some(stored.created_by()), alice.user_id());
    assert_eq!(stored.assigned_to(), bob.user_id());
    assert!(!stored.is_archived());
    // TIMESTAMPTZ keeps microsecond precision.
    assert_eq!(
        stored.created_at().timestamp_micros(),
        view.created_at.timestamp_micros()
    );

    let alice_list = ctx.stack.collaboration.list_tasks(&alice).await?;
    let bob_list = ctx.stack.collaboration.list_tasks(&bob).await?;
    assert_eq!(titles(&alice_list), ["Ship the beta"]);
    assert_eq!(titles(&bob_list), ["Ship the beta"]);

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn sparse_update_changes_only_named_columns(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP303", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let bob = ctx
        .stack
        .register_employee("EMP304", "Bob", "Okafor", "bob@example.com")
        .await?;

    let request = CreateTaskRequest::new("Harden the import pipeline")
        .with_description("Retry transient failures")
        .with_priority("high")
        .with_due_date("2031-02-01")
        .with_tags(vec!["imports".to_owned()])
        .with_assignee("bob@example.com");
    let created = ctx.stack.collaboration.create_task(&alice, request).await?;

    let updated = ctx
        .stack
        .collaboration
        .update_task(
            &alice,
            UpdateTaskRequest::new(created.id).with_status("in progress"),
        )
        .await?;
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert!(updated.updated_at > created.created_at);

    let stored = ctx
        .stack
        .tasks
        .find_by_id(created.id)
        .await?
        .ok_or_else(missing_task_error)?;
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert_eq!(stored.description().as_str(), "Retry transient failures");
    assert_eq!(stored.priority(), TaskPriority::High);
    assert_eq!(stored.tags().as_slice(), ["imports"]);
    assert_eq!(
        stored.due_date().map(DueDate::value),
        Utc.with_ymd_and_hms(2031, 2, 1, 0, 0, 0).single()
    );
    assert_eq!(stored.assigned_to(), bob.user_id());

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn clearing_nullable_columns_persists(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP305", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let bob = ctx
        .stack
        .register_employee("EMP306", "Bob", "Okafor", "bob@example.com")
        .await?;

    let request = CreateTaskRequest::new("Plan the offsite")
        .with_due_date("2031-09-01")
        .with_assignee("bob@example.com");
    let created = ctx.stack.collaboration.create_task(&alice, request).await?;

    let cleared = ctx
        .stack
        .collaboration
        .update_task(
            &alice,
            UpdateTaskRequest::new(created.id)
                .clear_due_date()
                .clear_assignee(),
        )
        .await?;
    assert!(cleared.due_date.is_none());
    assert!(cleared.assigned_to.is_none());

    let stored = ctx
        .stack
        .tasks
        .find_by_id(created.id)
        .await?
        .ok_or_else(missing_task_error)?;
    assert!(stored.due_date().is_none());
    assert!(stored.assigned_to().is_none());

    let bob_list = ctx.stack.collaboration.list_tasks(&bob).await?;
    assert!(bob_list.is_empty());
    let alice_list = ctx.stack.collaboration.list_tasks(&alice).await?;
    assert_eq!(titles(&alice_list), ["Plan the offsite"]);

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn listing_merges_roles_and_orders_newest_first(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP307", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let bob = ctx
        .stack
        .register_employee("EMP308", "Bob", "Okafor", "bob@example.com")
        .await?;

    ctx.stack
        .collaboration
        .create_task(
            &alice,
            CreateTaskRequest::new("Draft the plan").with_assignee("bob@example.com"),
        )
        .await?;
    ctx.stack
        .collaboration
        .create_task(&bob, CreateTaskRequest::new("Review the plan"))
        .await?;
    ctx.stack
        .collaboration
        .create_task(&alice, CreateTaskRequest::new("Publish the plan"))
        .await?;

    let alice_list = ctx.stack.collaboration.list_tasks(&alice).await?;
    assert_eq!(titles(&alice_list), ["Publish the plan", "Draft the plan"]);

    let bob_list = ctx.stack.collaboration.list_tasks(&bob).await?;
    assert_eq!(titles(&bob_list), ["Review the plan", "Draft the plan"]);
    let draft = bob_list.last().ok_or_else(missing_task_error)?;
    assert_eq!(draft.created_by.name, "Alice Nguyen");
    assert_eq!(assignee_email(draft), Some("bob@example.com"));

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn participant_foreign_keys_reject_unknown_users(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP309", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let alice_id = signed_in_user(&alice)?;

    let ghost_creator = UserId::new();
    let creator_err = ctx
        .stack
        .tasks
        .insert(&draft_task(ghost_creator, alice_id)?)
        .await
        .expect_err("the creator foreign key should reject the insert");
    assert!(
        matches!(
            creator_err,
            TaskRepositoryError::MissingParticipant(user) if user == ghost_creator
        ),
        "unexpected error: {creator_err:?}"
    );

    let ghost_assignee = UserId::new();
    let assignee_err = ctx
        .stack
        .tasks
        .insert(&draft_task(alice_id, ghost_assignee)?)
        .await
        .expect_err("the assignee foreign key should reject the insert");
    assert!(
        matches!(
            assignee_err,
            TaskRepositoryError::MissingParticipant(user) if user == ghost_assignee
        ),
        "unexpected error: {assignee_err:?}"
    );

    let created = ctx
        .stack
        .collaboration
        .create_task(&alice, CreateTaskRequest::new("Groom the backlog"))
        .await?;
    let ghost_reassignment = UserId::new();
    let changes = TaskChangeSet::new(&DefaultClock).set_assignee(ghost_reassignment);
    let reassign_err = ctx
        .stack
        .tasks
        .update(created.id, &changes)
        .await
        .expect_err("the assignee foreign key should reject the update");
    assert!(
        matches!(
            reassign_err,
            TaskRepositoryError::MissingParticipant(user) if user == ghost_reassignment
        ),
        "unexpected error: {reassign_err:?}"
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn operations_on_missing_tasks_report_not_found(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let alice = ctx
        .stack
        .register_employee("EMP310", "Alice", "Nguyen", "alice@example.com")
        .await?;
    let missing = TaskId::new();

    let update = ctx
        .stack
        .collaboration
        .update_task(&alice, UpdateTaskRequest::new(missing).with_status("done"))
        .await;
    assert_eq!(update, Err(ServiceError::not_found("Task not found")));

    let delete = ctx.stack.collaboration.delete_task(&alice, missing).await;
    assert_eq!(delete, Err(ServiceError::not_found("Task not found")));

    let changes = TaskChangeSet::new(&DefaultClock).with_status(TaskStatus::Done);
    let update_err = ctx
        .stack
        .tasks
        .update(missing, &changes)
        .await
        .expect_err("updating a missing row should fail");
    assert!(
        matches!(update_err, TaskRepositoryError::NotFound(id) if id == missing),
        "unexpected error: {update_err:?}"
    );

    let delete_err = ctx
        .stack
        .tasks
        .delete(missing)
        .await
        .expect_err("deleting a missing row should fail");
    assert!(
        matches!(delete_err, TaskRepositoryError::NotFound(id) if id == missing),
        "unexpected error: {delete_err:?}"
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn seeded_demo_data_survives_reprovisioning(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let report = ctx.stack.seeder.provision().await?;
    assert_eq!(report.users_created, 3);
    assert_eq!(report.tasks_created, 5);

    let repeat = ctx.stack.seeder.provision().await?;
    assert_eq!(repeat.users_created, 0);
    assert_eq!(repeat.tasks_created, 0);

    let mike = ctx
        .stack
        .sign_in("mike.johnson@example.com", "password123")
        .await?;
    let views = ctx.stack.collaboration.list_tasks(&mike).await?;
    assert_eq!(titles(&views), ["Implement User Authentication"]);

    ctx.db.cleanup().await
}
