//! In-memory integration tests for demo data provisioning.
//!
//! The seeder's own unit tests cover counts and idempotence; these tests
//! exercise the provisioned data through the sign-in and collaboration
//! services.

use corkboard::outcome::ServiceError;
use corkboard::task::domain::{TaskStatus, TaskView};
use corkboard::task::services::UpdateTaskRequest;
use rstest::rstest;

use super::helpers::{AppStack, stack};

fn find_by_title<'a>(views: &'a [TaskView], title: &str) -> Option<&'a TaskView> {
    views.iter().find(|view| view.title.as_str() == title)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_credentials_sign_in_and_see_their_tasks(stack: AppStack) {
    let report = stack
        .seeder
        .provision()
        .await
        .expect("provisioning should succeed");
    assert!(
        report
            .credentials
            .iter()
            .all(|credential| credential.password == "password123")
    );

    let john = report
        .credentials
        .iter()
        .find(|credential| credential.email == "john.doe@example.com")
        .expect("john's credentials should be reported");
    let session = stack
        .sign_in(&john.email, &john.password)
        .await
        .expect("seeded credentials should sign in");

    let views = stack
        .collaboration
        .list_tasks(&session)
        .await
        .expect("listing should succeed");
    let listed: Vec<&str> = views.iter().map(|view| view.title.as_str()).collect();
    assert_eq!(
        listed,
        [
            "API Documentation",
            "Create Task Management UI",
            "Implement User Authentication",
            "Design Homepage Layout",
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provision_tops_up_after_deletion(stack: AppStack) {
    let first = stack
        .seeder
        .provision()
        .await
        .expect("provisioning should succeed");
    assert_eq!(first.tasks_created, 5);

    let john = stack
        .sign_in("john.doe@example.com", "password123")
        .await
        .expect("seeded credentials should sign in");
    let views = stack
        .collaboration
        .list_tasks(&john)
        .await
        .expect("listing should succeed");
    let target = find_by_title(&views, "Create Task Management UI")
        .expect("the seeded task should be listed");
    stack
        .collaboration
        .delete_task(&john, target.id)
        .await
        .expect("john created this task");

    let second = stack
        .seeder
        .provision()
        .await
        .expect("re-provisioning should succeed");
    assert_eq!(second.users_created, 0);
    assert_eq!(second.tasks_created, 1);

    let after = stack
        .collaboration
        .list_tasks(&john)
        .await
        .expect("listing should succeed");
    assert!(find_by_title(&after, "Create Task Management UI").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_ownership_rules_hold(stack: AppStack) {
    stack
        .seeder
        .provision()
        .await
        .expect("provisioning should succeed");

    let jane = stack
        .sign_in("jane.smith@example.com", "password123")
        .await
        .expect("seeded credentials should sign in");
    let views = stack
        .collaboration
        .list_tasks(&jane)
        .await
        .expect("listing should succeed");
    let homepage =
        find_by_title(&views, "Design Homepage Layout").expect("jane is the assignee");

    let updated = stack
        .collaboration
        .update_task(
            &jane,
            UpdateTaskRequest::new(homepage.id).with_status("done"),
        )
        .await
        .expect("the assignee may update");
    assert_eq!(updated.status, TaskStatus::Done);

    let result = stack.collaboration.delete_task(&jane, homepage.id).await;
    assert_eq!(
        result,
        Err(ServiceError::forbidden(
            "You can only delete tasks that you created"
        ))
    );
}
