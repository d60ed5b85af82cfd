//! Given steps for task collaboration BDD scenarios.

use super::world::{CollaborationWorld, STEP_PASSWORD, run_async};
use corkboard::identity::{domain::Session, services::RegisterUserRequest};
use corkboard::task::services::{CreateTaskRequest, UpdateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a registered employee "{name}" with email "{email}""#)]
fn registered_employee(
    world: &mut CollaborationWorld,
    name: String,
    email: String,
) -> Result<(), eyre::Report> {
    let (first_name, last_name) = match name.split_once(' ') {
        Some((first, last)) => (first.to_owned(), last.to_owned()),
        None => (name.clone(), "Employee".to_owned()),
    };
    let request = RegisterUserRequest::new(world.next_employee_id(), &email, STEP_PASSWORD)
        .with_name(first_name, last_name)
        .with_department("Engineering")
        .with_position("Developer");
    let claim = run_async(world.registration.register(request))
        .wrap_err("register employee in scenario setup")?;
    world.sessions.insert(email, Session::authenticated(claim));
    Ok(())
}

#[given(r#""{email}" created a task titled "{title}""#)]
fn created_task(
    world: &mut CollaborationWorld,
    email: String,
    title: String,
) -> Result<(), eyre::Report> {
    let session = world.session_for(&email)?;
    let view = run_async(
        world
            .collaboration
            .create_task(&session, CreateTaskRequest::new(title)),
    )
    .wrap_err("create task in scenario setup")?;
    world.current_task = Some(view.id);
    world.last_view = Some(view);
    Ok(())
}

#[given(r#"the task is assigned to "{email}""#)]
fn task_assigned(world: &mut CollaborationWorld, email: String) -> Result<(), eyre::Report> {
    let creator_email = world
        .last_view
        .as_ref()
        .map(|view| view.created_by.email.as_str().to_owned())
        .ok_or_else(|| eyre::eyre!("no task created in this scenario"))?;
    let session = world.session_for(&creator_email)?;
    let task_id = world.current_task_id()?;

    let updated = run_async(
        world
            .collaboration
            .update_task(&session, UpdateTaskRequest::new(task_id).set_assignee(email)),
    )
    .wrap_err("assign task in scenario setup")?;
    world.last_view = Some(updated);
    Ok(())
}
