//! `PostgreSQL` integration tests for account storage and sign-in.

use crate::postgres::harness::{BoxError, PreparedStack, TEST_PASSWORD, prepared_stack};
use corkboard::identity::{
    domain::{EmailAddress, EmployeeId, NewUserProfile, PasswordHash, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use corkboard::outcome::ServiceError;
use mockable::DefaultClock;
use rstest::rstest;

fn employee_record(employee_id: &str, email: &str) -> Result<User, BoxError> {
    let profile = NewUserProfile {
        employee_id: EmployeeId::new(employee_id)?,
        first_name: "Directly".to_owned(),
        last_name: "Stored".to_owned(),
        email: EmailAddress::new(email)?,
        department: "Engineering".to_owned(),
        position: "Developer".to_owned(),
    };
    Ok(User::new(
        profile,
        PasswordHash::new("stored-digest"),
        &DefaultClock,
    ))
}

fn missing_record_error() -> BoxError {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "expected record to exist",
    ))
}

#[rstest]
#[tokio::test]
async fn registration_round_trips_through_storage(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let session = ctx
        .stack
        .register_employee("EMP201", "Grace", "Hopper", "grace.hopper@example.com")
        .await?;

    let claim = ctx
        .stack
        .verifier
        .verify("grace.hopper@example.com", TEST_PASSWORD)
        .await?;
    assert_eq!(Some(claim.user_id), session.user_id());
    assert_eq!(claim.name, "Grace Hopper");
    assert_eq!(claim.employee_id.as_str(), "EMP201");
    assert_eq!(claim.department, "Engineering");

    let rejected = ctx
        .stack
        .verifier
        .verify("grace.hopper@example.com", "not the password")
        .await;
    assert_eq!(
        rejected,
        Err(ServiceError::invalid_credentials("Invalid password"))
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn stored_email_is_the_canonical_form(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    ctx.stack
        .register_employee("EMP202", "Alan", "Turing", "Alan.Turing@Example.COM")
        .await?;

    let lookup = EmailAddress::new("ALAN.turing@example.com")?;
    let stored = ctx
        .stack
        .users
        .find_by_email(&lookup)
        .await?
        .ok_or_else(missing_record_error)?;
    assert_eq!(stored.email().as_str(), "alan.turing@example.com");

    let claim = ctx
        .stack
        .verifier
        .verify("  alan.turing@EXAMPLE.com ", TEST_PASSWORD)
        .await?;
    assert_eq!(claim.email.as_str(), "alan.turing@example.com");

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn stored_profile_reloads_with_all_fields(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let record = employee_record("EMP203", "full.profile@example.com")?;
    ctx.stack.users.insert(&record).await?;

    let reloaded = ctx
        .stack
        .users
        .find_by_id(record.id())
        .await?
        .ok_or_else(missing_record_error)?;

    assert_eq!(reloaded.id(), record.id());
    assert_eq!(reloaded.employee_id(), record.employee_id());
    assert_eq!(reloaded.email(), record.email());
    assert_eq!(reloaded.full_name(), "Directly Stored");
    assert_eq!(reloaded.department(), "Engineering");
    assert_eq!(reloaded.position(), "Developer");
    assert_eq!(reloaded.password_hash().as_str(), "stored-digest");
    // TIMESTAMPTZ keeps microsecond precision.
    assert_eq!(
        reloaded.created_at().timestamp_micros(),
        record.created_at().timestamp_micros()
    );
    assert_eq!(
        reloaded.updated_at().timestamp_micros(),
        record.updated_at().timestamp_micros()
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn duplicate_email_insert_maps_to_its_own_error(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let first = employee_record("EMP204", "taken@example.com")?;
    ctx.stack.users.insert(&first).await?;

    let second = employee_record("EMP205", "taken@example.com")?;
    let err = ctx
        .stack
        .users
        .insert(&second)
        .await
        .expect_err("the unique email constraint should reject the insert");
    assert!(
        matches!(
            err,
            UserRepositoryError::DuplicateEmail(ref email) if email.as_str() == "taken@example.com"
        ),
        "unexpected error: {err:?}"
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn duplicate_employee_id_insert_maps_to_its_own_error(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let first = employee_record("EMP206", "first.holder@example.com")?;
    ctx.stack.users.insert(&first).await?;

    let second = employee_record("EMP206", "second.holder@example.com")?;
    let err = ctx
        .stack
        .users
        .insert(&second)
        .await
        .expect_err("the unique employee id constraint should reject the insert");
    assert!(
        matches!(
            err,
            UserRepositoryError::DuplicateEmployeeId(ref id) if id.as_str() == "EMP206"
        ),
        "unexpected error: {err:?}"
    );

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn duplicate_employee_number_surfaces_through_registration(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    ctx.stack
        .register_employee("EMP207", "Barbara", "Liskov", "barbara@example.com")
        .await?;

    let duplicate = ctx
        .stack
        .register_employee("EMP207", "Other", "Person", "other.person@example.com")
        .await;
    let message = duplicate
        .expect_err("the registration should be rejected")
        .to_string();
    assert_eq!(message, "a user with employee id EMP207 already exists");

    ctx.db.cleanup().await
}

#[rstest]
#[tokio::test]
async fn lookups_return_none_for_unknown_identities(
    #[future] prepared_stack: Result<Option<PreparedStack>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = prepared_stack.await? else {
        return Ok(());
    };

    let unknown_email = EmailAddress::new("nobody@example.com")?;
    assert_eq!(ctx.stack.users.find_by_email(&unknown_email).await?, None);
    assert_eq!(ctx.stack.users.find_by_id(UserId::new()).await?, None);

    ctx.db.cleanup().await
}
