//! Demo data provisioning for local and showcase environments.
//!
//! Seeds three demo employees and five demo tasks through the regular
//! repository ports. Provisioning is idempotent: users are matched by
//! email and tasks by title within the creator's list, so repeated runs
//! top up what is missing instead of duplicating records. Due dates are
//! set relative to the clock, keeping them valid on every run.

use crate::identity::{
    domain::{EmailAddress, EmployeeId, NewUserProfile, User, UserId},
    ports::{PasswordHasher, UserRepository},
};
use crate::outcome::{ServiceError, ServiceResult};
use crate::task::{
    domain::{
        DueDate, NewTaskData, TagSet, Task, TaskDescription, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::TaskRepository,
};
use chrono::Duration;
use mockable::Clock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Password shared by every demo account.
const DEMO_PASSWORD: &str = "password123";

struct DemoEmployee {
    employee_id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    department: &'static str,
    position: &'static str,
}

const DEMO_EMPLOYEES: [DemoEmployee; 3] = [
    DemoEmployee {
        employee_id: "EMP001",
        first_name: "John",
        last_name: "Doe",
        email: "john.doe@example.com",
        department: "Engineering",
        position: "Frontend Developer",
    },
    DemoEmployee {
        employee_id: "EMP002",
        first_name: "Jane",
        last_name: "Smith",
        email: "jane.smith@example.com",
        department: "Design",
        position: "UI/UX Designer",
    },
    DemoEmployee {
        employee_id: "EMP003",
        first_name: "Mike",
        last_name: "Johnson",
        email: "mike.johnson@example.com",
        department: "Engineering",
        position: "Backend Developer",
    },
];

struct DemoTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    tags: &'static [&'static str],
    created_by: &'static str,
    assigned_to: &'static str,
    due_in_days: i64,
}

const DEMO_TASKS: [DemoTask; 5] = [
    DemoTask {
        title: "Design Homepage Layout",
        description: "Create a modern and responsive homepage layout",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        tags: &["design", "frontend"],
        created_by: "john.doe@example.com",
        assigned_to: "jane.smith@example.com",
        due_in_days: 14,
    },
    DemoTask {
        title: "Implement User Authentication",
        description: "Wire up credential sign-in with hashed passwords",
        status: TaskStatus::Todo,
        priority: TaskPriority::Urgent,
        tags: &["backend", "auth"],
        created_by: "john.doe@example.com",
        assigned_to: "mike.johnson@example.com",
        due_in_days: 9,
    },
    DemoTask {
        title: "Database Schema Design",
        description: "Design relational schemas for users and tasks",
        status: TaskStatus::Done,
        priority: TaskPriority::Medium,
        tags: &["database", "postgres"],
        created_by: "jane.smith@example.com",
        assigned_to: "jane.smith@example.com",
        due_in_days: 4,
    },
    DemoTask {
        title: "Create Task Management UI",
        description: "Build task creation and management interface",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        tags: &["frontend", "react"],
        created_by: "john.doe@example.com",
        assigned_to: "john.doe@example.com",
        due_in_days: 17,
    },
    DemoTask {
        title: "API Documentation",
        description: "Write API documentation for all endpoints",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        tags: &["documentation"],
        created_by: "jane.smith@example.com",
        assigned_to: "john.doe@example.com",
        due_in_days: 24,
    },
];

/// Credential pair for signing in to a provisioned demo account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoCredential {
    /// Demo account email.
    pub email: String,
    /// Demo account password.
    pub password: String,
}

/// Summary of a provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Number of users created in this run; pre-existing ones are skipped.
    pub users_created: usize,
    /// Number of tasks created in this run; pre-existing ones are skipped.
    pub tasks_created: usize,
    /// Sign-in credentials for every demo account, new or pre-existing.
    pub credentials: Vec<DemoCredential>,
}

/// Provisions demo accounts and tasks for local environments.
///
/// Writes go straight to the repositories; no session is involved and
/// ownership permissions are not consulted.
#[derive(Clone)]
pub struct DemoSeeder<U, T, H, C>
where
    U: UserRepository,
    T: TaskRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    tasks: Arc<T>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<U, T, H, C> DemoSeeder<U, T, H, C>
where
    U: UserRepository,
    T: TaskRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new demo seeder.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            users,
            tasks,
            hasher,
            clock,
        }
    }

    /// Provisions the demo accounts and tasks, skipping what exists.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Internal`] when a repository or the hasher
    /// fails; partial progress is kept.
    pub async fn provision(&self) -> ServiceResult<SeedReport> {
        let mut report = SeedReport::default();
        let mut directory: HashMap<&'static str, UserId> = HashMap::new();

        for employee in &DEMO_EMPLOYEES {
            let id = self.ensure_employee(employee, &mut report).await?;
            directory.insert(employee.email, id);
        }
        for seed in &DEMO_TASKS {
            self.ensure_task(seed, &directory, &mut report).await?;
        }
        Ok(report)
    }

    async fn ensure_employee(
        &self,
        employee: &DemoEmployee,
        report: &mut SeedReport,
    ) -> ServiceResult<UserId> {
        report.credentials.push(DemoCredential {
            email: employee.email.to_owned(),
            password: DEMO_PASSWORD.to_owned(),
        });

        let email = EmailAddress::new(employee.email)?;
        if let Some(existing) = self.users.find_by_email(&email).await? {
            return Ok(existing.id());
        }

        let profile = NewUserProfile {
            employee_id: EmployeeId::new(employee.employee_id)?,
            first_name: employee.first_name.to_owned(),
            last_name: employee.last_name.to_owned(),
            email,
            department: employee.department.to_owned(),
            position: employee.position.to_owned(),
        };
        let password_hash = self.hasher.hash(DEMO_PASSWORD).await?;
        let user = User::new(profile, password_hash, &*self.clock);
        self.users.insert(&user).await?;
        report.users_created += 1;
        Ok(user.id())
    }

    async fn ensure_task(
        &self,
        seed: &DemoTask,
        directory: &HashMap<&'static str, UserId>,
        report: &mut SeedReport,
    ) -> ServiceResult<()> {
        let creator = resolve_seed_user(directory, seed.created_by)?;
        let assignee = resolve_seed_user(directory, seed.assigned_to)?;

        let existing = self.tasks.find_by_creator_or_assignee(creator).await?;
        if existing.iter().any(|view| view.title.as_str() == seed.title) {
            return Ok(());
        }

        let due_moment = self.clock.utc() + Duration::days(seed.due_in_days);
        let due_date = DueDate::new(due_moment, &*self.clock)?;
        let task = Task::new(
            NewTaskData {
                title: TaskTitle::new(seed.title)?,
                description: TaskDescription::new(seed.description)?,
                status: seed.status,
                priority: seed.priority,
                due_date: Some(due_date),
                tags: TagSet::new(seed.tags.iter().map(|tag| (*tag).to_owned())),
                created_by: creator,
                assigned_to: assignee,
            },
            &*self.clock,
        );
        self.tasks.insert(&task).await?;
        report.tasks_created += 1;
        Ok(())
    }
}

fn resolve_seed_user(
    directory: &HashMap<&'static str, UserId>,
    email: &str,
) -> ServiceResult<UserId> {
    directory
        .get(email)
        .copied()
        .ok_or_else(|| ServiceError::internal(format!("demo user {email} not provisioned")))
}
