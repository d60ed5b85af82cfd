//! Diesel schema for collaborative task persistence.

diesel::table! {
    /// Task records with participant references.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 100]
        title -> Varchar,
        /// Description, possibly empty.
        #[max_length = 500]
        description -> Varchar,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Normalised tags JSON payload.
        tags -> Jsonb,
        /// Creating user.
        created_by -> Uuid,
        /// Optional current assignee.
        assigned_to -> Nullable<Uuid>,
        /// Archive flag.
        is_archived -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
