//! Diesel schema for user account persistence.

diesel::table! {
    /// User account records with credential digests.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Organisation-assigned employee number.
        #[max_length = 50]
        employee_id -> Varchar,
        /// Given name.
        #[max_length = 50]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 50]
        last_name -> Varchar,
        /// Canonical email address.
        #[max_length = 255]
        email -> Varchar,
        /// Department the user belongs to.
        #[max_length = 100]
        department -> Varchar,
        /// Job position.
        #[max_length = 100]
        position -> Varchar,
        /// Password digest produced by the hashing adapter.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
