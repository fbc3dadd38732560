//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 80]
        username -> Varchar,
        /// Unique e-mail address.
        #[max_length = 120]
        email -> Varchar,
        /// Encoded password hash.
        #[max_length = 255]
        password_hash -> Varchar,
    }
}
