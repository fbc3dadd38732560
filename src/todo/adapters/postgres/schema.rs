//! Diesel schema for list and item persistence.

diesel::table! {
    /// To-do lists owned by users.
    todo_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List title.
        #[max_length = 100]
        title -> Varchar,
        /// Owning user.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion order.
        position -> Int8,
    }
}

diesel::table! {
    /// Items arranged in per-list trees.
    todo_items (id) {
        /// Item identifier.
        id -> Uuid,
        /// Item text.
        #[max_length = 200]
        content -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// UI collapse flag.
        collapsed -> Bool,
        /// Owning list.
        list_id -> Uuid,
        /// Parent item for nested entries.
        parent_id -> Nullable<Uuid>,
        /// Nesting level, 1 to 3.
        level -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion order.
        position -> Int8,
    }
}

diesel::joinable!(todo_items -> todo_lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(todo_lists, todo_items);
