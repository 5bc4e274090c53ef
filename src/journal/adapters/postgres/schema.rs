//! Diesel schema for journal persistence.

diesel::table! {
    /// Journal entries filed under date buckets.
    tasks (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Entry text.
        content -> Text,
        /// Entry kind (`task`, `event` or `note`).
        #[max_length = 16]
        kind -> Varchar,
        /// Entry status.
        #[max_length = 16]
        status -> Varchar,
        /// Owning bucket key in `YYYY-MM-DD` form.
        #[max_length = 10]
        date_str -> Varchar,
        /// Optional project reference; not a foreign key.
        project_id -> Nullable<Uuid>,
        /// Optional display date for master lists.
        display_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last status change timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects used to tag entries.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
