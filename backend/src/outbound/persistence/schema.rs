//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Login accounts.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Normalised email, unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_digest -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Post categories.
    categories (id) {
        /// Primary key.
        id -> Int8,
        /// Display name, unique.
        name -> Varchar,
        /// Optional free text.
        description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts.
    posts (id) {
        /// Primary key.
        id -> Int8,
        /// Headline.
        title -> Varchar,
        /// Article text.
        body -> Text,
        /// Category reference, cleared when the category is deleted.
        category_id -> Nullable<Int8>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on posts.
    comments (id) {
        /// Primary key.
        id -> Int8,
        /// Parent post, cascades on delete.
        post_id -> Int8,
        /// Comment text.
        body -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(posts -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(categories, comments, posts, users);
