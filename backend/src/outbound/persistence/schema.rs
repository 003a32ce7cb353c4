//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Sign-in accounts keyed by email.
    accounts (id) {
        id -> Uuid,
        #[max_length = 320]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Profiles share their primary key with the account identity.
    profiles (id) {
        id -> Uuid,
        #[max_length = 320]
        email -> Varchar,
        /// `user` or `admin`.
        #[max_length = 16]
        role -> Varchar,
        display_name -> Text,
        phone -> Text,
        avatar_url -> Nullable<Text>,
        email_notifications -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings published by studios.
    postings (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        location -> Text,
        category -> Text,
        experience -> Nullable<Text>,
        compensation -> Nullable<Text>,
        description -> Nullable<Text>,
        /// `active` or `closed`; `closed_at` is set exactly when closed.
        #[max_length = 16]
        status -> Varchar,
        created_at -> Timestamptz,
        closed_at -> Nullable<Timestamptz>,
        expires_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Instructor profiles offered to studios.
    candidates (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Text,
        location -> Text,
        styles -> Array<Text>,
        experience_level -> Nullable<Text>,
        certifications -> Nullable<Text>,
        photo_url -> Nullable<Text>,
        introduction -> Text,
        #[max_length = 16]
        status -> Varchar,
        created_at -> Timestamptz,
        closed_at -> Nullable<Timestamptz>,
        expires_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Applications and contacts. Exactly one target column is set.
    interests (id) {
        id -> Uuid,
        actor_id -> Uuid,
        posting_id -> Nullable<Uuid>,
        candidate_id -> Nullable<Uuid>,
        message -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favourites. Exactly one target column is set.
    bookmarks (id) {
        id -> Uuid,
        user_id -> Uuid,
        posting_id -> Nullable<Uuid>,
        candidate_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-recipient inbox entries.
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        #[max_length = 16]
        kind -> Varchar,
        related_item_id -> Uuid,
        title -> Text,
        message -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Example data seed runs, one row per applied seed key.
    example_data_runs (seed_key) {
        seed_key -> Text,
        seeded_at -> Timestamptz,
        posting_count -> Int4,
        seed -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    bookmarks,
    candidates,
    example_data_runs,
    interests,
    notifications,
    postings,
    profiles,
);
