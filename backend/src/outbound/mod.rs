//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process record store implementing every repository port
//! - **blob_storage**: local directory storage for uploaded avatars
//! - **text_generator**: chat completion client used for posting drafts
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod blob_storage;
pub mod memory;
pub mod persistence;
pub mod text_generator;
