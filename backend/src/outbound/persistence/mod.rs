//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Constraint-backed uniqueness**: one interest per actor and target and
//!   one bookmark per user and target are enforced by partial unique indexes;
//!   violations map to the ports' `Duplicate` variants.
//!
//! # Example
//!
//! ```ignore
//! use jobboard::outbound::persistence::{DbPool, PoolConfig, DieselListingRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/jobboard");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselListingRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_bookmark_repository;
#[cfg(feature = "example-data")]
mod diesel_example_data_seed_repository;
mod diesel_interest_repository;
mod diesel_listing_repository;
mod diesel_notification_repository;
mod diesel_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bookmark_repository::DieselBookmarkRepository;
#[cfg(feature = "example-data")]
pub use diesel_example_data_seed_repository::DieselExampleDataSeedRepository;
pub use diesel_interest_repository::DieselInterestRepository;
pub use diesel_listing_repository::DieselListingRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_profile_repository::{DieselAccountRepository, DieselProfileRepository};
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
