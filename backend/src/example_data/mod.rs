//! Startup wiring for example posting seeding.

mod config;
mod startup;

pub use config::{MAX_SEED_POSTINGS, PostingSeedSettings};
pub use startup::{StartupSeedingError, load_registry, seed_example_data_on_startup};
