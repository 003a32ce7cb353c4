//! Deterministic example job posting generation for demonstration purposes.
//!
//! This crate generates believable, reproducible yoga instructor job postings
//! from a JSON seed registry. It is independent of backend domain types so the
//! backend can convert the output into validated entities at the point of use.
//!
//! # Overview
//!
//! - Loading seed registries from JSON strings or files
//! - Deterministic posting generation using named seeds
//! - A built-in vocabulary of titles, locations, styles, experience
//!   requirements, and compensation text
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, Vocabulary, generate_example_postings};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{"name": "test-seed", "seed": 42, "postingCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let postings =
//!     generate_example_postings(&Vocabulary::default(), seed_def).expect("generation succeeds");
//!
//! assert_eq!(postings.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod vocabulary;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_postings;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::ExamplePostingSeed;
pub use vocabulary::Vocabulary;
