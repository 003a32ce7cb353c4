//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{RegistryError, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{ExampleDataSeedRepository, SeedingResult};
use crate::domain::{ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError};
use crate::example_data::config::PostingSeedSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed generation or persistence failed.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Apply example postings on startup when enabled.
///
/// Seeding goes through whichever store the server runs on, so the
/// in-memory mode gets the same demo postings as PostgreSQL.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use jobboard::example_data::{PostingSeedSettings, seed_example_data_on_startup};
/// use jobboard::outbound::memory::MemoryStore;
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = PostingSeedSettings::disabled();
/// let store = Arc::new(MemoryStore::new());
/// let outcome = seed_example_data_on_startup(&settings, store, Arc::new(DefaultClock)).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup<R>(
    settings: &PostingSeedSettings,
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError>
where
    R: ExampleDataSeedRepository,
{
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings
        .seed_name()
        .ok_or(StartupSeedingError::EmptySeedName)?;

    let registry = load_registry(&settings.registry_path())?;
    let seeder = ExampleDataSeeder::new(repository, clock);
    let outcome = seeder
        .seed_from_registry(&registry, seed_name, settings.posting_count())
        .await?;

    match outcome.result {
        SeedingResult::Applied => info!(
            seed_key = %outcome.seed_key,
            posting_count = outcome.posting_count,
            "example data seeding applied"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_key = %outcome.seed_key,
            posting_count = outcome.posting_count,
            "example data seed already applied; skipping"
        ),
    }

    Ok(Some(outcome))
}

fn read_error(path: &Path, source: std::io::Error) -> StartupSeedingError {
    StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a seed registry through a capability on its parent directory.
///
/// # Errors
/// Returns [`StartupSeedingError`] when the file cannot be read or parsed.
pub fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "registry path must be a file"),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|source| read_error(path, source))?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(|source| read_error(path, source))?;
    Ok(SeedRegistry::from_json(&contents)?)
}
