//! Assemble [`HttpState`] over PostgreSQL or the in-memory store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

use jobboard::domain::ports::{BlobStorageError, TextGeneratorError};
use jobboard::inbound::http::state::{Adapters, HttpState, HttpStatePorts};
use jobboard::outbound::blob_storage::LocalBlobStorage;
use jobboard::outbound::memory::MemoryStore;
use jobboard::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselBookmarkRepository, DieselInterestRepository,
    DieselListingRepository, DieselNotificationRepository, DieselProfileRepository,
    MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use jobboard::outbound::text_generator::{HttpTextGenerator, TextGeneratorSettings};
#[cfg(feature = "example-data")]
use jobboard::example_data::{PostingSeedSettings, StartupSeedingError, seed_example_data_on_startup};
#[cfg(feature = "example-data")]
use jobboard::outbound::persistence::DieselExampleDataSeedRepository;

use super::AppSettings;

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A setting could not be interpreted.
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Schema migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The media directory could not be opened.
    #[error("media storage unavailable: {0}")]
    Media(#[from] BlobStorageError),
    /// The text generator client could not be built.
    #[error("text generator unavailable: {0}")]
    Generator(#[from] TextGeneratorError),
    /// Example data seeding failed.
    #[cfg(feature = "example-data")]
    #[error(transparent)]
    Seeding(#[from] StartupSeedingError),
}

impl From<StartupError> for std::io::Error {
    fn from(error: StartupError) -> Self {
        Self::other(error.to_string())
    }
}

/// Adapters shared by both store modes.
struct ExternalAdapters {
    blobs: Arc<LocalBlobStorage>,
    generator: Arc<HttpTextGenerator>,
}

fn external_adapters(settings: &AppSettings) -> Result<ExternalAdapters, StartupError> {
    let endpoint =
        Url::parse(settings.generator_endpoint()).map_err(|error| StartupError::InvalidSetting {
            name: "generator_endpoint",
            message: error.to_string(),
        })?;
    let generator = HttpTextGenerator::new(TextGeneratorSettings {
        endpoint,
        model: settings.generator_model().to_owned(),
        api_token: settings.generator_token.clone(),
        timeout: settings.generator_timeout(),
    })?;
    if !generator.is_configured() {
        warn!("no text generator token configured; drafting will be unavailable");
    }
    let blobs = LocalBlobStorage::open(settings.media_root(), settings.public_base_url())?;
    Ok(ExternalAdapters {
        blobs: Arc::new(blobs),
        generator: Arc::new(generator),
    })
}

/// Apply pending migrations and open the pool.
async fn connect(settings: &AppSettings, database_url: &str) -> Result<DbPool, StartupError> {
    let config = PoolConfig::new(database_url).with_max_size(settings.db_pool_size());
    info!(database = %config.redacted_url(), "connecting to PostgreSQL");
    run_pending_migrations(database_url).await?;
    Ok(DbPool::new(config).await?)
}

fn postgres_ports(pool: DbPool, external: ExternalAdapters, clock: Arc<dyn Clock>) -> HttpStatePorts {
    HttpStatePorts::from_adapters(
        Adapters {
            listings: Arc::new(DieselListingRepository::new(pool.clone())),
            interests: Arc::new(DieselInterestRepository::new(pool.clone())),
            bookmarks: Arc::new(DieselBookmarkRepository::new(pool.clone())),
            notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
            profiles: Arc::new(DieselProfileRepository::new(pool.clone())),
            accounts: Arc::new(DieselAccountRepository::new(pool)),
            blobs: external.blobs,
            generator: external.generator,
        },
        clock,
    )
}

/// Every repository slot shares one in-memory store.
fn memory_ports(
    store: Arc<MemoryStore>,
    external: ExternalAdapters,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    HttpStatePorts::from_adapters(
        Adapters {
            listings: Arc::clone(&store),
            interests: Arc::clone(&store),
            bookmarks: Arc::clone(&store),
            notifications: Arc::clone(&store),
            profiles: Arc::clone(&store),
            accounts: store,
            blobs: external.blobs,
            generator: external.generator,
        },
        clock,
    )
}

#[cfg(feature = "example-data")]
async fn seed_example_data<R>(repository: Arc<R>, clock: Arc<dyn Clock>) -> Result<(), StartupError>
where
    R: jobboard::domain::ports::ExampleDataSeedRepository,
{
    use ortho_config::OrthoConfig;
    let settings = PostingSeedSettings::load_from_iter([std::ffi::OsString::from("jobboard")])
        .map_err(|error| StartupError::InvalidSetting {
            name: "seed",
            message: error.to_string(),
        })?;
    seed_example_data_on_startup(&settings, repository, clock).await?;
    Ok(())
}

/// Build the HTTP state the server hands to every worker.
///
/// # Errors
/// Returns [`StartupError`] when a backing service cannot be prepared.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let external = external_adapters(settings)?;
    let ports = match settings.database_url() {
        Some(url) => {
            let pool = connect(settings, url).await?;
            #[cfg(feature = "example-data")]
            seed_example_data(
                Arc::new(DieselExampleDataSeedRepository::new(pool.clone())),
                Arc::clone(&clock),
            )
            .await?;
            postgres_ports(pool, external, clock)
        }
        None => {
            warn!("no database URL configured; records are kept in memory only");
            let store = Arc::new(MemoryStore::new());
            #[cfg(feature = "example-data")]
            seed_example_data(Arc::clone(&store), Arc::clone(&clock)).await?;
            memory_ports(store, external, clock)
        }
    };
    Ok(HttpState::new(ports).with_poll_interval(settings.poll_interval()))
}
