//! Application settings and the HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use jobboard::domain::DEFAULT_POLL_INTERVAL;
use jobboard::inbound::http::session_config::SessionSettings;
use jobboard::outbound::text_generator::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080/uploads";

/// Runtime settings loaded from `JOBBOARD_*` variables, a config file or
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// Base URL of the chat completion API.
    pub generator_endpoint: Option<String>,
    /// Model sent to the chat completion API.
    pub generator_model: Option<String>,
    /// Bearer token for the chat completion API.
    pub generator_token: Option<String>,
    /// Whole-request timeout for text generation, in seconds.
    pub generator_timeout_secs: Option<u64>,
    /// Directory receiving uploaded avatars.
    pub media_root: Option<PathBuf>,
    /// Public URL prefix under which `media_root` is served.
    pub public_base_url: Option<String>,
    /// Inbox poll cadence advertised to clients, in seconds.
    pub poll_interval_secs: Option<u64>,
}

impl AppSettings {
    /// Listen address, defaulting to all interfaces on port 8080.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Non-blank database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.max(1)
    }

    pub fn generator_endpoint(&self) -> &str {
        self.generator_endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn generator_model(&self) -> &str {
        self.generator_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(
            self.generator_timeout_secs
                .unwrap_or(DEFAULT_GENERATOR_TIMEOUT_SECS),
        )
    }

    pub fn media_root(&self) -> PathBuf {
        self.media_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT))
    }

    pub fn public_base_url(&self) -> &str {
        self.public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL)
    }

    /// Poll cadence; zero falls back to the default.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval_secs
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_POLL_INTERVAL, Duration::from_secs)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "JOBBOARD_BIND_ADDR",
        "JOBBOARD_DATABASE_URL",
        "JOBBOARD_DB_POOL_SIZE",
        "JOBBOARD_GENERATOR_ENDPOINT",
        "JOBBOARD_GENERATOR_MODEL",
        "JOBBOARD_GENERATOR_TOKEN",
        "JOBBOARD_GENERATOR_TIMEOUT_SECS",
        "JOBBOARD_MEDIA_ROOT",
        "JOBBOARD_PUBLIC_BASE_URL",
        "JOBBOARD_POLL_INTERVAL_SECS",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("jobboard")]).expect("settings load")
    }

    #[rstest]
    fn defaults_apply_without_configuration() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_pool_size, 10);
        assert_eq!(settings.db_pool_size(), 10);
        assert_eq!(settings.generator_endpoint(), DEFAULT_ENDPOINT);
        assert!(settings.generator_token.is_none());
        assert_eq!(settings.poll_interval(), DEFAULT_POLL_INTERVAL);
    }

    #[rstest]
    fn environment_overrides_are_read() {
        let _guard = lock_env([
            ("JOBBOARD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "JOBBOARD_DATABASE_URL",
                Some("postgres://localhost/jobboard".to_owned()),
            ),
            ("JOBBOARD_POLL_INTERVAL_SECS", Some("60".to_owned())),
            ("JOBBOARD_GENERATOR_TOKEN", Some("hf_test".to_owned())),
            ("JOBBOARD_DB_POOL_SIZE", Some("4".to_owned())),
        ]);

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9000
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/jobboard"));
        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
        assert_eq!(settings.generator_token.as_deref(), Some("hf_test"));
        assert_eq!(settings.db_pool_size(), 4);
    }

    #[rstest]
    #[case(Some("   "), None)]
    #[case(Some(""), None)]
    #[case(Some("postgres://db/jobs"), Some("postgres://db/jobs"))]
    fn blank_database_urls_mean_memory_mode(
        #[case] raw: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));
        let settings = AppSettings {
            database_url: raw.map(str::to_owned),
            ..load()
        };
        assert_eq!(settings.database_url(), expected);
    }
}
