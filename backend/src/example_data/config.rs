//! Settings for seeding demo postings at startup, read with OrthoConfig from
//! `JOBBOARD_SEED_*` variables, a config file or flags.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "sunrise-flow";

/// Largest posting batch a single seed run may insert.
pub const MAX_SEED_POSTINGS: usize = 200;

fn bundled_registry() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Which registry seed to apply and how many postings it should produce.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD_SEED")]
pub struct PostingSeedSettings {
    /// Seed demo postings on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry entry to apply; `sunrise-flow` when absent.
    pub name: Option<String>,
    /// Override for the registry's posting count.
    #[ortho_config(file_key = "posting_count")]
    pub postings: Option<usize>,
    /// Registry file; the bundled fixture when absent.
    pub registry: Option<PathBuf>,
}

impl PostingSeedSettings {
    /// Settings with seeding switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            name: None,
            postings: None,
            registry: None,
        }
    }

    /// Whether seeding should run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Trimmed seed name, or `None` when one was configured blank.
    pub fn seed_name(&self) -> Option<&str> {
        match self.name.as_deref().map(str::trim) {
            None => Some(DEFAULT_SEED_NAME),
            Some("") => None,
            Some(name) => Some(name),
        }
    }

    /// Posting count override capped at [`MAX_SEED_POSTINGS`]; zero means
    /// the registry decides.
    pub fn posting_count(&self) -> Option<usize> {
        self.postings
            .filter(|count| *count > 0)
            .map(|count| count.min(MAX_SEED_POSTINGS))
    }

    /// Registry location.
    pub fn registry_path(&self) -> PathBuf {
        self.registry.clone().unwrap_or_else(bundled_registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "JOBBOARD_SEED_ENABLED",
        "JOBBOARD_SEED_NAME",
        "JOBBOARD_SEED_POSTINGS",
        "JOBBOARD_SEED_REGISTRY",
    ];

    fn load() -> PostingSeedSettings {
        PostingSeedSettings::load_from_iter([OsString::from("jobboard")])
            .expect("seed settings load")
    }

    #[rstest]
    fn seeding_is_off_by_default() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert!(!settings.is_enabled());
        assert_eq!(settings.seed_name(), Some(DEFAULT_SEED_NAME));
        assert_eq!(settings.registry_path(), bundled_registry());
        assert_eq!(settings.posting_count(), None);
    }

    #[rstest]
    fn environment_selects_seed_and_count() {
        let _guard = lock_env([
            ("JOBBOARD_SEED_ENABLED", Some("true".to_owned())),
            ("JOBBOARD_SEED_NAME", Some(" evening-yin ".to_owned())),
            ("JOBBOARD_SEED_POSTINGS", Some("5".to_owned())),
            (
                "JOBBOARD_SEED_REGISTRY",
                Some("/srv/jobboard/seeds.json".to_owned()),
            ),
        ]);

        let settings = load();
        assert!(settings.is_enabled());
        assert_eq!(settings.seed_name(), Some("evening-yin"));
        assert_eq!(settings.posting_count(), Some(5));
        assert_eq!(
            settings.registry_path(),
            PathBuf::from("/srv/jobboard/seeds.json")
        );
    }

    #[rstest]
    #[case(Some(0), None)]
    #[case(Some(12), Some(12))]
    #[case(Some(MAX_SEED_POSTINGS + 1), Some(MAX_SEED_POSTINGS))]
    fn posting_count_is_capped(#[case] raw: Option<usize>, #[case] expected: Option<usize>) {
        let settings = PostingSeedSettings {
            postings: raw,
            ..PostingSeedSettings::disabled()
        };
        assert_eq!(settings.posting_count(), expected);
    }

    #[rstest]
    fn blank_seed_name_is_reported_as_missing() {
        let settings = PostingSeedSettings {
            name: Some("   ".to_owned()),
            ..PostingSeedSettings::disabled()
        };
        assert_eq!(settings.seed_name(), None);
    }
}
