//! Registry files written to scratch directories for the scenarios.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tempfile::TempDir;

const REGISTRY_FILE: &str = "seeds.json";

/// A `seeds.json` registry in its own temporary directory, removed on drop.
pub struct RegistryFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl RegistryFile {
    /// Write a registry holding one named seed.
    ///
    /// # Errors
    ///
    /// Returns any filesystem error raised while writing the document.
    pub fn single_seed(name: &str, seed: u64, posting_count: usize) -> io::Result<Self> {
        let json = format!(
            r#"{{"version": 1, "seeds": [{{"name": "{name}", "seed": {seed}, "postingCount": {posting_count}}}]}}"#
        );
        let dir = TempDir::new()?;
        let root = Utf8Path::from_path(dir.path())
            .ok_or_else(|| io::Error::other("temporary directory is not UTF-8"))?
            .to_path_buf();
        Dir::open_ambient_dir(&root, ambient_authority())?.write(REGISTRY_FILE, json)?;
        Ok(Self {
            _dir: dir,
            path: root.join(REGISTRY_FILE),
        })
    }

    /// Location of the written registry.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}
