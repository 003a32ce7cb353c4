//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The backend forbids direct `std::fs` calls. These helpers provide common
    //! read/write/existence/remove operations built on `cap_std::fs::Dir` so
    //! test suites can share consistent, policy-compliant file access.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jobboard::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-read-example.txt");
    /// write_file(&path, b"hello\n")?;
    ///
    /// let content = read_file_to_string(&path)?;
    /// assert_eq!(content, "hello\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jobboard::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-write-example.txt");
    /// write_file(&path, b"snapshot\n")?;
    /// assert_eq!(read_file_to_string(&path)?, "snapshot\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    /// Return true when `path` exists, false when it does not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jobboard::test_support::cap_fs::{path_exists, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-exists-example.txt");
    /// write_file(&path, b"exists\n")?;
    /// assert!(path_exists(&path));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn path_exists(path: &Path) -> bool {
        let Ok((parent, file_name)) = parent_and_file_name(path) else {
            return false;
        };
        let Ok(directory) = Dir::open_ambient_dir(parent, ambient_authority()) else {
            return false;
        };
        directory.exists(Path::new(&file_name))
    }

    /// Remove a directory tree, treating a missing path as success.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jobboard::test_support::cap_fs::{path_exists, remove_directory, write_file};
    /// use cap_std::{ambient_authority, fs::Dir};
    ///
    /// let directory = std::env::temp_dir().join("cap-fs-remove-example");
    /// Dir::create_ambient_dir_all(&directory, ambient_authority())?;
    /// let file = directory.join("entry.txt");
    /// write_file(&file, b"cleanup\n")?;
    /// assert!(path_exists(&file));
    ///
    /// remove_directory(&directory)?;
    /// assert!(!path_exists(&file));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn remove_directory(path: &Path) -> io::Result<()> {
        let (parent, directory_name) = parent_and_file_name(path)?;
        let directory = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(directory) => directory,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(error),
        };
        match directory.remove_dir_all(Path::new(&directory_name)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error),
        }
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file or directory name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod clock;
pub use clock::MutableClock;

pub mod blobs {
    //! Temporary avatar storage for adapter and HTTP tests.

    use tempfile::TempDir;

    use crate::outbound::blob_storage::LocalBlobStorage;

    /// Public URL prefix reported by [`temp_blob_storage`].
    pub const TEST_PUBLIC_BASE_URL: &str = "http://localhost:8080/uploads";

    /// Create local blob storage rooted in a fresh temporary directory.
    ///
    /// Keep the returned [`TempDir`] alive for as long as the storage is
    /// used; dropping it removes the directory.
    pub fn temp_blob_storage() -> (TempDir, LocalBlobStorage) {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("create temp dir: {error}"),
        };
        let storage = match LocalBlobStorage::open(dir.path(), TEST_PUBLIC_BASE_URL) {
            Ok(storage) => storage,
            Err(error) => panic!("open blob storage: {error}"),
        };
        (dir, storage)
    }
}

pub mod http {
    //! In-memory HTTP state for handler and end-to-end tests.

    use std::sync::Arc;

    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::{App, test::TestRequest, web};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    use super::MutableClock;
    use super::blobs::temp_blob_storage;
    use crate::domain::ports::{GenerationRequest, TextGenerator, TextGeneratorError};
    use crate::inbound::http::state::{Adapters, HttpState, HttpStatePorts};
    use crate::inbound::http::{api_services, json_config, query_config};
    use crate::outbound::memory::MemoryStore;

    /// Password used by [`signup_request`].
    pub const TEST_PASSWORD: &str = "downward-dog-42";

    /// Text generator that answers every prompt with fixed text.
    pub struct CannedTextGenerator(pub String);

    #[async_trait]
    impl TextGenerator for CannedTextGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, TextGeneratorError> {
            Ok(self.0.clone())
        }
    }

    /// Start time used by [`MemoryHarness::new`].
    pub fn harness_epoch() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single() {
            Some(epoch) => epoch,
            None => panic!("valid epoch"),
        }
    }

    /// Every service wired over one [`MemoryStore`] and a controllable clock.
    pub struct MemoryHarness {
        pub store: Arc<MemoryStore>,
        pub clock: Arc<MutableClock>,
        pub state: HttpState,
        _blobs: TempDir,
    }

    impl MemoryHarness {
        /// Build a harness whose clock starts at [`harness_epoch`].
        pub fn new() -> Self {
            Self::with_generator(CannedTextGenerator("Drafted posting".to_owned()))
        }

        /// Build a harness with a specific text generator.
        pub fn with_generator<T: TextGenerator + 'static>(generator: T) -> Self {
            let store = Arc::new(MemoryStore::new());
            let clock = Arc::new(MutableClock::new(harness_epoch()));
            let (blob_dir, blobs) = temp_blob_storage();
            let ports = HttpStatePorts::from_adapters(
                Adapters {
                    listings: Arc::clone(&store),
                    interests: Arc::clone(&store),
                    bookmarks: Arc::clone(&store),
                    notifications: Arc::clone(&store),
                    profiles: Arc::clone(&store),
                    accounts: Arc::clone(&store),
                    blobs: Arc::new(blobs),
                    generator: Arc::new(generator),
                },
                clock.clone(),
            );
            Self {
                store,
                clock,
                state: HttpState::new(ports),
                _blobs: blob_dir,
            }
        }
    }

    impl Default for MemoryHarness {
        fn default() -> Self {
            Self::new()
        }
    }

    /// The full `/api/v1` surface over `state` with a throwaway session key.
    pub fn test_app(
        state: HttpState,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .service(web::scope("/api/v1").wrap(session).configure(api_services))
    }

    /// `POST /api/v1/signup` for `email` with [`TEST_PASSWORD`].
    pub fn signup_request(email: &str) -> TestRequest {
        TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.
    //!
    //! Provides utilities for extracting and inspecting utoipa `Schema` types,
    //! particularly for resolving `RefOr<Schema>` wrappers to concrete `Object`
    //! schemas with diagnostic error messages on type mismatches.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with a diagnostic if not an Object.
    ///
    /// Provides detailed error messages for refs, combinators, and other schema types.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => {
                panic!(
                    "schema '{name}' is a $ref to '{}'; resolve the reference first",
                    reference.ref_location
                );
            }
            RefOr::T(Schema::AllOf(_)) => {
                panic!("schema '{name}' is an AllOf combinator; inspect composed schemas");
            }
            RefOr::T(Schema::OneOf(_)) => {
                panic!("schema '{name}' is a OneOf combinator; inspect variant schemas");
            }
            RefOr::T(Schema::AnyOf(_)) => {
                panic!("schema '{name}' is an AnyOf combinator; inspect variant schemas");
            }
            RefOr::T(Schema::Array(_)) => {
                panic!("schema '{name}' is an Array, not an Object");
            }
            _ => panic!("schema '{name}' has unexpected type"),
        }
    }

    /// Get a property from an Object schema by name.
    ///
    /// Panics if the property does not exist.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
