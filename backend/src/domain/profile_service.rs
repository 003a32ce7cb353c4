//! Profile domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AvatarFile, BlobStorage, BlobStorageError, ProfileCommand, UserProfileRepository,
    UserProfileRepositoryError,
};
use crate::domain::repository_errors::map_profile_error;
use crate::domain::{
    AvatarUpload, AvatarValidationError, CurrentUser, Error, ProfilePatch, UserId, UserProfile,
};

/// Profile service implementing [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<P, B> {
    profiles: Arc<P>,
    blobs: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<P, B> ProfileService<P, B> {
    /// Create a new service.
    pub fn new(profiles: Arc<P>, blobs: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            blobs,
            clock,
        }
    }
}

fn avatar_error(error: AvatarValidationError) -> Error {
    let code = match error {
        AvatarValidationError::Empty => "empty_file",
        AvatarValidationError::TooLarge { .. } => "file_too_large",
        AvatarValidationError::NotAnImage { .. } => "not_an_image",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": "avatar", "code": code }))
}

fn blob_error(error: BlobStorageError) -> Error {
    match error {
        BlobStorageError::InvalidPath { path } => {
            Error::internal(format!("avatar path rejected: {path}"))
        }
        BlobStorageError::Io { message } => {
            Error::service_unavailable(format!("avatar upload failed: {message}"))
        }
    }
}

impl<P, B> ProfileService<P, B>
where
    P: UserProfileRepository,
    B: BlobStorage,
{
    async fn require_profile(&self, user: &UserId) -> Result<UserProfile, Error> {
        self.profiles
            .find(user)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("profile not found"))
    }
}

#[async_trait]
impl<P, B> ProfileCommand for ProfileService<P, B>
where
    P: UserProfileRepository,
    B: BlobStorage,
{
    async fn get_or_create(&self, user: &CurrentUser) -> Result<UserProfile, Error> {
        if let Some(profile) = self
            .profiles
            .find(&user.id)
            .await
            .map_err(map_profile_error)?
        {
            return Ok(profile);
        }

        let profile = UserProfile::new_default(user.id.clone(), &user.email, self.clock.utc());
        match self.profiles.insert(&profile).await {
            Ok(()) => {
                info!(user_id = %user.id, "profile created");
                Ok(profile)
            }
            // Another request created it first.
            Err(UserProfileRepositoryError::Duplicate { .. }) => {
                self.require_profile(&user.id).await
            }
            Err(error) => Err(map_profile_error(error)),
        }
    }

    async fn update(&self, user: &UserId, patch: ProfilePatch) -> Result<UserProfile, Error> {
        let updated = self
            .require_profile(user)
            .await?
            .apply(patch, self.clock.utc());
        let stored = self
            .profiles
            .update(&updated)
            .await
            .map_err(map_profile_error)?;
        if !stored {
            return Err(Error::not_found("profile not found"));
        }
        Ok(updated)
    }

    async fn upload_avatar(&self, user: &UserId, file: AvatarFile) -> Result<String, Error> {
        let AvatarFile {
            file_name,
            content_type,
            bytes,
        } = file;
        let upload = AvatarUpload::try_new(user, &file_name, &content_type, bytes, self.clock.utc())
            .map_err(avatar_error)?;
        self.blobs
            .upload(upload.path(), upload.content_type(), upload.bytes())
            .await
            .map_err(blob_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, MAX_AVATAR_BYTES, Role};
    use crate::domain::ports::{MockBlobStorage, MockUserProfileRepository};
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn service(
        profiles: MockUserProfileRepository,
        blobs: MockBlobStorage,
    ) -> ProfileService<MockUserProfileRepository, MockBlobStorage> {
        let now = Utc
            .with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        ProfileService::new(Arc::new(profiles), Arc::new(blobs), Arc::new(MutableClock::new(now)))
    }

    fn current_user() -> CurrentUser {
        CurrentUser {
            id: UserId::random(),
            email: "teacher@example.com".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn first_access_creates_default_profile() {
        let user = current_user();
        let mut profiles = MockUserProfileRepository::new();
        profiles.expect_find().times(1).return_once(|_| Ok(None));
        profiles
            .expect_insert()
            .withf(|p| p.role == Role::User && p.email_notifications)
            .times(1)
            .return_once(|_| Ok(()));

        let profile = service(profiles, MockBlobStorage::new())
            .get_or_create(&user)
            .await
            .expect("profile");
        assert_eq!(profile.email, "teacher@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_creation_reads_the_winner() {
        let user = current_user();
        let existing = UserProfile::new_default(user.id.clone(), &user.email, Utc::now());
        let mut profiles = MockUserProfileRepository::new();
        let mut sequence = mockall::Sequence::new();
        profiles
            .expect_find()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(None));
        profiles
            .expect_insert()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Err(UserProfileRepositoryError::duplicate("profiles_pkey")));
        profiles
            .expect_find()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(move |_| Ok(Some(existing)));

        service(profiles, MockBlobStorage::new())
            .get_or_create(&user)
            .await
            .expect("existing profile");
    }

    #[rstest]
    #[tokio::test]
    async fn update_stamps_updated_at() {
        let user = current_user();
        let existing = UserProfile::new_default(user.id.clone(), &user.email, Utc::now());
        let mut profiles = MockUserProfileRepository::new();
        profiles
            .expect_find()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        profiles
            .expect_update()
            .withf(|p| p.phone == "010-1234-5678")
            .times(1)
            .return_once(|_| Ok(true));

        let patch = ProfilePatch {
            phone: Some("010-1234-5678".to_owned()),
            ..ProfilePatch::default()
        };
        let profile = service(profiles, MockBlobStorage::new())
            .update(&user.id, patch)
            .await
            .expect("updated");
        assert_eq!(
            profile.updated_at,
            Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).single().expect("ts")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn avatar_upload_returns_public_url() {
        let user = UserId::random();
        let expected_prefix = format!("avatars/{user}-");
        let mut blobs = MockBlobStorage::new();
        blobs
            .expect_upload()
            .withf(move |path, content_type, bytes| {
                path.starts_with(&expected_prefix)
                    && path.ends_with(".png")
                    && content_type == "image/png"
                    && bytes.len() == 4
            })
            .times(1)
            .return_once(|path, _, _| Ok(format!("https://media.example/{path}")));

        let url = service(MockUserProfileRepository::new(), blobs)
            .upload_avatar(
                &user,
                AvatarFile {
                    file_name: "me.png".to_owned(),
                    content_type: "image/png".to_owned(),
                    bytes: vec![0x89, 0x50, 0x4e, 0x47],
                },
            )
            .await
            .expect("uploaded");
        assert!(url.starts_with("https://media.example/avatars/"));
    }

    #[rstest]
    #[tokio::test]
    async fn oversized_avatar_is_rejected_before_upload() {
        let mut blobs = MockBlobStorage::new();
        blobs.expect_upload().never();

        let error = service(MockUserProfileRepository::new(), blobs)
            .upload_avatar(
                &UserId::random(),
                AvatarFile {
                    file_name: "big.png".to_owned(),
                    content_type: "image/png".to_owned(),
                    bytes: vec![0; MAX_AVATAR_BYTES + 1],
                },
            )
            .await
            .expect_err("too large");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
