//! Driving port for the signed-in user's profile.

use async_trait::async_trait;

use crate::domain::{CurrentUser, Error, ProfilePatch, UserId, UserProfile};

/// Raw avatar upload as received by an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    /// Client file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Profile use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Fetch the profile, creating defaults on first access.
    async fn get_or_create(&self, user: &CurrentUser) -> Result<UserProfile, Error>;

    /// Apply edits and return the stored profile.
    async fn update(&self, user: &UserId, patch: ProfilePatch) -> Result<UserProfile, Error>;

    /// Store an avatar and return its public URL.
    async fn upload_avatar(&self, user: &UserId, file: AvatarFile) -> Result<String, Error>;
}
