//! User profiles: contact details, role and notification preference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Role, UserId};

/// Largest accepted avatar upload.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
/// Key prefix for stored avatars.
pub const AVATAR_PREFIX: &str = "avatars";

/// Profile row keyed by the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity.
    #[schema(value_type = String)]
    pub id: UserId,
    /// Sign-in email.
    pub email: String,
    /// Authorisation role.
    pub role: Role,
    /// Display name; empty until set.
    pub display_name: String,
    /// Contact phone; empty until set.
    pub phone: String,
    /// Public avatar URL.
    pub avatar_url: Option<String>,
    /// Whether email alerts are wanted.
    pub email_notifications: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Defaults for a first sign-in: role `user`, notifications on.
    pub fn new_default(id: UserId, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: email.into(),
            role: Role::User,
            display_name: String::new(),
            phone: String::new(),
            avatar_url: None,
            email_notifications: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch, stamping `updated_at`.
    pub fn apply(self, patch: ProfilePatch, now: DateTime<Utc>) -> Self {
        let ProfilePatch {
            display_name,
            phone,
            avatar_url,
            email_notifications,
        } = patch;
        Self {
            display_name: display_name.map_or(self.display_name, |v| v.trim().to_owned()),
            phone: phone.map_or(self.phone, |v| v.trim().to_owned()),
            avatar_url: match avatar_url {
                Some(url) if url.trim().is_empty() => None,
                Some(url) => Some(url.trim().to_owned()),
                None => self.avatar_url,
            },
            email_notifications: email_notifications.unwrap_or(self.email_notifications),
            updated_at: now,
            ..self
        }
    }
}

/// Editable profile fields; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    /// New display name.
    pub display_name: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New avatar URL; blank clears it.
    pub avatar_url: Option<String>,
    /// New email preference.
    pub email_notifications: Option<bool>,
}

/// Reasons an avatar upload is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvatarValidationError {
    /// The file was empty.
    #[error("avatar file is empty")]
    Empty,
    /// The file exceeded [`MAX_AVATAR_BYTES`].
    #[error("avatar must be at most {max} bytes, got {actual}")]
    TooLarge {
        /// Size limit.
        max: usize,
        /// Uploaded size.
        actual: usize,
    },
    /// The content type was not `image/*`.
    #[error("avatar must be an image, got '{content_type}'")]
    NotAnImage {
        /// Declared content type.
        content_type: String,
    },
}

/// A validated avatar ready for blob storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    path: String,
    content_type: String,
    bytes: Vec<u8>,
}

fn is_extension(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

impl AvatarUpload {
    /// Validate an upload and derive its storage path
    /// `avatars/{user}-{millis}.{ext}`.
    ///
    /// The extension comes from the file name, falling back to the image
    /// subtype of the content type. Content type parameters are dropped and
    /// the subtype must be plain ASCII alphanumerics, ignoring a `+suffix`.
    pub fn try_new(
        user: &UserId,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Result<Self, AvatarValidationError> {
        if bytes.is_empty() {
            return Err(AvatarValidationError::Empty);
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AvatarValidationError::TooLarge {
                max: MAX_AVATAR_BYTES,
                actual: bytes.len(),
            });
        }
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let Some(subtype) = essence
            .strip_prefix("image/")
            .and_then(|rest| rest.split('+').next())
            .filter(|s| is_extension(s))
        else {
            return Err(AvatarValidationError::NotAnImage {
                content_type: content_type.to_owned(),
            });
        };
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| is_extension(ext))
            .unwrap_or(subtype)
            .to_ascii_lowercase();
        let path = format!(
            "{AVATAR_PREFIX}/{user}-{millis}.{extension}",
            millis = now.timestamp_millis()
        );
        Ok(Self {
            path,
            content_type: essence,
            bytes,
        })
    }

    /// Storage key.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_760_000_000_123)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn defaults_enable_notifications(now: DateTime<Utc>) {
        let profile = UserProfile::new_default(UserId::random(), "a@b.c", now);
        assert_eq!(profile.role, Role::User);
        assert!(profile.email_notifications);
        assert!(profile.display_name.is_empty());
    }

    #[rstest]
    fn patch_updates_only_given_fields(now: DateTime<Utc>) {
        let profile = UserProfile::new_default(UserId::random(), "a@b.c", now);
        let later = now + chrono::Duration::minutes(5);
        let patched = profile.clone().apply(
            ProfilePatch {
                display_name: Some(" Mina ".to_owned()),
                email_notifications: Some(false),
                ..ProfilePatch::default()
            },
            later,
        );

        assert_eq!(patched.display_name, "Mina");
        assert_eq!(patched.phone, profile.phone);
        assert!(!patched.email_notifications);
        assert_eq!(patched.updated_at, later);
        assert_eq!(patched.created_at, now);
    }

    #[rstest]
    fn blank_avatar_url_clears_it(now: DateTime<Utc>) {
        let mut profile = UserProfile::new_default(UserId::random(), "a@b.c", now);
        profile.avatar_url = Some("https://cdn/x.png".to_owned());
        let patched = profile.apply(
            ProfilePatch {
                avatar_url: Some(String::new()),
                ..ProfilePatch::default()
            },
            now,
        );
        assert_eq!(patched.avatar_url, None);
    }

    #[rstest]
    fn avatar_path_uses_user_and_millis(now: DateTime<Utc>) {
        let user = UserId::random();
        let upload = AvatarUpload::try_new(&user, "Me.JPG", "image/jpeg", vec![1, 2, 3], now)
            .expect("valid avatar");
        assert_eq!(
            upload.path(),
            format!("avatars/{user}-1760000000123.jpg")
        );
    }

    #[rstest]
    fn avatar_extension_falls_back_to_subtype(now: DateTime<Utc>) {
        let upload = AvatarUpload::try_new(&UserId::random(), "blob", "image/webp", vec![1], now)
            .expect("valid avatar");
        assert!(upload.path().ends_with(".webp"));
    }

    #[rstest]
    #[case("image/png; charset=binary", ".png", "image/png")]
    #[case(" IMAGE/PNG ", ".png", "image/png")]
    #[case("image/svg+xml", ".svg", "image/svg+xml")]
    fn content_type_parameters_are_dropped(
        now: DateTime<Utc>,
        #[case] content_type: &str,
        #[case] suffix: &str,
        #[case] stored: &str,
    ) {
        let upload = AvatarUpload::try_new(&UserId::random(), "blob", content_type, vec![1], now)
            .expect("valid avatar");
        assert!(upload.path().ends_with(suffix), "{}", upload.path());
        assert_eq!(upload.content_type(), stored);
    }

    #[rstest]
    #[case("image/../x")]
    #[case("image/")]
    #[case("image/p n g")]
    #[case("image/;x=1")]
    fn malformed_image_subtypes_are_rejected(now: DateTime<Utc>, #[case] content_type: &str) {
        let result = AvatarUpload::try_new(&UserId::random(), "blob", content_type, vec![1], now);
        assert_eq!(
            result,
            Err(AvatarValidationError::NotAnImage {
                content_type: content_type.to_owned()
            })
        );
    }

    #[rstest]
    #[case::empty(Vec::new(), "image/png", AvatarValidationError::Empty)]
    #[case::too_large(
        vec![0; MAX_AVATAR_BYTES + 1],
        "image/png",
        AvatarValidationError::TooLarge { max: MAX_AVATAR_BYTES, actual: MAX_AVATAR_BYTES + 1 }
    )]
    #[case::not_image(
        vec![1],
        "application/pdf",
        AvatarValidationError::NotAnImage { content_type: "application/pdf".to_owned() }
    )]
    fn rejects_bad_avatars(
        now: DateTime<Utc>,
        #[case] bytes: Vec<u8>,
        #[case] content_type: &str,
        #[case] expected: AvatarValidationError,
    ) {
        let result = AvatarUpload::try_new(&UserId::random(), "a.png", content_type, bytes, now);
        assert_eq!(result, Err(expected));
    }
}
