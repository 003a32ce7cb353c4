//! Authentication primitives: login credentials and password digests.
//!
//! Inbound payloads are validated here before a handler reaches a port.
//! Passwords are kept in [`Zeroizing`] buffers and only ever compared through
//! Argon2id hashes stored as PHC strings.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

/// Minimum accepted password length at sign-up.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Domain error returned when login or sign-up values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email had no `@` separating local part and domain.
    #[error("email must contain '@'")]
    MalformedEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// The confirmation did not repeat the new password.
    #[error("password confirmation does not match")]
    PasswordMismatch,
}

fn check_length(password: &str) -> Result<(), LoginValidationError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(LoginValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }
    Ok(())
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased, and contains `@`.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use jobboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Studio@Example.com ", "password").unwrap();
/// assert_eq!(creds.email(), "studio@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    /// Returns [`LoginValidationError`] when either value is blank or the
    /// email is malformed.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(LoginValidationError::MalformedEmail),
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Credentials for a new account, which must also meet the length rule.
    ///
    /// # Errors
    /// As [`LoginCredentials::try_from_parts`], plus
    /// [`LoginValidationError::PasswordTooShort`].
    pub fn try_for_signup(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let credentials = Self::try_from_parts(email, password)?;
        check_length(password)?;
        Ok(credentials)
    }

    /// Normalised email used for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Replacement password for a signed-in account.
///
/// Holds the same length rule as sign-up and requires the caller to repeat
/// the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Validate a new password against its confirmation.
    ///
    /// # Errors
    /// [`LoginValidationError::EmptyPassword`],
    /// [`LoginValidationError::PasswordTooShort`] or
    /// [`LoginValidationError::PasswordMismatch`].
    pub fn try_new(password: &str, confirmation: &str) -> Result<Self, LoginValidationError> {
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        check_length(password)?;
        if password != confirmation {
            return Err(LoginValidationError::PasswordMismatch);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// The validated password.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Argon2id hash of a password in PHC string form.
///
/// The string carries algorithm, parameters and salt, so it is stored as a
/// single column and verified without any side data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

/// Hashing failed inside the password KDF.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashingError {
    message: String,
}

impl PasswordDigest {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Errors
    /// Returns [`PasswordHashingError`] when the KDF rejects its input.
    pub fn derive(password: &str) -> Result<Self, PasswordHashingError> {
        let to_error = |error: argon2::password_hash::Error| PasswordHashingError {
            message: error.to_string(),
        };
        let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes()).map_err(to_error)?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(to_error)?;
        Ok(Self(hash.to_string()))
    }

    /// Rebuild a digest from its stored PHC string.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for storage.
    pub fn as_phc(&self) -> &str {
        &self.0
    }

    /// Check `password` against this digest.
    ///
    /// A stored value that does not parse as a PHC string never verifies.
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("studio", "pw", LoginValidationError::MalformedEmail)]
    #[case("@example.com", "pw", LoginValidationError::MalformedEmail)]
    #[case("a@b.c", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn signup_enforces_minimum_length() {
        let err = LoginCredentials::try_for_signup("a@b.c", "short").expect_err("too short");
        assert_eq!(
            err,
            LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH
            }
        );
    }

    #[rstest]
    fn digest_verifies_only_the_original_password() {
        let digest = PasswordDigest::derive("correct horse").expect("hash");
        assert!(digest.verify("correct horse"));
        assert!(!digest.verify("correct horse "));
    }

    #[rstest]
    fn digests_are_salted_argon2id_phc_strings() {
        let first = PasswordDigest::derive("secret-pose").expect("hash");
        let second = PasswordDigest::derive("secret-pose").expect("hash");
        assert!(first.as_phc().starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(PasswordDigest::from_phc(second.as_phc()).verify("secret-pose"));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-phc-string")]
    fn malformed_stored_digests_never_verify(#[case] stored: &str) {
        assert!(!PasswordDigest::from_phc(stored).verify(stored));
    }

    #[rstest]
    #[case("", "", LoginValidationError::EmptyPassword)]
    #[case("short", "short", LoginValidationError::PasswordTooShort { min: PASSWORD_MIN_LENGTH })]
    #[case("warrior-two", "warrior-three", LoginValidationError::PasswordMismatch)]
    fn new_password_rules(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = NewPassword::try_new(password, confirmation).expect_err("rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn matching_new_password_is_accepted() {
        let password = NewPassword::try_new("warrior-two", "warrior-two").expect("valid");
        assert_eq!(password.as_str(), "warrior-two");
    }
}
