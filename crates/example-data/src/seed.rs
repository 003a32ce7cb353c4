//! Generated posting seed types.
//!
//! These types are independent of backend domain types so the crate can be
//! used without pulling in the web stack.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated example job posting.
///
/// Carries the free-text fields a posting needs. Lifecycle fields such as
/// status and expiry are decided by the backend when the seed is stored.
///
/// # Example
///
/// ```
/// use example_data::ExamplePostingSeed;
/// use uuid::Uuid;
///
/// let posting = ExamplePostingSeed {
///     id: Uuid::new_v4(),
///     title: "Hatha yoga beginner class instructor".to_owned(),
///     location: "Seoul Seocho-gu".to_owned(),
///     style: "Hatha".to_owned(),
///     experience: "Any".to_owned(),
///     compensation: "Hourly 30-40k KRW".to_owned(),
///     description: "Friendly studio.".to_owned(),
/// };
///
/// assert_eq!(posting.style, "Hatha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePostingSeed {
    /// Unique identifier for the posting.
    pub id: Uuid,
    /// Headline shown in listings.
    pub title: String,
    /// Free-text location.
    pub location: String,
    /// Yoga style, used as the posting category.
    pub style: String,
    /// Required experience.
    pub experience: String,
    /// Compensation text.
    pub compensation: String,
    /// Body text.
    pub description: String,
}
