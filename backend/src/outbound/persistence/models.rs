//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations. Conversions back into domain
//! types report a plain message; each repository wraps it in its own
//! `Corrupt` variant.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    BookmarkRecord, CandidateProfile, InterestRecord, Lifecycle, ListingStatus, ListingTarget,
    Notification, NotificationKind, PasswordDigest, Posting, Role, UserId, UserProfile,
};

use super::schema::{
    accounts, bookmarks, candidates, example_data_runs, interests, notifications, postings,
    profiles,
};

fn lifecycle_from_columns(
    status: &str,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<Lifecycle, String> {
    let status: ListingStatus = status.parse().map_err(|err| format!("{err}"))?;
    Lifecycle::try_new(status, created_at, closed_at, expires_at).map_err(|err| err.to_string())
}

fn target_from_columns(
    posting_id: Option<Uuid>,
    candidate_id: Option<Uuid>,
) -> Result<ListingTarget, String> {
    ListingTarget::from_columns(posting_id, candidate_id)
        .ok_or_else(|| "record must reference exactly one listing".to_owned())
}

// ---------------------------------------------------------------------------
// Account and profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl AccountRow {
    pub(crate) fn into_parts(self) -> (UserId, String, PasswordDigest) {
        (
            UserId::from_uuid(self.id),
            self.email,
            PasswordDigest::from_phc(self.password_hash),
        )
    }
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub display_name: String,
    pub phone: String,
    pub avatar_url: Option<String>,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = String;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|_| format!("unknown role '{}'", row.role))?;
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            role,
            display_name: row.display_name,
            phone: row.phone,
            avatar_url: row.avatar_url,
            email_notifications: row.email_notifications,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable and changeset struct for profile records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileValues<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub role: &'a str,
    pub display_name: &'a str,
    pub phone: &'a str,
    pub avatar_url: Option<&'a str>,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a UserProfile> for ProfileValues<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            email: profile.email.as_str(),
            role: profile.role.as_str(),
            display_name: profile.display_name.as_str(),
            phone: profile.phone.as_str(),
            avatar_url: profile.avatar_url.as_deref(),
            email_notifications: profile.email_notifications,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing models
// ---------------------------------------------------------------------------

/// Row struct for reading from the postings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = postings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostingRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub location: String,
    pub category: String,
    pub experience: Option<String>,
    pub compensation: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<PostingRow> for Posting {
    type Error = String;

    fn try_from(row: PostingRow) -> Result<Self, Self::Error> {
        let lifecycle =
            lifecycle_from_columns(&row.status, row.created_at, row.closed_at, row.expires_at)?;
        Ok(Self {
            id: row.id,
            owner: UserId::from_uuid(row.owner_id),
            title: row.title,
            location: row.location,
            category: row.category,
            experience: row.experience,
            compensation: row.compensation,
            description: row.description,
            lifecycle,
        })
    }
}

/// Insertable struct for posting records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = postings)]
pub(crate) struct NewPostingRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub location: &'a str,
    pub category: &'a str,
    pub experience: Option<&'a str>,
    pub compensation: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Posting> for NewPostingRow<'a> {
    fn from(posting: &'a Posting) -> Self {
        Self {
            id: posting.id,
            owner_id: *posting.owner.as_uuid(),
            title: posting.title.as_str(),
            location: posting.location.as_str(),
            category: posting.category.as_str(),
            experience: posting.experience.as_deref(),
            compensation: posting.compensation.as_deref(),
            description: posting.description.as_deref(),
            status: posting.lifecycle.status().as_str(),
            created_at: posting.lifecycle.created_at(),
            closed_at: posting.lifecycle.closed_at(),
            expires_at: posting.lifecycle.expires_at(),
        }
    }
}

/// Row struct for reading from the candidates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub styles: Vec<String>,
    pub experience_level: Option<String>,
    pub certifications: Option<String>,
    pub photo_url: Option<String>,
    pub introduction: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<CandidateRow> for CandidateProfile {
    type Error = String;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let lifecycle =
            lifecycle_from_columns(&row.status, row.created_at, row.closed_at, row.expires_at)?;
        Ok(Self {
            id: row.id,
            owner: UserId::from_uuid(row.owner_id),
            name: row.name,
            location: row.location,
            styles: row.styles,
            experience_level: row.experience_level,
            certifications: row.certifications,
            photo_url: row.photo_url,
            introduction: row.introduction,
            lifecycle,
        })
    }
}

/// Insertable struct for candidate records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub location: &'a str,
    pub styles: &'a [String],
    pub experience_level: Option<&'a str>,
    pub certifications: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub introduction: &'a str,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a CandidateProfile> for NewCandidateRow<'a> {
    fn from(candidate: &'a CandidateProfile) -> Self {
        Self {
            id: candidate.id,
            owner_id: *candidate.owner.as_uuid(),
            name: candidate.name.as_str(),
            location: candidate.location.as_str(),
            styles: candidate.styles.as_slice(),
            experience_level: candidate.experience_level.as_deref(),
            certifications: candidate.certifications.as_deref(),
            photo_url: candidate.photo_url.as_deref(),
            introduction: candidate.introduction.as_str(),
            status: candidate.lifecycle.status().as_str(),
            created_at: candidate.lifecycle.created_at(),
            closed_at: candidate.lifecycle.closed_at(),
            expires_at: candidate.lifecycle.expires_at(),
        }
    }
}

/// Lifecycle columns shared by both listing tables.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = postings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostingLifecycleUpdate {
    pub status: &'static str,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Lifecycle changeset for the candidates table.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = candidates)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CandidateLifecycleUpdate {
    pub status: &'static str,
    pub closed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Lifecycle> for PostingLifecycleUpdate {
    fn from(lifecycle: &Lifecycle) -> Self {
        Self {
            status: lifecycle.status().as_str(),
            closed_at: lifecycle.closed_at(),
            expires_at: lifecycle.expires_at(),
        }
    }
}

impl From<&Lifecycle> for CandidateLifecycleUpdate {
    fn from(lifecycle: &Lifecycle) -> Self {
        Self {
            status: lifecycle.status().as_str(),
            closed_at: lifecycle.closed_at(),
            expires_at: lifecycle.expires_at(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger models
// ---------------------------------------------------------------------------

/// Row struct for reading from the interests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InterestRow {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub posting_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InterestRow> for InterestRecord {
    type Error = String;

    fn try_from(row: InterestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            actor: UserId::from_uuid(row.actor_id),
            target: target_from_columns(row.posting_id, row.candidate_id)?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for interest records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = interests)]
pub(crate) struct NewInterestRow<'a> {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub posting_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub message: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a InterestRecord> for NewInterestRow<'a> {
    fn from(record: &'a InterestRecord) -> Self {
        let (posting_id, candidate_id) = record.target.into_columns();
        Self {
            id: record.id,
            actor_id: *record.actor.as_uuid(),
            posting_id,
            candidate_id,
            message: record.message.as_deref(),
            created_at: record.created_at,
        }
    }
}

/// Row struct for reading from the bookmarks table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookmarkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub posting_id: Option<Uuid>,
    pub candidate_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookmarkRow> for BookmarkRecord {
    type Error = String;

    fn try_from(row: BookmarkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user: UserId::from_uuid(row.user_id),
            target: target_from_columns(row.posting_id, row.candidate_id)?,
            created_at: row.created_at,
        })
    }
}

impl From<&BookmarkRecord> for BookmarkRow {
    fn from(record: &BookmarkRecord) -> Self {
        let (posting_id, candidate_id) = record.target.into_columns();
        Self {
            id: record.id,
            user_id: *record.user.as_uuid(),
            posting_id,
            candidate_id,
            created_at: record.created_at,
        }
    }
}

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: String,
    pub related_item_id: Uuid,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = String;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&row.kind)
            .ok_or_else(|| format!("unknown notification kind '{}'", row.kind))?;
        Ok(Self {
            id: row.id,
            recipient: UserId::from_uuid(row.recipient_id),
            kind,
            related_item_id: row.related_item_id,
            title: row.title,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

/// Insertable struct for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: &'static str,
    pub related_item_id: Uuid,
    pub title: &'a str,
    pub message: &'a str,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Notification> for NewNotificationRow<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            id: notification.id,
            recipient_id: *notification.recipient.as_uuid(),
            kind: notification.kind.as_str(),
            related_item_id: notification.related_item_id,
            title: notification.title.as_str(),
            message: notification.message.as_str(),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Example data models
// ---------------------------------------------------------------------------

/// Insertable struct for example data seed run records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = example_data_runs)]
pub(crate) struct NewExampleDataRunRow<'a> {
    pub seed_key: &'a str,
    pub posting_count: i32,
    pub seed: i64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversions.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn posting_row(status: &str, closed_at: Option<DateTime<Utc>>) -> PostingRow {
        PostingRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Ashtanga mornings".to_owned(),
            location: "Busan".to_owned(),
            category: "Ashtanga".to_owned(),
            experience: None,
            compensation: Some("Negotiable".to_owned()),
            description: None,
            status: status.to_owned(),
            created_at: at(9),
            closed_at,
            expires_at: Some(at(10)),
        }
    }

    #[rstest]
    fn closed_posting_row_converts() {
        let posting = Posting::try_from(posting_row("closed", Some(at(11)))).expect("valid row");
        assert_eq!(posting.lifecycle.status(), ListingStatus::Closed);
        assert_eq!(posting.lifecycle.closed_at(), Some(at(11)));
    }

    #[rstest]
    #[case::unknown_status("paused", None)]
    #[case::closed_without_timestamp("closed", None)]
    #[case::active_with_timestamp("active", Some(at(11)))]
    fn inconsistent_posting_rows_are_rejected(
        #[case] status: &str,
        #[case] closed_at: Option<DateTime<Utc>>,
    ) {
        assert!(Posting::try_from(posting_row(status, closed_at)).is_err());
    }

    #[rstest]
    #[case::both(Some(Uuid::nil()), Some(Uuid::nil()))]
    #[case::neither(None, None)]
    fn interest_rows_need_exactly_one_target(
        #[case] posting_id: Option<Uuid>,
        #[case] candidate_id: Option<Uuid>,
    ) {
        let row = InterestRow {
            id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
            posting_id,
            candidate_id,
            message: None,
            created_at: at(9),
        };
        assert!(InterestRecord::try_from(row).is_err());
    }

    #[rstest]
    fn bookmark_row_round_trips_target() {
        let record = BookmarkRecord {
            id: Uuid::new_v4(),
            user: UserId::random(),
            target: ListingTarget::Candidate(Uuid::new_v4()),
            created_at: at(9),
        };
        let restored = BookmarkRecord::try_from(BookmarkRow::from(&record)).expect("valid row");
        assert_eq!(restored, record);
    }

    #[rstest]
    fn unknown_notification_kind_is_rejected() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            kind: "digest".to_owned(),
            related_item_id: Uuid::new_v4(),
            title: "t".to_owned(),
            message: "m".to_owned(),
            read: false,
            created_at: at(9),
        };
        assert!(Notification::try_from(row).is_err());
    }
}
