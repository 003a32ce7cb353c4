//! Tests for the listing service.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockInterestRepository, MockListingRepository, MockUserProfileRepository,
};
use crate::domain::{BadgeTone, ErrorCode, ListingStatus, Role, UserProfile};
use crate::test_support::MutableClock;

type Service =
    ListingService<MockListingRepository, MockInterestRepository, MockUserProfileRepository>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn posting(owner: &UserId, created: DateTime<Utc>) -> Posting {
    Posting::publish(
        Uuid::new_v4(),
        owner.clone(),
        PostingDraft {
            title: "Morning hatha instructor".to_owned(),
            location: "Seoul Mapo-gu".to_owned(),
            category: "Hatha".to_owned(),
            ..PostingDraft::default()
        },
        created,
    )
    .expect("valid posting")
}

fn make_service(
    listings: MockListingRepository,
    interests: MockInterestRepository,
    profiles: MockUserProfileRepository,
    now: DateTime<Utc>,
) -> Service {
    ListingService::new(
        Arc::new(listings),
        Arc::new(interests),
        Arc::new(profiles),
        Arc::new(MutableClock::new(now)),
    )
}

fn repo_returning(listing: Listing) -> MockListingRepository {
    let mut repo = MockListingRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(listing)));
    repo
}

#[rstest]
#[tokio::test]
async fn close_persists_closed_state_for_owner(now: DateTime<Utc>) {
    let owner = UserId::random();
    let posting = posting(&owner, now - Duration::days(2));
    let target = ListingTarget::Posting(posting.id);
    let mut listings = repo_returning(Listing::Posting(posting));
    listings
        .expect_update_lifecycle()
        .withf(move |t, lifecycle| {
            *t == target
                && lifecycle.status() == ListingStatus::Closed
                && lifecycle.closed_at() == Some(now)
        })
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let view = service.close(&owner, target).await.expect("close succeeds");

    assert_eq!(view.badge.label, "closed");
    assert_eq!(view.badge.tone, BadgeTone::Red);
}

#[rstest]
#[tokio::test]
async fn reopen_starts_a_fresh_window(now: DateTime<Utc>) {
    let owner = UserId::random();
    let mut posting = posting(&owner, now - Duration::days(60));
    posting.lifecycle = posting.lifecycle.close(now - Duration::days(40));
    let target = ListingTarget::Posting(posting.id);
    let mut listings = repo_returning(Listing::Posting(posting));
    listings
        .expect_update_lifecycle()
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let view = service.reopen(&owner, target).await.expect("reopen succeeds");

    let lifecycle = view.listing.lifecycle();
    assert_eq!(lifecycle.status(), ListingStatus::Active);
    assert_eq!(lifecycle.closed_at(), None);
    assert_eq!(lifecycle.expires_at(), Some(now + Duration::days(30)));
    assert_eq!(view.badge.label, "active (30 days remaining)");
}

#[rstest]
#[tokio::test]
async fn extend_resets_from_now(now: DateTime<Utc>) {
    let owner = UserId::random();
    let posting = posting(&owner, now);
    let target = ListingTarget::Posting(posting.id);
    let mut listings = repo_returning(Listing::Posting(posting));
    listings
        .expect_update_lifecycle()
        .times(1)
        .return_once(|_, _| Ok(true));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let days = ExtensionDays::new(7).expect("valid days");
    let view = service
        .extend(&owner, target, days)
        .await
        .expect("extend succeeds");

    assert_eq!(
        view.listing.lifecycle().expires_at(),
        Some(now + Duration::days(7))
    );
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_close(now: DateTime<Utc>) {
    let posting = posting(&UserId::random(), now);
    let target = ListingTarget::Posting(posting.id);
    let listings = repo_returning(Listing::Posting(posting));
    let mut profiles = MockUserProfileRepository::new();
    profiles.expect_find().times(1).return_once(|_| Ok(None));

    let service = make_service(listings, MockInterestRepository::new(), profiles, now);
    let error = service
        .close(&UserId::random(), target)
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn admins_can_delete_any_listing(now: DateTime<Utc>) {
    let admin = UserId::random();
    let posting = posting(&UserId::random(), now);
    let target = ListingTarget::Posting(posting.id);
    let mut listings = repo_returning(Listing::Posting(posting));
    listings
        .expect_delete()
        .withf(move |t| *t == target)
        .times(1)
        .return_once(|_| Ok(true));
    let mut profiles = MockUserProfileRepository::new();
    let admin_profile = UserProfile {
        role: Role::Admin,
        ..UserProfile::new_default(admin.clone(), "admin@example.com", now)
    };
    profiles
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(admin_profile)));

    let service = make_service(listings, MockInterestRepository::new(), profiles, now);
    service.delete(&admin, target).await.expect("admin delete");
}

#[rstest]
#[tokio::test]
async fn missing_listing_is_not_found(now: DateTime<Utc>) {
    let mut listings = MockListingRepository::new();
    listings.expect_find().times(1).return_once(|_| Ok(None));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let error = service
        .reopen(&UserId::random(), ListingTarget::Candidate(Uuid::new_v4()))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn vanished_row_during_update_is_not_found(now: DateTime<Utc>) {
    let owner = UserId::random();
    let posting = posting(&owner, now);
    let target = ListingTarget::Posting(posting.id);
    let mut listings = repo_returning(Listing::Posting(posting));
    listings
        .expect_update_lifecycle()
        .times(1)
        .return_once(|_, _| Ok(false));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let error = service.close(&owner, target).await.expect_err("not found");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_fields_before_storage(now: DateTime<Utc>) {
    let service = make_service(
        MockListingRepository::new(),
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let error = service
        .create_posting(&UserId::random(), PostingDraft::default())
        .await
        .expect_err("invalid draft");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("field")),
        Some(&json!("title"))
    );
}

#[rstest]
#[tokio::test]
async fn create_candidate_opens_for_thirty_days(now: DateTime<Utc>) {
    let mut listings = MockListingRepository::new();
    listings
        .expect_insert_candidate()
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let draft = CandidateDraft {
        name: "Park Ji-min".to_owned(),
        location: "Incheon".to_owned(),
        styles: vec!["Ashtanga".to_owned()],
        introduction: "Ten years of teaching.".to_owned(),
        ..CandidateDraft::default()
    };

    let view = service
        .create_candidate(&UserId::random(), draft)
        .await
        .expect("created");

    assert_eq!(view.listing.kind(), ListingKind::Candidate);
    assert_eq!(view.badge.label, "active (30 days remaining)");
}

#[rstest]
#[tokio::test]
async fn detail_includes_interest_count(now: DateTime<Utc>) {
    let posting = posting(&UserId::random(), now);
    let target = ListingTarget::Posting(posting.id);
    let listings = repo_returning(Listing::Posting(posting));
    let mut interests = MockInterestRepository::new();
    interests
        .expect_count_for()
        .withf(move |t| *t == target)
        .times(1)
        .return_once(|_| Ok(3));

    let service = make_service(listings, interests, MockUserProfileRepository::new(), now);
    let detail = service.get(target).await.expect("detail");

    assert_eq!(detail.interest_count, 3);
}

#[rstest]
#[tokio::test]
async fn list_open_filters_at_the_current_time(now: DateTime<Utc>) {
    let mut listings = MockListingRepository::new();
    listings
        .expect_list_open()
        .withf(move |kind, at| *kind == ListingKind::Posting && *at == now)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let views = service
        .list_open(ListingKind::Posting, ListingFilter::default())
        .await
        .expect("list open");
    assert!(views.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_open_applies_the_search_filter(now: DateTime<Utc>) {
    let owner = UserId::random();
    let hatha = posting(&owner, now - Duration::days(1));
    let mut vinyasa = posting(&owner, now - Duration::days(2));
    vinyasa.title = "Evening vinyasa flow".to_owned();
    vinyasa.location = "Busan".to_owned();
    vinyasa.category = "Vinyasa".to_owned();
    let vinyasa_id = vinyasa.id;
    let mut listings = MockListingRepository::new();
    listings.expect_list_open().times(1).return_once(move |_, _| {
        Ok(vec![Listing::Posting(hatha), Listing::Posting(vinyasa)])
    });

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let views = service
        .list_open(
            ListingKind::Posting,
            ListingFilter::new(Some("busan".to_owned()), Some("vinyasa".to_owned())),
        )
        .await
        .expect("list open");

    assert_eq!(views.len(), 1);
    assert_eq!(views.first().map(|v| v.listing.id()), Some(vinyasa_id));
}

#[rstest]
#[tokio::test]
async fn connection_failures_are_service_unavailable(now: DateTime<Utc>) {
    let mut listings = MockListingRepository::new();
    listings
        .expect_list_by_owner()
        .times(1)
        .return_once(|_, _| Err(crate::domain::ports::ListingRepositoryError::connection("down")));

    let service = make_service(
        listings,
        MockInterestRepository::new(),
        MockUserProfileRepository::new(),
        now,
    );
    let error = service
        .list_owned(&UserId::random(), ListingKind::Candidate)
        .await
        .expect_err("unavailable");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
