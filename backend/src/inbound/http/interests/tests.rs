//! Tests for application and contact handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{publish_candidate, publish_posting, sign_up};
use crate::test_support::http::{MemoryHarness, test_app};

#[actix_web::test]
async fn applying_records_once_and_notifies_the_owner() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let (studio, _) = sign_up(&app, "studio@example.com").await;
    let (teacher, teacher_id) = sign_up(&app, "teacher@example.com").await;
    let posting = publish_posting(&app, &studio, "Vinyasa lead").await;

    let apply = || {
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/postings/{posting}/applications"))
            .cookie(teacher.clone())
            .set_json(json!({"message": "  Keen to join  "}))
            .to_request()
    };
    let first = actix_test::call_service(&app, apply()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let record: Value = actix_test::read_body_json(first).await;
    assert_eq!(record["actor"], teacher_id.as_str());
    assert_eq!(record["target"]["kind"], "posting");
    assert_eq!(record["target"]["id"], posting.as_str());
    assert_eq!(record["message"], "Keen to join");

    let second = actix_test::call_service(&app, apply()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let inbox = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me/notifications")
            .cookie(studio.clone())
            .to_request(),
    )
    .await;
    let page: Value = actix_test::read_body_json(inbox).await;
    assert_eq!(page["unreadCount"], 1);
    assert_eq!(page["notifications"][0]["kind"], "application");
    assert_eq!(page["notifications"][0]["relatedItemId"], record["id"]);
    assert_ne!(page["notifications"][0]["relatedItemId"], posting.as_str());

    let received = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me/interests/received?kind=posting")
            .cookie(studio)
            .to_request(),
    )
    .await;
    let value: Value = actix_test::read_body_json(received).await;
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["listing"]["title"], "Vinyasa lead");
}

#[actix_web::test]
async fn owners_cannot_contact_their_own_profile() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let (owner, _) = sign_up(&app, "priya@example.com").await;
    let candidate = publish_candidate(&app, &owner, "Priya").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/candidates/{candidate}/contacts"))
            .cookie(owner)
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn status_reports_action_and_total() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let (owner, _) = sign_up(&app, "priya@example.com").await;
    let (studio, _) = sign_up(&app, "studio@example.com").await;
    let (other, _) = sign_up(&app, "other@example.com").await;
    let candidate = publish_candidate(&app, &owner, "Priya").await;

    let contact = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/candidates/{candidate}/contacts"))
            .cookie(studio.clone())
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(contact.status(), StatusCode::CREATED);

    for (cookie, expected) in [(studio, true), (other, false)] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!(
                    "/api/v1/me/interests/status?kind=candidate&id={candidate}"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["hasActed"], expected);
        assert_eq!(value["count"], 1);
    }
}

#[rstest]
#[case("/api/v1/me/interests", StatusCode::BAD_REQUEST)]
#[case("/api/v1/me/interests?kind=studio", StatusCode::BAD_REQUEST)]
#[case("/api/v1/me/interests?kind=candidate", StatusCode::OK)]
#[case("/api/v1/me/interests/status?kind=posting", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn kind_filter_is_validated(#[case] uri: &str, #[case] status: StatusCode) {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let (cookie, _) = sign_up(&app, "teacher@example.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn sent_applications_survive_listing_deletion() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let (studio, _) = sign_up(&app, "studio@example.com").await;
    let (teacher, _) = sign_up(&app, "teacher@example.com").await;
    let posting = publish_posting(&app, &studio, "Yin cover").await;

    actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/postings/{posting}/applications"))
            .cookie(teacher.clone())
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/postings/{posting}"))
            .cookie(studio)
            .to_request(),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me/interests?kind=posting")
            .cookie(teacher)
            .to_request(),
    )
    .await;
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert!(value[0]["listing"].is_null());
}
