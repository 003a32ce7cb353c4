//! End-to-end HTTP flows over the in-memory store.
//!
//! Each test signs users up through `/api/v1/signup`, then drives the
//! posting, interest, inbox, bookmark and overview endpoints with the
//! session cookies they receive.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use jobboard::test_support::http::{MemoryHarness, signup_request, test_app};
use rstest::rstest;
use serde_json::{Value, json};

async fn sign_up<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, signup_request(email).to_request()).await;
    assert_eq!(response.status(), StatusCode::CREATED, "signup for {email}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

async fn post_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn get_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    actix_test::read_body_json(response).await
}

async fn publish_posting<S>(app: &S, cookie: &Cookie<'static>) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post_json(
        app,
        cookie,
        "/api/v1/postings",
        json!({
            "title": "Saturday Ashtanga cover",
            "location": "Bristol",
            "category": "Ashtanga",
            "compensation": "£45 per class",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["listing"]["id"].as_str().expect("posting id").to_owned()
}

#[actix_web::test]
async fn application_reaches_the_owner_inbox() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let studio = sign_up(&app, "studio@example.com").await;
    let teacher = sign_up(&app, "teacher@example.com").await;
    let posting_id = publish_posting(&app, &studio).await;

    let applications = format!("/api/v1/postings/{posting_id}/applications");
    let applied = post_json(
        &app,
        &teacher,
        &applications,
        json!({ "message": "  Free most weekends.  " }),
    )
    .await;
    assert_eq!(applied.status(), StatusCode::CREATED);
    let record: Value = actix_test::read_body_json(applied).await;
    assert_eq!(record["message"], "Free most weekends.");

    let repeat = post_json(&app, &teacher, &applications, json!({})).await;
    assert_eq!(repeat.status(), StatusCode::CONFLICT);

    let status = get_json(
        &app,
        &teacher,
        &format!("/api/v1/me/interests/status?kind=posting&id={posting_id}"),
    )
    .await;
    assert_eq!(status["hasActed"], true);
    assert_eq!(status["count"], 1);

    let received = get_json(&app, &studio, "/api/v1/me/interests/received?kind=posting").await;
    assert_eq!(received.as_array().map(Vec::len), Some(1));
    assert_eq!(received[0]["listing"]["id"], posting_id.as_str());

    let inbox = get_json(&app, &studio, "/api/v1/me/notifications").await;
    assert_eq!(inbox["unreadCount"], 1);
    assert_eq!(inbox["badgeLabel"], "1");
    assert_eq!(inbox["notifications"][0]["kind"], "application");
    assert_eq!(inbox["notifications"][0]["relatedItemId"], record["id"]);

    let cleared = post_json(&app, &studio, "/api/v1/me/notifications/read-all", json!({})).await;
    assert_eq!(cleared.status(), StatusCode::OK);
    let cleared: Value = actix_test::read_body_json(cleared).await;
    assert_eq!(cleared["updated"], 1);

    let inbox = get_json(&app, &studio, "/api/v1/me/notifications").await;
    assert_eq!(inbox["unreadCount"], 0);
    assert_eq!(inbox["badgeLabel"], "");
}

#[actix_web::test]
async fn owners_cannot_apply_to_their_own_posting() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let studio = sign_up(&app, "studio@example.com").await;
    let posting_id = publish_posting(&app, &studio).await;

    let response = post_json(
        &app,
        &studio,
        &format!("/api/v1/postings/{posting_id}/applications"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let inbox = get_json(&app, &studio, "/api/v1/me/notifications").await;
    assert_eq!(inbox["unreadCount"], 0);
}

#[actix_web::test]
async fn bookmarks_toggle_and_feed_the_overview() {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let studio = sign_up(&app, "studio@example.com").await;
    let teacher = sign_up(&app, "teacher@example.com").await;
    let posting_id = publish_posting(&app, &studio).await;
    let target = json!({ "kind": "posting", "id": posting_id });

    let added = post_json(&app, &teacher, "/api/v1/bookmarks/toggle", target.clone()).await;
    assert_eq!(added.status(), StatusCode::OK);
    let added: Value = actix_test::read_body_json(added).await;
    assert_eq!(added["state"], "added");

    let overview = get_json(&app, &teacher, "/api/v1/me/overview").await;
    assert_eq!(overview["bookmarkedPostings"].as_array().map(Vec::len), Some(1));
    assert_eq!(overview["postings"].as_array().map(Vec::len), Some(0));

    let studio_overview = get_json(&app, &studio, "/api/v1/me/overview").await;
    assert_eq!(studio_overview["postings"].as_array().map(Vec::len), Some(1));

    let removed = post_json(&app, &teacher, "/api/v1/bookmarks/toggle", target).await;
    let removed: Value = actix_test::read_body_json(removed).await;
    assert_eq!(removed["state"], "removed");

    let bookmarks = get_json(&app, &teacher, "/api/v1/me/bookmarks?kind=posting").await;
    assert_eq!(bookmarks.as_array().map(Vec::len), Some(0));
}

#[rstest]
#[case("/api/v1/me/overview")]
#[case("/api/v1/me/notifications")]
#[case("/api/v1/me/bookmarks?kind=posting")]
#[case("/api/v1/postings/mine")]
#[actix_web::test]
async fn personal_endpoints_require_a_session(#[case] uri: &str) {
    let harness = MemoryHarness::new();
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
