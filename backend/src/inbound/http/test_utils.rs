//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::test_support::http::signup_request;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B: MessageBody>(response: &ServiceResponse<B>) -> Cookie<'static> {
    match response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
    {
        Some(cookie) => cookie.into_owned(),
        None => panic!("response did not set a session cookie"),
    }
}

/// Sign up `email` and return the session cookie and the new user id.
pub async fn sign_up<S>(app: &S, email: &str) -> (Cookie<'static>, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, signup_request(email).to_request()).await;
    assert!(
        response.status().is_success(),
        "signup failed: {}",
        response.status()
    );
    let cookie = session_cookie(&response);
    let body: Value = actix_test::read_body_json(response).await;
    let id = body["id"].as_str().expect("user id").to_owned();
    (cookie, id)
}

/// Publish a posting titled `title` and return its id.
pub async fn publish_posting<S>(app: &S, cookie: &Cookie<'static>, title: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/postings")
        .cookie(cookie.clone())
        .set_json(json!({
            "title": title,
            "location": "Leeds",
            "category": "Vinyasa",
            "compensation": "£40 per class",
        }))
        .to_request();
    created_id(app, request).await
}

/// Publish a candidate profile named `name` and return its id.
pub async fn publish_candidate<S>(app: &S, cookie: &Cookie<'static>, name: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/candidates")
        .cookie(cookie.clone())
        .set_json(json!({
            "name": name,
            "location": "York",
            "styles": ["Hatha", "Yin"],
            "introduction": "Ten years of teaching.",
        }))
        .to_request();
    created_id(app, request).await
}

async fn created_id<S>(app: &S, request: actix_http::Request) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    body["listing"]["id"].as_str().expect("listing id").to_owned()
}
