//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("db password leaked")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already applied"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("drafts offline"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let payload = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error) {
    let (status, header, payload) = render(&internal_error_case).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn conflict_payload_keeps_details() {
    let error = Error::conflict("already applied").with_details(json!({"code": "duplicate"}));

    let (status, header, payload) = render(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header, None);
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.details(), Some(&json!({"code": "duplicate"})));
}

#[rstest]
#[actix_web::test]
async fn errors_pick_up_the_request_trace_id() {
    let trace_id: TraceId = "7f3c2d1e-0000-4000-8000-000000000001"
        .parse()
        .expect("trace id");
    let expected = trace_id.to_string();

    let (_, header, payload) =
        TraceId::scope(trace_id, async { render(&Error::not_found("gone")).await }).await;

    assert_eq!(header.as_deref(), Some(expected.as_str()));
    assert_eq!(payload.trace_id(), Some(expected.as_str()));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Body {
    #[allow(dead_code, reason = "deserialised only to exercise the extractor")]
    id: Uuid,
}

#[derive(Deserialize)]
struct Query {
    #[allow(dead_code, reason = "deserialised only to exercise the extractor")]
    limit: usize,
}

#[actix_web::test]
async fn malformed_bodies_and_queries_use_error_payloads() {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(query_config())
            .route(
                "/body",
                web::post().to(|_: web::Json<Body>| async { HttpResponse::Ok() }),
            )
            .route(
                "/query",
                web::get().to(|_: web::Query<Query>| async { HttpResponse::Ok() }),
            ),
    )
    .await;

    let bad_body = actix_test::TestRequest::post()
        .uri("/body")
        .set_json(json!({"id": "not-a-uuid"}))
        .to_request();
    let response = actix_test::call_service(&app, bad_body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["code"], "invalid_body");

    let bad_query = actix_test::TestRequest::get()
        .uri("/query?limit=lots")
        .to_request();
    let response = actix_test::call_service(&app, bad_query).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "invalid_query");
}
