//! Notification inbox handlers.
//!
//! Clients poll `GET /me/notifications` every `pollIntervalSeconds`; the
//! response carries the newest page with its unread count and bell label.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{InboxPage, clamp_inbox_limit};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// `?limit=` page size, clamped to 1..=100.
#[derive(Debug, Deserialize, IntoParams)]
pub struct InboxQuery {
    pub limit: Option<usize>,
}

/// Inbox page plus the advertised poll cadence.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    #[serde(flatten)]
    pub page: InboxPage,
    #[schema(example = 30)]
    pub poll_interval_seconds: u64,
}

/// Count of notifications flipped to read.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/me/notifications",
    params(InboxQuery),
    responses(
        (status = 200, description = "Newest notifications", body = InboxResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/me/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<InboxQuery>,
) -> ApiResult<web::Json<InboxResponse>> {
    let recipient = session.require_user_id()?;
    let page = state
        .inbox
        .list_recent(&recipient, clamp_inbox_limit(query.limit))
        .await?;
    Ok(web::Json(InboxResponse {
        page,
        poll_interval_seconds: state.poll_interval.as_secs(),
    }))
}

/// Mark one of the caller's notifications read.
#[utoipa::path(
    post,
    path = "/api/v1/me/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not in the caller's inbox", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/me/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipient = session.require_user_id()?;
    let id = parse_uuid(&path, FieldName::new("id"))?;
    state.inbox.mark_read(&recipient, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mark every notification in the caller's inbox read.
#[utoipa::path(
    post,
    path = "/api/v1/me/notifications/read-all",
    responses(
        (status = 200, description = "Notifications updated", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[post("/me/notifications/read-all")]
pub async fn mark_all_read(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let recipient = session.require_user_id()?;
    let updated = state.inbox.mark_all_read(&recipient).await?;
    Ok(web::Json(MarkAllReadResponse { updated }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use mockable::Clock;
    use rstest::rstest;
    use serde_json::Value;
    use uuid::Uuid;

    use crate::domain::ports::NotificationRepository;
    use crate::domain::{NewNotification, UserId};
    use crate::inbound::http::test_utils::sign_up;
    use crate::test_support::http::{MemoryHarness, test_app};

    async fn seed(harness: &MemoryHarness, recipient: &str, count: usize) -> Vec<Uuid> {
        let recipient = UserId::new(recipient).expect("user id");
        let mut ids = Vec::with_capacity(count);
        for n in 0..count {
            let notification = NewNotification::application_received(
                recipient.clone(),
                Uuid::new_v4(),
                &format!("Posting {n}"),
            )
            .into_notification(Uuid::new_v4(), harness.clock.utc());
            ids.push(notification.id);
            NotificationRepository::insert(harness.store.as_ref(), &notification)
                .await
                .expect("insert notification");
            harness.clock.advance_seconds(1);
        }
        ids
    }

    #[rstest]
    #[case(None, 10, "9+")]
    #[case(Some(3), 3, "3")]
    #[case(Some(0), 1, "1")]
    #[actix_web::test]
    async fn listing_clamps_the_page_and_labels_the_bell(
        #[case] limit: Option<usize>,
        #[case] expected_len: usize,
        #[case] expected_label: &str,
    ) {
        let harness = MemoryHarness::new();
        let state = harness.state.clone().with_poll_interval(Duration::from_secs(15));
        let app = actix_test::init_service(test_app(state)).await;
        let (cookie, id) = sign_up(&app, "studio@example.com").await;
        seed(&harness, &id, 12).await;

        let uri = match limit {
            Some(limit) => format!("/api/v1/me/notifications?limit={limit}"),
            None => "/api/v1/me/notifications".to_owned(),
        };
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&uri).cookie(cookie).to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value["notifications"].as_array().map(Vec::len),
            Some(expected_len)
        );
        assert_eq!(value["badgeLabel"], expected_label);
        assert_eq!(value["pollIntervalSeconds"], 15);
        assert_eq!(value["notifications"][0]["message"], "\"Posting 11\" posting has an applicant.");
    }

    #[actix_web::test]
    async fn read_state_is_confined_to_the_recipient() {
        let harness = MemoryHarness::new();
        let app = actix_test::init_service(test_app(harness.state.clone())).await;
        let (owner, owner_id) = sign_up(&app, "studio@example.com").await;
        let (intruder, _) = sign_up(&app, "intruder@example.com").await;
        let ids = seed(&harness, &owner_id, 3).await;

        let foreign = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/me/notifications/{}/read", ids[0]))
                .cookie(intruder)
                .to_request(),
        )
        .await;
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

        let own = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/me/notifications/{}/read", ids[0]))
                .cookie(owner.clone())
                .to_request(),
        )
        .await;
        assert_eq!(own.status(), StatusCode::NO_CONTENT);

        let all = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/me/notifications/read-all")
                .cookie(owner.clone())
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(all).await;
        assert_eq!(value["updated"], 2);

        let page = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/me/notifications")
                .cookie(owner)
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(page).await;
        assert_eq!(value["unreadCount"], 0);
        assert_eq!(value["badgeLabel"], "");
    }

    #[actix_web::test]
    async fn inbox_requires_a_session() {
        let harness = MemoryHarness::new();
        let app = actix_test::init_service(test_app(harness.state.clone())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/me/notifications")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
