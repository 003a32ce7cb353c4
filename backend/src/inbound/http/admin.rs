//! Moderation handlers. The service rejects callers without the admin role.
//!
//! ```text
//! GET    /api/v1/admin/listings?kind=posting
//! GET    /api/v1/admin/profiles
//! DELETE /api/v1/admin/listings/{kind}/{id}
//! POST   /api/v1/admin/profiles/{id}/role
//! DELETE /api/v1/admin/profiles/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ports::ListingView;
use crate::domain::{UserId, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::interests::KindQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_kind, parse_target, parse_uuid};

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    Ok(UserId::from_uuid(parse_uuid(raw, FieldName::new("id"))?))
}

/// Every listing of a kind, open or not.
#[utoipa::path(
    get,
    path = "/api/v1/admin/listings",
    params(KindQuery),
    responses(
        (status = 200, description = "All listings", body = [ListingView]),
        (status = 400, description = "Invalid kind", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListListings"
)]
#[get("/admin/listings")]
pub async fn list_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<KindQuery>,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    let admin = session.require_user_id()?;
    let kind = parse_kind(query.kind.as_deref())?;
    Ok(web::Json(state.admin.list_listings(&admin, kind).await?))
}

/// Every user profile.
#[utoipa::path(
    get,
    path = "/api/v1/admin/profiles",
    responses(
        (status = 200, description = "All profiles", body = [UserProfile]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListProfiles"
)]
#[get("/admin/profiles")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserProfile>>> {
    let admin = session.require_user_id()?;
    Ok(web::Json(state.admin.list_profiles(&admin).await?))
}

/// Delete any listing.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/listings/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`posting` or `candidate`"),
        ("id" = String, Path, description = "Listing id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid kind or id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteListing"
)]
#[delete("/admin/listings/{kind}/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let admin = session.require_user_id()?;
    let (kind, id) = path.into_inner();
    let target = parse_target(parse_kind(Some(&kind))?, &id)?;
    state.admin.delete_listing(&admin, target).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Swap a user between the `user` and `admin` roles.
#[utoipa::path(
    post,
    path = "/api/v1/admin/profiles/{id}/role",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminToggleRole"
)]
#[post("/admin/profiles/{id}/role")]
pub async fn toggle_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserProfile>> {
    let admin = session.require_user_id()?;
    let user = parse_user_id(&path)?;
    Ok(web::Json(state.admin.toggle_role(&admin, &user).await?))
}

/// Delete a user profile.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/profiles/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteProfile"
)]
#[delete("/admin/profiles/{id}")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let admin = session.require_user_id()?;
    let user = parse_user_id(&path)?;
    state.admin.delete_profile(&admin, &user).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::UserProfileRepository;
    use crate::domain::{Role, UserId};
    use crate::inbound::http::test_utils::{publish_candidate, publish_posting, sign_up};
    use crate::test_support::http::{MemoryHarness, test_app};

    async fn promote(harness: &MemoryHarness, id: &str) {
        let user = UserId::new(id).expect("user id");
        let updated = UserProfileRepository::set_role(harness.store.as_ref(), &user, Role::Admin)
            .await
            .expect("set role");
        assert!(updated);
    }

    #[rstest]
    #[case("/api/v1/admin/listings?kind=posting")]
    #[case("/api/v1/admin/profiles")]
    #[actix_web::test]
    async fn regular_users_are_forbidden(#[case] uri: &str) {
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
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admins_see_closed_listings_and_can_delete_them() {
        let harness = MemoryHarness::new();
        let app = actix_test::init_service(test_app(harness.state.clone())).await;
        let (studio, _) = sign_up(&app, "studio@example.com").await;
        let (admin, admin_id) = sign_up(&app, "admin@example.com").await;
        promote(&harness, &admin_id).await;
        let posting = publish_posting(&app, &studio, "Ashtanga").await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/postings/{posting}/close"))
                .cookie(studio)
                .to_request(),
        )
        .await;

        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/listings?kind=posting")
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        let value: Value = actix_test::read_body_json(listed).await;
        assert_eq!(value[0]["listing"]["id"], posting.as_str());
        assert_eq!(value[0]["badge"]["label"], "closed");

        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/listings/posting/{posting}"))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/listings/posting/{posting}"))
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn admins_toggle_roles_and_delete_profiles() {
        let harness = MemoryHarness::new();
        let app = actix_test::init_service(test_app(harness.state.clone())).await;
        let (teacher, teacher_id) = sign_up(&app, "teacher@example.com").await;
        let (admin, admin_id) = sign_up(&app, "admin@example.com").await;
        promote(&harness, &admin_id).await;
        publish_candidate(&app, &teacher, "Noor").await;

        let toggled = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/admin/profiles/{teacher_id}/role"))
                .cookie(admin.clone())
                .to_request(),
        )
        .await;
        assert_eq!(toggled.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(toggled).await;
        assert_eq!(value["role"], "admin");

        let profiles = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/admin/profiles")
                .cookie(teacher)
                .to_request(),
        )
        .await;
        assert_eq!(profiles.status(), StatusCode::OK);

        let deleted = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/admin/profiles/{teacher_id}"))
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case("/api/v1/admin/listings/studio/00000000-0000-0000-0000-000000000001")]
    #[case("/api/v1/admin/listings/posting/not-a-uuid")]
    #[case("/api/v1/admin/profiles/not-a-uuid")]
    #[actix_web::test]
    async fn malformed_paths_are_bad_requests(#[case] uri: &str) {
        let harness = MemoryHarness::new();
        let app = actix_test::init_service(test_app(harness.state.clone())).await;
        let (admin, admin_id) = sign_up(&app, "admin@example.com").await;
        promote(&harness, &admin_id).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(uri)
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
