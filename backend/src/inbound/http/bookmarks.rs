//! Bookmark handlers.
//!
//! ```text
//! POST /api/v1/bookmarks/toggle {"kind":"posting","id":"..."}
//! GET  /api/v1/me/bookmarks?kind=candidate
//! ```

use actix_web::{get, post, web};

use crate::domain::{BookmarkToggle, ListingTarget, ResolvedBookmark};
use crate::inbound::http::ApiResult;
use crate::inbound::http::interests::KindQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_kind;

/// Add the bookmark when absent, remove it when present.
#[utoipa::path(
    post,
    path = "/api/v1/bookmarks/toggle",
    request_body = ListingTarget,
    responses(
        (status = 200, description = "New bookmark state", body = BookmarkToggle),
        (status = 400, description = "Invalid target", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "toggleBookmark"
)]
#[post("/bookmarks/toggle")]
pub async fn toggle_bookmark(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingTarget>,
) -> ApiResult<web::Json<BookmarkToggle>> {
    let user = session.require_user_id()?;
    Ok(web::Json(
        state.bookmarks.toggle(&user, payload.into_inner()).await?,
    ))
}

/// The caller's bookmarks of one kind with their listings.
#[utoipa::path(
    get,
    path = "/api/v1/me/bookmarks",
    params(KindQuery),
    responses(
        (status = 200, description = "Bookmarks", body = [ResolvedBookmark]),
        (status = 400, description = "Invalid kind", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["bookmarks"],
    operation_id = "listBookmarks"
)]
#[get("/me/bookmarks")]
pub async fn list_bookmarks(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<KindQuery>,
) -> ApiResult<web::Json<Vec<ResolvedBookmark>>> {
    let user = session.require_user_id()?;
    let kind = parse_kind(query.kind.as_deref())?;
    Ok(web::Json(state.bookmarks_query.list_mine(&user, kind).await?))
}
