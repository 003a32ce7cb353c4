//! "My page" aggregate: everything the signed-in user owns or bookmarked.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::ListingView;
use crate::domain::{ListingKind, ResolvedBookmark};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Owned listings and bookmarks of both kinds.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub postings: Vec<ListingView>,
    pub candidates: Vec<ListingView>,
    pub bookmarked_postings: Vec<ResolvedBookmark>,
    pub bookmarked_candidates: Vec<ResolvedBookmark>,
}

/// Fetch the four sections concurrently; any failure fails the page.
#[utoipa::path(
    get,
    path = "/api/v1/me/overview",
    responses(
        (status = 200, description = "My page", body = OverviewResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["overview"],
    operation_id = "overview"
)]
#[get("/me/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OverviewResponse>> {
    let user = session.require_user_id()?;
    let (postings, candidates, bookmarked_postings, bookmarked_candidates) = futures_util::try_join!(
        state.listings_query.list_owned(&user, ListingKind::Posting),
        state.listings_query.list_owned(&user, ListingKind::Candidate),
        state.bookmarks_query.list_mine(&user, ListingKind::Posting),
        state.bookmarks_query.list_mine(&user, ListingKind::Candidate),
    )?;
    Ok(web::Json(OverviewResponse {
        postings,
        candidates,
        bookmarked_postings,
        bookmarked_candidates,
    }))
}
