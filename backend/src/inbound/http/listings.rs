//! Posting and candidate profile handlers.
//!
//! Both listing kinds expose the same routes; handlers are thin wrappers
//! that fix the kind and delegate to shared helpers.
//!
//! ```text
//! GET    /api/v1/postings              open postings, ?q=&style= narrow
//! GET    /api/v1/postings/mine         the caller's postings
//! POST   /api/v1/postings              publish
//! GET    /api/v1/postings/{id}         detail with badge and interest count
//! POST   /api/v1/postings/{id}/close
//! POST   /api/v1/postings/{id}/reopen
//! POST   /api/v1/postings/{id}/extend  {"days":30}
//! DELETE /api/v1/postings/{id}
//! ```
//!
//! `/candidates` mirrors every route.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ListingDetail, ListingView};
use crate::domain::{
    CandidateDraft, DEFAULT_LISTING_DAYS, ListingFilter, ListingKind, PostingDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_extension_days, parse_target};

/// Body for the extend routes.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtendRequest {
    /// Days from now until the new expiry; defaults to 30.
    #[schema(example = 30, minimum = 1, maximum = 365)]
    pub days: Option<i64>,
}

/// `?q=&style=` narrowing for the browse routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BrowseQuery {
    /// Case-insensitive search over title or name, location and styles.
    pub q: Option<String>,
    /// Exact yoga style, ignoring case.
    pub style: Option<String>,
}

async fn open_listings(
    state: &HttpState,
    kind: ListingKind,
    query: BrowseQuery,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    let filter = ListingFilter::new(query.q, query.style);
    Ok(web::Json(state.listings_query.list_open(kind, filter).await?))
}

async fn owned_listings(
    state: &HttpState,
    session: &SessionContext,
    kind: ListingKind,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    let owner = session.require_user_id()?;
    Ok(web::Json(state.listings_query.list_owned(&owner, kind).await?))
}

async fn detail(state: &HttpState, kind: ListingKind, raw_id: &str) -> ApiResult<web::Json<ListingDetail>> {
    let target = parse_target(kind, raw_id)?;
    Ok(web::Json(state.listings_query.get(target).await?))
}

#[derive(Clone, Copy)]
enum Transition {
    Close,
    Reopen,
}

async fn transition(
    state: &HttpState,
    session: &SessionContext,
    kind: ListingKind,
    raw_id: &str,
    transition: Transition,
) -> ApiResult<web::Json<ListingView>> {
    let actor = session.require_user_id()?;
    let target = parse_target(kind, raw_id)?;
    let view = match transition {
        Transition::Close => state.listings.close(&actor, target).await?,
        Transition::Reopen => state.listings.reopen(&actor, target).await?,
    };
    Ok(web::Json(view))
}

async fn extend(
    state: &HttpState,
    session: &SessionContext,
    kind: ListingKind,
    raw_id: &str,
    body: ExtendRequest,
) -> ApiResult<web::Json<ListingView>> {
    let actor = session.require_user_id()?;
    let target = parse_target(kind, raw_id)?;
    let days = parse_extension_days(body.days.unwrap_or(DEFAULT_LISTING_DAYS))?;
    Ok(web::Json(state.listings.extend(&actor, target, days).await?))
}

async fn remove(
    state: &HttpState,
    session: &SessionContext,
    kind: ListingKind,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let target = parse_target(kind, raw_id)?;
    state.listings.delete(&actor, target).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Open postings, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/postings",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Open postings", body = [ListingView]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listPostings",
    security([])
)]
#[get("/postings")]
pub async fn list_postings(
    state: web::Data<HttpState>,
    query: web::Query<BrowseQuery>,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    open_listings(&state, ListingKind::Posting, query.into_inner()).await
}

/// The caller's postings in every status.
#[utoipa::path(
    get,
    path = "/api/v1/postings/mine",
    responses(
        (status = 200, description = "Owned postings", body = [ListingView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listMyPostings"
)]
#[get("/postings/mine")]
pub async fn list_my_postings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    owned_listings(&state, &session, ListingKind::Posting).await
}

/// Publish a posting open for 30 days.
#[utoipa::path(
    post,
    path = "/api/v1/postings",
    request_body = PostingDraft,
    responses(
        (status = 201, description = "Posting published", body = ListingView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "createPosting"
)]
#[post("/postings")]
pub async fn create_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PostingDraft>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let view = state
        .listings
        .create_posting(&owner, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// One posting with its badge and application count.
#[utoipa::path(
    get,
    path = "/api/v1/postings/{id}",
    params(("id" = String, Path, description = "Posting id")),
    responses(
        (status = 200, description = "Posting detail", body = ListingDetail),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "getPosting",
    security([])
)]
#[get("/postings/{id}")]
pub async fn get_posting(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingDetail>> {
    detail(&state, ListingKind::Posting, &path).await
}

/// Close a posting.
#[utoipa::path(
    post,
    path = "/api/v1/postings/{id}/close",
    params(("id" = String, Path, description = "Posting id")),
    responses(
        (status = 200, description = "Posting closed", body = ListingView),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "closePosting"
)]
#[post("/postings/{id}/close")]
pub async fn close_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingView>> {
    transition(&state, &session, ListingKind::Posting, &path, Transition::Close).await
}

/// Reopen a posting for another 30 days.
#[utoipa::path(
    post,
    path = "/api/v1/postings/{id}/reopen",
    params(("id" = String, Path, description = "Posting id")),
    responses(
        (status = 200, description = "Posting reopened", body = ListingView),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "reopenPosting"
)]
#[post("/postings/{id}/reopen")]
pub async fn reopen_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingView>> {
    transition(&state, &session, ListingKind::Posting, &path, Transition::Reopen).await
}

/// Move a posting's expiry.
#[utoipa::path(
    post,
    path = "/api/v1/postings/{id}/extend",
    params(("id" = String, Path, description = "Posting id")),
    request_body = ExtendRequest,
    responses(
        (status = 200, description = "Expiry moved", body = ListingView),
        (status = 400, description = "Invalid extension", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "extendPosting"
)]
#[post("/postings/{id}/extend")]
pub async fn extend_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ExtendRequest>,
) -> ApiResult<web::Json<ListingView>> {
    extend(&state, &session, ListingKind::Posting, &path, payload.into_inner()).await
}

/// Delete a posting.
#[utoipa::path(
    delete,
    path = "/api/v1/postings/{id}",
    params(("id" = String, Path, description = "Posting id")),
    responses(
        (status = 204, description = "Posting deleted"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "deletePosting"
)]
#[delete("/postings/{id}")]
pub async fn delete_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove(&state, &session, ListingKind::Posting, &path).await
}

/// Open candidate profiles, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/candidates",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Open candidate profiles", body = [ListingView]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "listCandidates",
    security([])
)]
#[get("/candidates")]
pub async fn list_candidates(
    state: web::Data<HttpState>,
    query: web::Query<BrowseQuery>,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    open_listings(&state, ListingKind::Candidate, query.into_inner()).await
}

/// The caller's candidate profiles.
#[utoipa::path(
    get,
    path = "/api/v1/candidates/mine",
    responses(
        (status = 200, description = "Owned candidate profiles", body = [ListingView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "listMyCandidates"
)]
#[get("/candidates/mine")]
pub async fn list_my_candidates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ListingView>>> {
    owned_listings(&state, &session, ListingKind::Candidate).await
}

/// Publish a candidate profile open for 30 days.
#[utoipa::path(
    post,
    path = "/api/v1/candidates",
    request_body = CandidateDraft,
    responses(
        (status = 201, description = "Profile published", body = ListingView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "createCandidate"
)]
#[post("/candidates")]
pub async fn create_candidate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CandidateDraft>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let view = state
        .listings
        .create_candidate(&owner, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// One candidate profile with its badge and contact count.
#[utoipa::path(
    get,
    path = "/api/v1/candidates/{id}",
    params(("id" = String, Path, description = "Candidate profile id")),
    responses(
        (status = 200, description = "Profile detail", body = ListingDetail),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "getCandidate",
    security([])
)]
#[get("/candidates/{id}")]
pub async fn get_candidate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingDetail>> {
    detail(&state, ListingKind::Candidate, &path).await
}

/// Close a candidate profile.
#[utoipa::path(
    post,
    path = "/api/v1/candidates/{id}/close",
    params(("id" = String, Path, description = "Candidate profile id")),
    responses(
        (status = 200, description = "Profile closed", body = ListingView),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "closeCandidate"
)]
#[post("/candidates/{id}/close")]
pub async fn close_candidate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingView>> {
    transition(&state, &session, ListingKind::Candidate, &path, Transition::Close).await
}

/// Reopen a candidate profile.
#[utoipa::path(
    post,
    path = "/api/v1/candidates/{id}/reopen",
    params(("id" = String, Path, description = "Candidate profile id")),
    responses(
        (status = 200, description = "Profile reopened", body = ListingView),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "reopenCandidate"
)]
#[post("/candidates/{id}/reopen")]
pub async fn reopen_candidate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingView>> {
    transition(&state, &session, ListingKind::Candidate, &path, Transition::Reopen).await
}

/// Move a candidate profile's expiry.
#[utoipa::path(
    post,
    path = "/api/v1/candidates/{id}/extend",
    params(("id" = String, Path, description = "Candidate profile id")),
    request_body = ExtendRequest,
    responses(
        (status = 200, description = "Expiry moved", body = ListingView),
        (status = 400, description = "Invalid extension", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "extendCandidate"
)]
#[post("/candidates/{id}/extend")]
pub async fn extend_candidate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ExtendRequest>,
) -> ApiResult<web::Json<ListingView>> {
    extend(&state, &session, ListingKind::Candidate, &path, payload.into_inner()).await
}

/// Delete a candidate profile.
#[utoipa::path(
    delete,
    path = "/api/v1/candidates/{id}",
    params(("id" = String, Path, description = "Candidate profile id")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["candidates"],
    operation_id = "deleteCandidate"
)]
#[delete("/candidates/{id}")]
pub async fn delete_candidate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove(&state, &session, ListingKind::Candidate, &path).await
}
