//! Application and contact handlers.
//!
//! ```text
//! POST /api/v1/postings/{id}/applications  {"message":"..."}
//! POST /api/v1/candidates/{id}/contacts    {"message":"..."}
//! GET  /api/v1/me/interests?kind=posting
//! GET  /api/v1/me/interests/received?kind=candidate
//! GET  /api/v1/me/interests/status?kind=posting&id=...
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{InterestRecord, ListingKind, ResolvedInterest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_kind, parse_target, parse_uuid};

/// Optional note sent with an application or contact.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    #[schema(example = "I teach vinyasa five mornings a week.")]
    pub message: Option<String>,
}

/// `?kind=` filter shared by the ledger listings.
#[derive(Debug, Deserialize, IntoParams)]
pub struct KindQuery {
    /// `posting` or `candidate`.
    pub kind: Option<String>,
}

/// `?kind=&id=` identifying one listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TargetQuery {
    /// `posting` or `candidate`.
    pub kind: Option<String>,
    /// Listing id.
    pub id: Option<String>,
}

/// Whether the caller already acted on a listing, plus its total.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestStatus {
    pub has_acted: bool,
    pub count: u64,
}

/// Apply to a posting.
#[utoipa::path(
    post,
    path = "/api/v1/postings/{id}/applications",
    params(("id" = String, Path, description = "Posting id")),
    request_body = InterestRequest,
    responses(
        (status = 201, description = "Application recorded", body = InterestRecord),
        (status = 400, description = "Invalid request or own posting", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Posting not found", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "applyToPosting"
)]
#[post("/postings/{id}/applications")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<InterestRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let posting_id = parse_uuid(&path, FieldName::new("id"))?;
    let record = state
        .interests
        .apply(&actor, posting_id, payload.into_inner().message)
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Contact a candidate.
#[utoipa::path(
    post,
    path = "/api/v1/candidates/{id}/contacts",
    params(("id" = String, Path, description = "Candidate profile id")),
    request_body = InterestRequest,
    responses(
        (status = 201, description = "Contact recorded", body = InterestRecord),
        (status = 400, description = "Invalid request or own profile", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Candidate not found", body = ErrorSchema),
        (status = 409, description = "Already contacted", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "contactCandidate"
)]
#[post("/candidates/{id}/contacts")]
pub async fn contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<InterestRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let candidate_id = parse_uuid(&path, FieldName::new("id"))?;
    let record = state
        .interests
        .contact(&actor, candidate_id, payload.into_inner().message)
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// Whether the caller applied to or contacted a listing.
#[utoipa::path(
    get,
    path = "/api/v1/me/interests/status",
    params(TargetQuery),
    responses(
        (status = 200, description = "Interest status", body = InterestStatus),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "interestStatus"
)]
#[get("/me/interests/status")]
pub async fn interest_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<TargetQuery>,
) -> ApiResult<web::Json<InterestStatus>> {
    let actor = session.require_user_id()?;
    let TargetQuery { kind, id } = query.into_inner();
    let kind = parse_kind(kind.as_deref())?;
    let raw_id = id.ok_or_else(|| missing_field_error(FieldName::new("id")))?;
    let target = parse_target(kind, &raw_id)?;
    let (has_acted, count) = futures_util::try_join!(
        state.interests_query.has_acted(&actor, target),
        state.interests_query.count_for(target),
    )?;
    Ok(web::Json(InterestStatus { has_acted, count }))
}

/// The caller's applications or contacts.
#[utoipa::path(
    get,
    path = "/api/v1/me/interests",
    params(KindQuery),
    responses(
        (status = 200, description = "Sent interest", body = [ResolvedInterest]),
        (status = 400, description = "Invalid kind", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "listMyInterests"
)]
#[get("/me/interests")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<KindQuery>,
) -> ApiResult<web::Json<Vec<ResolvedInterest>>> {
    let actor = session.require_user_id()?;
    let kind: ListingKind = parse_kind(query.kind.as_deref())?;
    Ok(web::Json(state.interests_query.list_mine(&actor, kind).await?))
}

/// Applications or contacts received on the caller's listings.
#[utoipa::path(
    get,
    path = "/api/v1/me/interests/received",
    params(KindQuery),
    responses(
        (status = 200, description = "Received interest", body = [ResolvedInterest]),
        (status = 400, description = "Invalid kind", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["interests"],
    operation_id = "listReceivedInterests"
)]
#[get("/me/interests/received")]
pub async fn list_received(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<KindQuery>,
) -> ApiResult<web::Json<Vec<ResolvedInterest>>> {
    let owner = session.require_user_id()?;
    let kind = parse_kind(query.kind.as_deref())?;
    Ok(web::Json(
        state.interests_query.list_received(&owner, kind).await?,
    ))
}

#[cfg(test)]
mod tests;
