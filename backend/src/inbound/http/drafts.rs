//! AI-assisted posting drafts.

use actix_web::{post, web};

use crate::domain::ports::{DraftRequest, DraftedPosting};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Draft posting text from a location and yoga style.
#[utoipa::path(
    post,
    path = "/api/v1/drafts/posting",
    request_body = DraftRequest,
    responses(
        (status = 200, description = "Drafted text", body = DraftedPosting),
        (status = 400, description = "Missing location or category", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Text generator unavailable", body = ErrorSchema)
    ),
    tags = ["drafts"],
    operation_id = "draftPosting"
)]
#[post("/drafts/posting")]
pub async fn draft_posting(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DraftRequest>,
) -> ApiResult<web::Json<DraftedPosting>> {
    session.require_user_id()?;
    Ok(web::Json(state.drafter.draft(payload.into_inner()).await?))
}
