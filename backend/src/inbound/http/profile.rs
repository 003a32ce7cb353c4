//! Profile handlers.
//!
//! ```text
//! GET  /api/v1/me/profile
//! PUT  /api/v1/me/profile                        {"displayName":"Mia","emailNotifications":false}
//! POST /api/v1/me/profile/avatar?fileName=me.png  raw image bytes, Content-Type: image/png
//! ```
//!
//! The avatar route only stores the image and returns its public URL; the
//! client saves that URL on the profile (or a candidate photo) with a
//! follow-up update.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::AvatarFile;
use crate::domain::{Error, MAX_AVATAR_BYTES, ProfilePatch, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// `?fileName=` of the uploaded image.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvatarQuery {
    pub file_name: Option<String>,
}

/// Where an uploaded image can be fetched.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    #[schema(example = "https://jobs.example.com/uploads/avatars/3fa8-1700000000000.png")]
    pub url: String,
}

/// The caller's profile, created with defaults on first access.
#[utoipa::path(
    get,
    path = "/api/v1/me/profile",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/me/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserProfile>> {
    let user = session.require_user()?;
    Ok(web::Json(state.profiles.get_or_create(&user).await?))
}

/// Edit display name, phone, avatar URL or the email preference.
#[utoipa::path(
    put,
    path = "/api/v1/me/profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/me/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfilePatch>,
) -> ApiResult<web::Json<UserProfile>> {
    let user = session.require_user()?;
    // Ensure the row exists before patching it.
    state.profiles.get_or_create(&user).await?;
    Ok(web::Json(
        state.profiles.update(&user.id, payload.into_inner()).await?,
    ))
}

/// Read at most one byte past the avatar limit so oversized uploads are
/// rejected by validation without buffering the whole stream.
async fn read_capped(mut payload: web::Payload) -> ApiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|error| {
            Error::invalid_request(format!("failed to read upload: {error}"))
        })?;
        let room = (MAX_AVATAR_BYTES + 1).saturating_sub(bytes.len());
        bytes.extend_from_slice(&chunk.slice(..chunk.len().min(room)));
        if bytes.len() > MAX_AVATAR_BYTES {
            break;
        }
    }
    Ok(bytes)
}

/// Store an avatar image and return its public URL.
#[utoipa::path(
    post,
    path = "/api/v1/me/profile/avatar",
    params(AvatarQuery),
    request_body(content = Vec<u8>, content_type = "image/*", description = "Image bytes up to 5 MiB"),
    responses(
        (status = 201, description = "Image stored", body = AvatarResponse),
        (status = 400, description = "Empty, oversized or non-image upload", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "uploadAvatar"
)]
#[post("/me/profile/avatar")]
pub async fn upload_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    query: web::Query<AvatarQuery>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let file = AvatarFile {
        file_name: query.into_inner().file_name.unwrap_or_default(),
        content_type,
        bytes: read_capped(payload).await?,
    };
    let url = state.profiles.upload_avatar(&user, file).await?;
    Ok(HttpResponse::Created().json(AvatarResponse { url }))
}
