//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes and the
//! wire schemas they exchange. The error payload is described through the
//! wrappers in [`crate::inbound::http::schemas`] so the domain error stays
//! free of utoipa derives.
//!
//! Swagger UI serves this document in debug builds, and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::domain::ports::{DraftRequest, DraftedPosting, ListingDetail, ListingView};
use crate::domain::{
    Badge, BadgeTone, BookmarkRecord, BookmarkToggle, CandidateDraft, CandidateProfile,
    InboxPage, InterestKind, InterestRecord, Lifecycle, Listing, ListingKind, ListingStatus,
    ListingTarget, Notification, NotificationKind, Posting, PostingDraft, ProfilePatch,
    ResolvedBookmark, ResolvedInterest, Role, UserProfile,
};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::interests::{InterestRequest, InterestStatus};
use crate::inbound::http::listings::ExtendRequest;
use crate::inbound::http::notifications::{InboxResponse, MarkAllReadResponse};
use crate::inbound::http::overview::OverviewResponse;
use crate::inbound::http::profile::AvatarResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CredentialsRequest, PasswordChangeRequest, UserResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Job board API",
        description = "Yoga instructor job board: postings, candidate profiles, applications, bookmarks and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::change_password,
        crate::inbound::http::listings::list_postings,
        crate::inbound::http::listings::list_my_postings,
        crate::inbound::http::listings::create_posting,
        crate::inbound::http::listings::get_posting,
        crate::inbound::http::listings::close_posting,
        crate::inbound::http::listings::reopen_posting,
        crate::inbound::http::listings::extend_posting,
        crate::inbound::http::listings::delete_posting,
        crate::inbound::http::listings::list_candidates,
        crate::inbound::http::listings::list_my_candidates,
        crate::inbound::http::listings::create_candidate,
        crate::inbound::http::listings::get_candidate,
        crate::inbound::http::listings::close_candidate,
        crate::inbound::http::listings::reopen_candidate,
        crate::inbound::http::listings::extend_candidate,
        crate::inbound::http::listings::delete_candidate,
        crate::inbound::http::interests::apply,
        crate::inbound::http::interests::contact,
        crate::inbound::http::interests::interest_status,
        crate::inbound::http::interests::list_mine,
        crate::inbound::http::interests::list_received,
        crate::inbound::http::bookmarks::toggle_bookmark,
        crate::inbound::http::bookmarks::list_bookmarks,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::notifications::mark_all_read,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::upload_avatar,
        crate::inbound::http::overview::overview,
        crate::inbound::http::drafts::draft_posting,
        crate::inbound::http::admin::list_listings,
        crate::inbound::http::admin::list_profiles,
        crate::inbound::http::admin::delete_listing,
        crate::inbound::http::admin::toggle_role,
        crate::inbound::http::admin::delete_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CredentialsRequest,
        PasswordChangeRequest,
        UserResponse,
        Listing,
        ListingKind,
        ListingStatus,
        Lifecycle,
        Badge,
        BadgeTone,
        Posting,
        PostingDraft,
        CandidateProfile,
        CandidateDraft,
        ListingView,
        ListingDetail,
        ExtendRequest,
        ListingTarget,
        InterestKind,
        InterestRecord,
        ResolvedInterest,
        InterestRequest,
        InterestStatus,
        BookmarkRecord,
        BookmarkToggle,
        ResolvedBookmark,
        Notification,
        NotificationKind,
        InboxPage,
        InboxResponse,
        MarkAllReadResponse,
        Role,
        UserProfile,
        ProfilePatch,
        AvatarResponse,
        OverviewResponse,
        DraftRequest,
        DraftedPosting,
        ProbeBody,
    )),
    tags(
        (name = "users", description = "Sign-up, login and the current session"),
        (name = "listings", description = "Job postings and candidate profiles"),
        (name = "interests", description = "Applications and contacts"),
        (name = "bookmarks", description = "Saved listings"),
        (name = "notifications", description = "In-app notification inbox"),
        (name = "profile", description = "The caller's profile and avatar"),
        (name = "overview", description = "Everything the caller owns or saved"),
        (name = "drafts", description = "Generated posting text"),
        (name = "admin", description = "Moderation, admin role only"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    #[case("UserProfile", "emailNotifications")]
    #[case("ListingDetail", "interestCount")]
    #[case("InboxResponse", "pollIntervalSeconds")]
    #[case("OverviewResponse", "bookmarkedCandidates")]
    fn openapi_wire_schemas_use_camel_case(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        if name == "InboxResponse" {
            // Flattened page fields become an allOf composition.
            let json = serde_json::to_string(schema).expect("serialise schema");
            assert!(json.contains(field));
        } else {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/v1/postings/{id}/applications")]
    #[case("/api/v1/me/overview")]
    #[case("/api/v1/admin/listings/{kind}/{id}")]
    #[case("/health/ready")]
    fn openapi_registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
