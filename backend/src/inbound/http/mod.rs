//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every handler reads its ports from [`state::HttpState`] and the signed-in
//! identity from [`session::SessionContext`]. [`api_services`] registers the
//! session-protected routes under the caller's scope.

use actix_web::web;

pub mod admin;
pub mod bookmarks;
pub mod drafts;
pub mod error;
pub mod health;
pub mod interests;
pub mod listings;
pub mod notifications;
pub mod overview;
pub mod profile;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, json_config, query_config};

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal paths are registered before their `{id}` siblings so that, for
/// example, `/postings/mine` is never parsed as a posting id.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::change_password)
        .service(listings::list_my_postings)
        .service(listings::list_postings)
        .service(listings::create_posting)
        .service(listings::get_posting)
        .service(listings::close_posting)
        .service(listings::reopen_posting)
        .service(listings::extend_posting)
        .service(listings::delete_posting)
        .service(listings::list_my_candidates)
        .service(listings::list_candidates)
        .service(listings::create_candidate)
        .service(listings::get_candidate)
        .service(listings::close_candidate)
        .service(listings::reopen_candidate)
        .service(listings::extend_candidate)
        .service(listings::delete_candidate)
        .service(interests::apply)
        .service(interests::contact)
        .service(interests::interest_status)
        .service(interests::list_received)
        .service(interests::list_mine)
        .service(bookmarks::toggle_bookmark)
        .service(bookmarks::list_bookmarks)
        .service(notifications::list_notifications)
        .service(notifications::mark_all_read)
        .service(notifications::mark_read)
        .service(profile::get_profile)
        .service(profile::update_profile)
        .service(profile::upload_avatar)
        .service(overview::overview)
        .service(drafts::draft_posting)
        .service(admin::list_listings)
        .service(admin::list_profiles)
        .service(admin::delete_listing)
        .service(admin::toggle_role)
        .service(admin::delete_profile);
}
