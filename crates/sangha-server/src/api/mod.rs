mod admin;
mod auth;
mod events;
mod gallery;
mod members;
mod notices;
mod treasury;

use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Public application intake
        .route("/api/join", post(members::join))
        // Auth: two credential surfaces feeding one role gate
        .route("/api/admin/login", post(auth::admin_login))
        .route("/api/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        // Member administration (admin session)
        .route("/api/admin/members", get(admin::list_members))
        .route("/api/admin/members", put(admin::update_member_status))
        .route("/api/admin/invite", post(admin::invite))
        // Member self-service
        .route("/api/member/me", get(members::me))
        .route("/api/member/update", put(members::update_profile))
        // Notices
        .route("/api/notices", get(notices::list))
        .route("/api/notices", post(notices::create))
        .route("/api/notices", put(notices::update))
        .route("/api/notices", delete(notices::remove))
        // Events
        .route("/api/events", get(events::list))
        .route("/api/events", post(events::create))
        .route("/api/events", put(events::update))
        .route("/api/events", delete(events::remove))
        // Treasury ledger
        .route("/api/treasury/transactions", get(treasury::list))
        .route("/api/treasury/transactions", post(treasury::create))
        .route("/api/treasury/transactions", delete(treasury::remove))
        // Gallery and asset uploads
        .route("/api/gallery", get(gallery::list))
        .route("/api/gallery/upload", post(gallery::upload))
        .route("/api/upload", post(gallery::upload_asset))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
