//! Route definitions for the directory back office

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Public enquiry form
        .route("/enquiries", post(handlers::submit_enquiry))
        .route(
            "/enquiries/:enquiry_id/status",
            put(handlers::update_enquiry_status),
        )
        // Provider dashboard
        .route(
            "/providers/:provider_id/enquiries",
            get(handlers::list_provider_enquiries),
        )
        // Admin back office
        .nest("/admin", admin_routes())
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", get(handlers::list_businesses))
        .route("/businesses/refresh", post(handlers::refresh_businesses))
        .route(
            "/businesses/:business_id/verification",
            post(handlers::toggle_verification),
        )
        .route("/businesses/:business_id", delete(handlers::delete_business))
        .route("/users", get(handlers::list_users))
        .route("/categories", get(handlers::list_categories))
        .route("/assistant", post(handlers::ask_assistant))
}
