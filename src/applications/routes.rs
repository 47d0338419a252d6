use super::handlers;
use axum::{
    routing::{get, patch, post},
    Router,
};

/// Creates the applications router
///
/// # Routes
/// - `POST /api/applications/:company_id` - Apply to a company (student)
/// - `GET /api/applications/my-applications` - Own applications (student)
/// - `GET /api/applications/:company_id/applicants` - Review table (faculty/admin)
/// - `PATCH /api/applications/:id/status` - Review decision (faculty/admin)
pub fn applications_routes() -> Router {
    Router::new()
        .route(
            "/api/applications/my-applications",
            get(handlers::get_my_applications),
        )
        .route(
            "/api/applications/:company_id",
            post(handlers::submit_application),
        )
        .route(
            "/api/applications/:company_id/applicants",
            get(handlers::get_company_applicants),
        )
        .route(
            "/api/applications/:id/status",
            patch(handlers::update_application_status),
        )
}
