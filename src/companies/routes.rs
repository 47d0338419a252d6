use super::handlers;
use axum::{
    routing::{get, patch},
    Router,
};

/// Creates the companies router
///
/// # Routes
/// - `POST /api/companies` - Post a listing (admin)
/// - `GET /api/companies` - Active feed with per-student eligibility flags
/// - `PATCH /api/companies/:id/archive` - Retire a listing (admin)
pub fn companies_routes() -> Router {
    Router::new()
        .route(
            "/api/companies",
            get(handlers::get_companies).post(handlers::create_company),
        )
        .route(
            "/api/companies/:id/archive",
            patch(handlers::archive_company),
        )
}
