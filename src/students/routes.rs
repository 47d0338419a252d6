use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates the students router
///
/// # Routes
/// - `POST /api/students/upload` - Bulk CSV import (faculty/admin)
/// - `GET /api/students/my-profile` - Own profile (student)
/// - `PUT /api/students/my-profile` - Edit student-owned fields (student)
pub fn students_routes() -> Router {
    Router::new()
        .route("/api/students/upload", post(handlers::upload_students))
        .route(
            "/api/students/my-profile",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
}
