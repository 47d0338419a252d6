//! Authentication routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/register` - Create a login account
/// - `POST /api/auth/login` - Exchange credentials for a token
/// - `POST /api/auth/change-password` - Authenticated password change
/// - `GET /api/auth/users` - List staff accounts (admin)
/// - `DELETE /api/auth/users/:id` - Remove an account (admin)
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/change-password", post(handlers::change_password))
        .route("/api/auth/users", get(handlers::list_staff_users))
        .route("/api/auth/users/:id", delete(handlers::delete_user))
}
