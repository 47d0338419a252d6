//! # Auth Module
//!
//! Login accounts and the authentication boundary:
//! - Registration, login, password change
//! - JWT issue/verify and the `AuthedUser` extractor
//! - Admin account management

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::Role;
pub use routes::auth_routes;
