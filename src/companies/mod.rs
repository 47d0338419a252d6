//! # Companies Module
//!
//! Recruiting drives posted by the placement cell:
//! - Listing creation with eligibility thresholds
//! - The active feed students browse, annotated with advisory eligibility
//! - Archiving (listings are never deleted)

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::companies_routes;
