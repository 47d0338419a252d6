//! # Students Module
//!
//! Student academic records:
//! - Bulk CSV import of profiles by faculty coordinators
//! - A student's view and edit of their own profile
//!
//! Profile fields have two owners with disjoint update contracts: bulk
//! import writes the HOD-owned academic fields, the student edits the rest.

pub mod handlers;
pub mod import;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::students_routes;
