//! # Applications Module
//!
//! The admission path: server-side eligibility enforcement and the unique
//! (student, company) application record, plus the student and faculty
//! views over submitted applications.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

#[cfg(test)]
mod tests;

pub use routes::applications_routes;
