//! Student profile data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student's academic record, used for eligibility checks.
///
/// `tenth_percent` and `twelfth_percent` stay `None` until the student fills
/// them in. An absent value means the profile cannot qualify for any listing;
/// it is never treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentProfile {
    pub id: String,
    pub user_id: String,
    pub student_id: String,
    pub full_name: String,
    pub department: String,
    pub sgpa: f64,
    pub active_backlogs: i64,
    pub phone_number: Option<String>,
    pub tenth_percent: Option<f64>,
    pub twelfth_percent: Option<f64>,
    pub resume_url: Option<String>,
}

/// Fields only bulk import (faculty-supplied data) may change.
///
/// This contract and `StudentProfileUpdate` are deliberately disjoint: field
/// ownership is enforced by which struct a code path can bind, not by handler
/// discipline. There is no whole-row update anywhere in the crate.
#[derive(Debug, Clone)]
pub struct HodProfileUpdate {
    pub full_name: String,
    pub department: String,
    pub sgpa: f64,
    pub active_backlogs: i64,
}

/// Fields the student may edit directly. Omitted fields keep their value.
#[derive(Debug, Deserialize)]
pub struct StudentProfileUpdate {
    pub phone_number: Option<String>,
    pub tenth_percent: Option<f64>,
    pub twelfth_percent: Option<f64>,
    pub resume_url: Option<String>,
}

/// One row of the bulk import sheet. Headers match the template handed to
/// coordinators: StudentID, FullName, Email, Department, SGPA, ActiveBacklogs.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentImportRow {
    #[serde(rename = "StudentID")]
    pub student_id: Option<String>,
    #[serde(rename = "FullName")]
    pub full_name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Department")]
    pub department: Option<String>,
    #[serde(rename = "SGPA")]
    pub sgpa: Option<f64>,
    #[serde(rename = "ActiveBacklogs")]
    pub active_backlogs: Option<i64>,
}

/// Per-batch import report. A row either fully succeeds or is fully skipped.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub message: String,
    pub created: usize,
    pub updated: usize,
    pub errors: usize,
}
