//! Application data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A validated, unique link between a student and a listing. `profile_id`
/// points at the profile that existed at submission time; it is a snapshot
/// pointer, not a guarantee the profile can't later change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: String,
    pub student_user_id: String,
    pub company_id: String,
    pub profile_id: String,
    pub status: String,
    pub created_at: Option<String>,
}

/// Review states an application moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<ApplicationStatus> {
        match value {
            "Applied" => Some(ApplicationStatus::Applied),
            "Shortlisted" => Some(ApplicationStatus::Shortlisted),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// A student's own application with the company summary joined in, so the
/// dashboard needs no second round trip.
#[derive(Debug, Serialize, FromRow)]
pub struct MyApplication {
    pub id: String,
    pub company_id: String,
    pub status: String,
    pub created_at: Option<String>,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
}

/// One applicant row for the faculty/admin review table: the application
/// joined with the student's email and the full profile snapshot fields.
#[derive(Debug, Serialize, FromRow)]
pub struct ApplicantRecord {
    pub application_id: String,
    pub status: String,
    pub created_at: Option<String>,
    pub student_email: Option<String>,
    pub student_id: Option<String>,
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub sgpa: Option<f64>,
    pub active_backlogs: Option<i64>,
    pub tenth_percent: Option<f64>,
    pub twelfth_percent: Option<f64>,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitApplicationResponse {
    pub message: String,
    pub application: Application,
}
