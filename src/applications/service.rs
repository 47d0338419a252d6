//! Application admission service.
//!
//! The one state transition in the portal that must hold under races:
//! a student gets at most one application per company. Eligibility is
//! re-evaluated here on freshly loaded rows; whatever the client concluded
//! is advisory only.
//!
//! There is deliberately no in-process locking. The serving layer may be
//! replicated, so the UNIQUE(student_user_id, company_id) index in the
//! database is the single coordination point: when two concurrent
//! submissions both pass the pre-checks, exactly one insert lands and the
//! loser's constraint violation is mapped to the same `AlreadyApplied` the
//! pre-check would have produced. Retrying a duplicate submission is safe
//! and always converges to one row.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use super::models::{Application, ApplicationStatus};
use crate::common::{generate_application_id, ApiError};
use crate::companies::models::Company;
use crate::eligibility;
use crate::students::models::StudentProfile;

/// Terminal, user-visible admission outcomes plus the transient storage case.
/// `NotEligible` and `AlreadyApplied` are expected results, not exceptions;
/// callers render them, they never retry them.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("{0}")]
    NotFound(String),
    #[error("You are not eligible for this company.")]
    NotEligible,
    #[error("You have already applied to this company.")]
    AlreadyApplied,
    #[error(transparent)]
    Storage(sqlx::Error),
}

impl From<AdmissionError> for ApiError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::NotFound(msg) => ApiError::NotFound(msg),
            AdmissionError::NotEligible => ApiError::Forbidden(AdmissionError::NotEligible.to_string()),
            AdmissionError::AlreadyApplied => {
                ApiError::BadRequest(AdmissionError::AlreadyApplied.to_string())
            }
            AdmissionError::Storage(e) => ApiError::DatabaseError(e),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

/// Submit an application for the authenticated student to a company.
///
/// 1. Load the caller's profile and the listing.
/// 2. Re-run the shared eligibility evaluator on what was just loaded.
/// 3. Advisory duplicate pre-check (narrows the common case).
/// 4. Insert; a unique-constraint violation from the race window past
///    step 3 becomes `AlreadyApplied`, never a raw storage error.
pub async fn submit_application(
    pool: &SqlitePool,
    student_user_id: &str,
    company_id: &str,
) -> Result<Application, AdmissionError> {
    let profile =
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE user_id = ?")
            .bind(student_user_id)
            .fetch_optional(pool)
            .await
            .map_err(AdmissionError::Storage)?
            .ok_or_else(|| AdmissionError::NotFound("Student profile not found.".to_string()))?;

    let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ?")
        .bind(company_id)
        .fetch_optional(pool)
        .await
        .map_err(AdmissionError::Storage)?
        .ok_or_else(|| AdmissionError::NotFound("Company not found.".to_string()))?;

    if let Err(reason) = eligibility::check(&profile, &company) {
        info!(
            user_id = %student_user_id,
            company_id = %company_id,
            reason = ?reason,
            "Application refused: not eligible"
        );
        return Err(AdmissionError::NotEligible);
    }

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM applications WHERE student_user_id = ? AND company_id = ?",
    )
    .bind(student_user_id)
    .bind(company_id)
    .fetch_one(pool)
    .await
    .map_err(AdmissionError::Storage)?;

    if existing > 0 {
        return Err(AdmissionError::AlreadyApplied);
    }

    let application_id = generate_application_id();
    let insert = sqlx::query(
        r#"
        INSERT INTO applications (id, student_user_id, company_id, profile_id, status, created_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&application_id)
    .bind(student_user_id)
    .bind(company_id)
    .bind(&profile.id)
    .bind(ApplicationStatus::Applied.as_str())
    .execute(pool)
    .await;

    if let Err(e) = insert {
        if is_unique_violation(&e) {
            // Lost the race past the pre-check; same outcome as step 3
            warn!(
                user_id = %student_user_id,
                company_id = %company_id,
                "Concurrent duplicate submission resolved by unique constraint"
            );
            return Err(AdmissionError::AlreadyApplied);
        }
        return Err(AdmissionError::Storage(e));
    }

    let application = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(&application_id)
        .fetch_one(pool)
        .await
        .map_err(AdmissionError::Storage)?;

    info!(
        application_id = %application_id,
        user_id = %student_user_id,
        company_id = %company_id,
        "Application submitted"
    );

    Ok(application)
}
