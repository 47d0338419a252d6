//! Company listing handlers

use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::*;
use super::validators::CompanyValidator;
use crate::auth::{AuthedUser, Role};
use crate::common::{generate_company_id, ApiError, AppState, Validator};
use crate::eligibility;
use crate::students::models::StudentProfile;

/// POST /api/companies - Post a recruiting drive (admin only)
pub async fn create_company(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    authed.authorize(&[Role::Admin])?;
    let state = state_lock.read().await.clone();

    let validation = CompanyValidator.validate(&request);
    if !validation.is_valid() {
        return Err(ApiError::from(validation));
    }

    let company_id = generate_company_id();
    let departments_json = serde_json::to_string(&request.allowed_departments)
        .map_err(|e| ApiError::InternalServer(format!("failed to encode departments: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO companies
        (id, company_name, job_description, min_sgpa, min_tenth_percent, min_twelfth_percent,
         allowed_departments, allowed_backlogs, application_deadline, posted_by,
         is_archived, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, datetime('now'), datetime('now'))
        "#,
    )
    .bind(&company_id)
    .bind(request.company_name.trim())
    .bind(&request.job_description)
    .bind(request.min_sgpa.unwrap_or(0.0))
    .bind(request.min_tenth_percent.unwrap_or(0.0))
    .bind(request.min_twelfth_percent.unwrap_or(0.0))
    .bind(&departments_json)
    .bind(request.allowed_backlogs.unwrap_or(0))
    .bind(&request.application_deadline)
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = ?")
        .bind(&company_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        company_id = %company_id,
        company_name = %company.company_name,
        posted_by = %authed.id,
        "Company listing created"
    );

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies - Active listings, soonest deadline first.
///
/// For student callers each listing carries advisory eligibility flags
/// computed by the shared evaluator against their profile. The flags only
/// drive the UI; submission always re-checks server-side.
pub async fn get_companies(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<CompanyFeedItem>>, ApiError> {
    let state = state_lock.read().await.clone();

    let companies: Vec<Company> = sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE is_archived = 0 ORDER BY application_deadline ASC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let profile = if authed.role == Role::Student {
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE user_id = ?")
            .bind(&authed.id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?
    } else {
        None
    };

    let feed = companies
        .into_iter()
        .map(|company| {
            let (eligible, ineligibility_reason) = match (&authed.role, &profile) {
                (Role::Student, Some(p)) => match eligibility::check(p, &company) {
                    Ok(()) => (Some(true), None),
                    Err(reason) => (Some(false), Some(reason.message().to_string())),
                },
                // A student with no imported profile yet is eligible for nothing
                (Role::Student, None) => (
                    Some(false),
                    Some("Profile not found. Ask your coordinator to import your record".to_string()),
                ),
                _ => (None, None),
            };
            CompanyFeedItem {
                company,
                eligible,
                ineligibility_reason,
            }
        })
        .collect();

    Ok(Json(feed))
}

/// PATCH /api/companies/:id/archive - Retire a listing (admin only).
/// Listings are never deleted; archiving removes them from the feed while
/// past applications keep a valid reference.
pub async fn archive_company(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    authed.authorize(&[Role::Admin])?;
    let state = state_lock.read().await.clone();

    let result = sqlx::query(
        "UPDATE companies SET is_archived = 1, updated_at = datetime('now') WHERE id = ?",
    )
    .bind(&company_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Company not found.".to_string()));
    }

    info!(company_id = %company_id, by = %authed.id, "Company listing archived");

    Ok(Json(MessageResponse {
        message: "Company archived successfully.".to_string(),
    }))
}
