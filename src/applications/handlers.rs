//! Application handlers

use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::*;
use super::service;
use crate::auth::{AuthedUser, Role};
use crate::common::{ApiError, AppState};

/// POST /api/applications/:company_id - Apply to a company (students only)
pub async fn submit_application(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<(StatusCode, Json<SubmitApplicationResponse>), ApiError> {
    authed.authorize(&[Role::Student])?;
    let state = state_lock.read().await.clone();

    let application = service::submit_application(&state.db, &authed.id, &company_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            message: "Application submitted successfully!".to_string(),
            application,
        }),
    ))
}

/// GET /api/applications/my-applications - The caller's applications with
/// the company summary joined in (students only)
pub async fn get_my_applications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<MyApplication>>, ApiError> {
    authed.authorize(&[Role::Student])?;
    let state = state_lock.read().await.clone();

    let applications = sqlx::query_as::<_, MyApplication>(
        r#"
        SELECT a.id, a.company_id, a.status, a.created_at,
               c.company_name, c.job_description
        FROM applications a
        LEFT JOIN companies c ON a.company_id = c.id
        WHERE a.student_user_id = ?
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(&authed.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(applications))
}

/// GET /api/applications/:company_id/applicants - Review table for a
/// listing: applications joined with student email and profile snapshot
/// (faculty/admin only)
pub async fn get_company_applicants(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(company_id): Path<String>,
) -> Result<Json<Vec<ApplicantRecord>>, ApiError> {
    authed.authorize(&[Role::Faculty, Role::Admin])?;
    let state = state_lock.read().await.clone();

    let applicants = sqlx::query_as::<_, ApplicantRecord>(
        r#"
        SELECT a.id AS application_id, a.status, a.created_at,
               u.email AS student_email,
               p.student_id, p.full_name, p.department, p.sgpa, p.active_backlogs,
               p.tenth_percent, p.twelfth_percent, p.phone_number, p.resume_url
        FROM applications a
        LEFT JOIN users u ON a.student_user_id = u.id
        LEFT JOIN student_profiles p ON a.profile_id = p.id
        WHERE a.company_id = ?
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(&company_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(applicants))
}

/// PATCH /api/applications/:id/status - Review an application
/// (faculty/admin only). Review moves an application to Shortlisted or
/// Rejected; it never deletes one.
pub async fn update_application_status(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(application_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Application>, ApiError> {
    authed.authorize(&[Role::Faculty, Role::Admin])?;
    let state = state_lock.read().await.clone();

    let status = ApplicationStatus::parse(&request.status).ok_or_else(|| {
        ApiError::ValidationError(format!("status: unknown status '{}'", request.status))
    })?;
    if status == ApplicationStatus::Applied {
        return Err(ApiError::BadRequest(
            "Applications cannot be moved back to Applied.".to_string(),
        ));
    }

    let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(&application_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Application not found.".to_string()));
    }

    let application = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(&application_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        application_id = %application_id,
        new_status = %application.status,
        changed_by = %authed.id,
        "Application status updated"
    );

    Ok(Json(application))
}
