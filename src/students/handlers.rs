//! Student profile handlers

use axum::extract::{Extension, Json, Multipart};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::import;
use super::models::*;
use super::validators::StudentProfileUpdateValidator;
use crate::auth::{AuthedUser, Role};
use crate::common::{ApiError, AppState, Validator};

/// POST /api/students/upload - Bulk import academic records (faculty/admin).
/// Expects a multipart form with the CSV under the `studentFile` key.
pub async fn upload_students(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, ApiError> {
    authed.authorize(&[Role::Faculty, Role::Admin])?;
    let state = state_lock.read().await.clone();

    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        if field.name() == Some("studentFile") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {}", e)))?;
            file_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let Some(bytes) = file_bytes else {
        return Err(ApiError::BadRequest("No file uploaded.".to_string()));
    };

    info!(
        user_id = %authed.id,
        size = bytes.len(),
        "Processing bulk student upload"
    );

    let rows = import::parse_csv(&bytes);
    let summary = import::import_rows(&state.db, rows).await;

    Ok(Json(summary))
}

/// GET /api/students/my-profile - The caller's own profile (students only)
pub async fn get_my_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<StudentProfile>, ApiError> {
    authed.authorize(&[Role::Student])?;
    let state = state_lock.read().await.clone();

    let profile =
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE user_id = ?")
            .bind(&authed.id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| {
                ApiError::NotFound("Profile not found. Please complete your profile.".to_string())
            })?;

    Ok(Json(profile))
}

/// PUT /api/students/my-profile - Update the student-owned subset.
///
/// The request only binds `StudentProfileUpdate`; sgpa, backlogs and
/// department are unreachable from this path by construction.
pub async fn update_my_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<StudentProfileUpdate>,
) -> Result<Json<StudentProfile>, ApiError> {
    authed.authorize(&[Role::Student])?;
    let state = state_lock.read().await.clone();

    let validation = StudentProfileUpdateValidator.validate(&request);
    if !validation.is_valid() {
        return Err(ApiError::from(validation));
    }

    let result = sqlx::query(
        "UPDATE student_profiles
         SET phone_number = COALESCE(?, phone_number),
             tenth_percent = COALESCE(?, tenth_percent),
             twelfth_percent = COALESCE(?, twelfth_percent),
             resume_url = COALESCE(?, resume_url)
         WHERE user_id = ?",
    )
    .bind(request.phone_number.as_deref())
    .bind(request.tenth_percent)
    .bind(request.twelfth_percent)
    .bind(request.resume_url.as_deref())
    .bind(&authed.id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Profile not found.".to_string()));
    }

    let profile =
        sqlx::query_as::<_, StudentProfile>("SELECT * FROM student_profiles WHERE user_id = ?")
            .bind(&authed.id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.id, profile_id = %profile.id, "Student profile updated");

    Ok(Json(profile))
}
