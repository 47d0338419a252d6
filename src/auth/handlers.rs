//! Authentication and account-management handlers

use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::*;
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};

/// Token lifetime matches the session length students expect from the portal
const TOKEN_LIFETIME_HOURS: i64 = 1;

/// Sign an HS256 token for a user
pub fn issue_token(user_id: &str, role: &str, secret: &str) -> Result<String, ApiError> {
    let exp = (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalServer(format!("failed to sign token: {}", e)))
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ApiError::InternalServer(format!("failed to hash password: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

/// POST /api/auth/register - Create a login account
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::ValidationError(
            "email: a valid email address is required".to_string(),
        ));
    }
    if request.password.len() < 6 {
        return Err(ApiError::ValidationError(
            "password: must be at least 6 characters".to_string(),
        ));
    }
    let role = match &request.role {
        Some(r) => Role::parse(r)
            .ok_or_else(|| ApiError::ValidationError(format!("role: unknown role '{}'", r)))?,
        None => Role::Student,
    };

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&email)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if existing > 0 {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let user_id = generate_user_id();
    let password_hash = hash_password(&request.password)?;

    let insert = sqlx::query(
        "INSERT INTO users (id, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, datetime('now'))",
    )
    .bind(&user_id)
    .bind(&email)
    .bind(&password_hash)
    .bind(role.as_str())
    .execute(&state.db)
    .await;

    if let Err(e) = insert {
        // Concurrent registration for the same email past the pre-check
        if let sqlx::Error::Database(db) = &e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Err(ApiError::BadRequest("User already exists".to_string()));
            }
        }
        return Err(ApiError::DatabaseError(e));
    }

    info!(
        user_id = %user_id,
        email = %safe_email_log(&email),
        role = %role,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let email = request.email.trim().to_lowercase();
    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // Same message whether the account or the password is wrong
    let user = match user {
        Some(u) if verify_password(&request.password, &u.password_hash) => u,
        _ => {
            warn!(email = %safe_email_log(&email), "Login failed: invalid credentials");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    let token = issue_token(&user.id, &user.role, &state.jwt_secret)?;

    info!(user_id = %user.id, email = %safe_email_log(&user.email), "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/change-password - Authenticated password change.
/// Also how imported students replace the documented default credential.
pub async fn change_password(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if request.old_password.is_empty() || request.new_password.is_empty() {
        return Err(ApiError::BadRequest(
            "Please provide old and new passwords.".to_string(),
        ));
    }
    if request.new_password.len() < 6 {
        return Err(ApiError::ValidationError(
            "new_password: must be at least 6 characters".to_string(),
        ));
    }

    let user: User = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    if !verify_password(&request.old_password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid old password.".to_string()));
    }

    let new_hash = hash_password(&request.new_password)?;
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(&new_hash)
        .bind(&authed.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = %authed.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password changed successfully.".to_string(),
    }))
}

/// GET /api/auth/users - List faculty/admin accounts (admin only)
pub async fn list_staff_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    authed.authorize(&[Role::Admin])?;
    let state = state_lock.read().await.clone();

    let users: Vec<User> = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE role != 'Student' ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// An admin may not remove their own account; the last admin locking
/// everyone out is not a state the portal can recover from.
pub(super) fn is_self_admin_delete(target: &User, authed_id: &str) -> bool {
    Role::parse(&target.role) == Some(Role::Admin) && target.id == authed_id
}

/// DELETE /api/auth/users/:id - Remove an account (admin only)
pub async fn delete_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    authed.authorize(&[Role::Admin])?;
    let state = state_lock.read().await.clone();

    let target: User = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    if is_self_admin_delete(&target, &authed.id) {
        return Err(ApiError::Forbidden(
            "Cannot delete your own Admin account.".to_string(),
        ));
    }

    let delete = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user_id)
        .execute(&state.db)
        .await;

    if let Err(e) = delete {
        // Accounts referenced by profiles or applications stay put
        if let sqlx::Error::Database(db) = &e {
            if matches!(db.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) {
                return Err(ApiError::BadRequest(
                    "User has linked records and cannot be deleted.".to_string(),
                ));
            }
        }
        return Err(ApiError::DatabaseError(e));
    }

    info!(deleted_user_id = %user_id, by = %authed.id, "User deleted");

    Ok(Json(MessageResponse {
        message: "User deleted successfully.".to_string(),
    }))
}
