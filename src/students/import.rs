//! Bulk student import.
//!
//! Coordinators upload a CSV of academic records. Each row either fully
//! succeeds or is fully skipped (one transaction per row); the batch never
//! aborts on a bad row. Rows run sequentially so the created/updated/error
//! counters stay exact.
//!
//! Existing profiles are matched by their external student identifier and
//! only the HOD-owned fields are touched; whatever the student has filled in
//! themselves (phone, percentages, resume) is left alone.

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::models::{HodProfileUpdate, ImportSummary, StudentImportRow};
use crate::auth::Role;
use crate::common::{generate_profile_id, generate_user_id, safe_email_log};

/// Default credential for accounts the import creates. Documented to
/// coordinators; students must change it on first login.
pub const DEFAULT_STUDENT_PASSWORD: &str = "changeme123";

/// Parse the uploaded CSV. Rows that fail to deserialize at all (wrong types,
/// ragged columns) come back as `Err` placeholders so they count as errors.
pub fn parse_csv(bytes: &[u8]) -> Vec<Result<StudentImportRow, csv::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    reader.deserialize::<StudentImportRow>().collect()
}

fn required_fields(row: &StudentImportRow) -> Option<(String, String, String, String)> {
    let student_id = row.student_id.as_deref()?.trim();
    let full_name = row.full_name.as_deref()?.trim();
    let email = row.email.as_deref()?.trim();
    let department = row.department.as_deref()?.trim();
    if student_id.is_empty() || full_name.is_empty() || email.is_empty() || department.is_empty() {
        return None;
    }
    Some((
        student_id.to_string(),
        full_name.to_string(),
        email.to_lowercase(),
        department.to_string(),
    ))
}

/// Apply a parsed batch. Never fails as a whole; per-row failures are
/// reported through the summary counters.
pub async fn import_rows(
    pool: &SqlitePool,
    rows: Vec<Result<StudentImportRow, csv::Error>>,
) -> ImportSummary {
    let mut created = 0usize;
    let mut updated = 0usize;
    let mut errors = 0usize;

    // Every created account gets the same default credential; hash it once
    // per batch, and only if some row actually needs it.
    let mut default_hash: Option<String> = None;

    for (index, row) in rows.into_iter().enumerate() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping unparseable import row");
                errors += 1;
                continue;
            }
        };

        let Some((student_id, full_name, email, department)) = required_fields(&row) else {
            warn!(row = index + 1, "Skipping import row with missing required fields");
            errors += 1;
            continue;
        };

        let hod_fields = HodProfileUpdate {
            full_name,
            department,
            sgpa: row.sgpa.unwrap_or(0.0),
            active_backlogs: row.active_backlogs.unwrap_or(0),
        };

        let hash = match &default_hash {
            Some(h) => h.clone(),
            None => match bcrypt::hash(DEFAULT_STUDENT_PASSWORD, bcrypt::DEFAULT_COST) {
                Ok(h) => {
                    default_hash = Some(h.clone());
                    h
                }
                Err(e) => {
                    warn!(error = %e, "Failed to hash default credential; row skipped");
                    errors += 1;
                    continue;
                }
            },
        };

        match apply_row(pool, &student_id, &email, &hod_fields, &hash).await {
            Ok(RowOutcome::Created) => created += 1,
            Ok(RowOutcome::Updated) => updated += 1,
            Err(e) => {
                warn!(
                    row = index + 1,
                    student_id = %student_id,
                    email = %safe_email_log(&email),
                    error = %e,
                    "Import row failed"
                );
                errors += 1;
            }
        }
    }

    info!(created, updated, errors, "Bulk student import finished");

    ImportSummary {
        message: "File processed successfully.".to_string(),
        created,
        updated,
        errors,
    }
}

enum RowOutcome {
    Created,
    Updated,
}

/// One row, one transaction: the account lookup/create and the profile
/// write land together or not at all.
async fn apply_row(
    pool: &SqlitePool,
    student_id: &str,
    email: &str,
    hod_fields: &HodProfileUpdate,
    default_hash: &str,
) -> Result<RowOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let user_id: Option<String> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *tx)
        .await?;

    let user_id = match user_id {
        Some(id) => id,
        None => {
            let id = generate_user_id();
            sqlx::query(
                "INSERT INTO users (id, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, datetime('now'))",
            )
            .bind(&id)
            .bind(email)
            .bind(default_hash)
            .bind(Role::Student.as_str())
            .execute(&mut *tx)
            .await?;
            id
        }
    };

    let existing_profile: Option<String> =
        sqlx::query_scalar("SELECT id FROM student_profiles WHERE student_id = ?")
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?;

    let outcome = match existing_profile {
        Some(profile_id) => {
            // HOD-owned fields only; student-owned columns are not named here
            sqlx::query(
                "UPDATE student_profiles
                 SET full_name = ?, department = ?, sgpa = ?, active_backlogs = ?
                 WHERE id = ?",
            )
            .bind(&hod_fields.full_name)
            .bind(&hod_fields.department)
            .bind(hod_fields.sgpa)
            .bind(hod_fields.active_backlogs)
            .bind(&profile_id)
            .execute(&mut *tx)
            .await?;
            RowOutcome::Updated
        }
        None => {
            sqlx::query(
                "INSERT INTO student_profiles
                 (id, user_id, student_id, full_name, department, sgpa, active_backlogs)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(generate_profile_id())
            .bind(&user_id)
            .bind(student_id)
            .bind(&hod_fields.full_name)
            .bind(&hod_fields.department)
            .bind(hod_fields.sgpa)
            .bind(hod_fields.active_backlogs)
            .execute(&mut *tx)
            .await?;
            RowOutcome::Created
        }
    };

    tx.commit().await?;
    Ok(outcome)
}
