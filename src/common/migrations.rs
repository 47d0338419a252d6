// src/common/migrations.rs
//! Database migration and schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations.
///
/// Tables are created if they don't exist. Setting RESET_DB=true drops
/// everything first, which is only meant for local development.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("⚠️  RESET_DB=true - Dropping all tables and recreating schema...");
        drop_all_tables(pool).await?;
    }

    create_user_tables(pool).await?;
    create_profile_tables(pool).await?;
    create_company_tables(pool).await?;
    create_application_tables(pool).await?;
    create_indexes(pool).await?;

    info!("✅ Database migration completed successfully");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Reverse dependency order
    sqlx::query("DROP TABLE IF EXISTS applications")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS companies")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS student_profiles")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(pool)
        .await?;
    Ok(())
}

async fn create_user_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'Student',
            profile_image_url TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_profile_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // tenth_percent / twelfth_percent stay NULL until the student fills them
    // in; NULL means "ineligible for everything", not zero.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS student_profiles (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE,
            student_id TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            department TEXT NOT NULL,
            sgpa REAL NOT NULL DEFAULT 0,
            active_backlogs INTEGER NOT NULL DEFAULT 0,
            phone_number TEXT,
            tenth_percent REAL,
            twelfth_percent REAL,
            resume_url TEXT,
            FOREIGN KEY (user_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_company_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL,
            job_description TEXT NOT NULL,
            min_sgpa REAL NOT NULL DEFAULT 0,
            min_tenth_percent REAL NOT NULL DEFAULT 0,
            min_twelfth_percent REAL NOT NULL DEFAULT 0,
            allowed_departments TEXT NOT NULL DEFAULT '[]',
            allowed_backlogs INTEGER NOT NULL DEFAULT 0,
            application_deadline TEXT NOT NULL,
            posted_by TEXT NOT NULL,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (posted_by) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_application_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            student_user_id TEXT NOT NULL,
            company_id TEXT NOT NULL,
            profile_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Applied',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (student_user_id) REFERENCES users(id),
            FOREIGN KEY (company_id) REFERENCES companies(id),
            FOREIGN KEY (profile_id) REFERENCES student_profiles(id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // One application per (student, company). This index is the authoritative
    // arbiter for concurrent duplicate submissions; the admission service
    // maps its violation to AlreadyApplied.
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_applications_student_company
         ON applications(student_user_id, company_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_applications_company
         ON applications(company_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_companies_archived_deadline
         ON companies(is_archived, application_deadline)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
