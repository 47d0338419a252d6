//! Tests for the admission path
//!
//! Run against an in-memory SQLite database so the unique-constraint
//! behavior under duplicates is the real thing, not a mock.

#[cfg(test)]
mod tests {
    use super::super::service::{submit_application, AdmissionError};
    use crate::common::migrations::run_migrations;
    use futures::future::join_all;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations");
        pool
    }

    async fn seed_user(pool: &SqlitePool, id: &str, email: &str, role: &str) {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, role) VALUES (?, ?, 'x', ?)",
        )
        .bind(id)
        .bind(email)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
    }

    #[allow(clippy::too_many_arguments)]
    async fn seed_profile(
        pool: &SqlitePool,
        id: &str,
        user_id: &str,
        department: &str,
        sgpa: f64,
        backlogs: i64,
        tenth: Option<f64>,
        twelfth: Option<f64>,
    ) {
        sqlx::query(
            "INSERT INTO student_profiles
             (id, user_id, student_id, full_name, department, sgpa, active_backlogs,
              tenth_percent, twelfth_percent)
             VALUES (?, ?, ?, 'Test Student', ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(format!("SID-{}", id))
        .bind(department)
        .bind(sgpa)
        .bind(backlogs)
        .bind(tenth)
        .bind(twelfth)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_company(pool: &SqlitePool, id: &str, departments: &[&str]) {
        // The posting admin must exist; foreign keys are on
        sqlx::query(
            "INSERT OR IGNORE INTO users (id, email, password_hash, role)
             VALUES ('U_ADMIN1', 'tpo@college.edu', 'x', 'Admin')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO companies
             (id, company_name, job_description, min_sgpa, min_tenth_percent,
              min_twelfth_percent, allowed_departments, allowed_backlogs,
              application_deadline, posted_by)
             VALUES (?, 'Acme', 'Graduate engineer', 8.0, 80.0, 80.0, ?, 0,
                     '2026-12-31T23:59:59Z', 'U_ADMIN1')",
        )
        .bind(id)
        .bind(serde_json::to_string(departments).unwrap())
        .execute(pool)
        .await
        .unwrap();
    }

    async fn application_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_eligible_submission_creates_application() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        seed_company(&pool, "C_ACME01", &["CS", "IT"]).await;

        let application = submit_application(&pool, "U_STUD01", "C_ACME01")
            .await
            .unwrap();

        assert_eq!(application.student_user_id, "U_STUD01");
        assert_eq!(application.company_id, "C_ACME01");
        assert_eq!(application.profile_id, "P_STUD01");
        assert_eq!(application.status, "Applied");
        assert_eq!(application_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_second_sequential_submission_is_already_applied() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;

        submit_application(&pool, "U_STUD01", "C_ACME01")
            .await
            .unwrap();
        let second = submit_application(&pool, "U_STUD01", "C_ACME01").await;

        assert!(matches!(second, Err(AdmissionError::AlreadyApplied)));
        assert_eq!(application_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_admit_exactly_one() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;

        let attempts = (0..8).map(|_| {
            let pool = pool.clone();
            async move { submit_application(&pool, "U_STUD01", "C_ACME01").await }
        });
        let results = join_all(attempts).await;

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(AdmissionError::AlreadyApplied)))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(application_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_ineligible_profile_is_refused() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        // Wrong department for the listing
        seed_profile(&pool, "P_STUD01", "U_STUD01", "Mechanical", 9.0, 0, Some(95.0), Some(95.0))
            .await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;

        let result = submit_application(&pool, "U_STUD01", "C_ACME01").await;
        assert!(matches!(result, Err(AdmissionError::NotEligible)));
        assert_eq!(application_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_incomplete_profile_is_refused() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 9.0, 0, None, None).await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;

        let result = submit_application(&pool, "U_STUD01", "C_ACME01").await;
        assert!(matches!(result, Err(AdmissionError::NotEligible)));
    }

    #[tokio::test]
    async fn test_missing_company_and_missing_profile_are_not_found() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;

        // No profile yet
        let result = submit_application(&pool, "U_STUD01", "C_NOPE01").await;
        assert!(matches!(result, Err(AdmissionError::NotFound(_))));

        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        let result = submit_application(&pool, "U_STUD01", "C_NOPE01").await;
        assert!(matches!(result, Err(AdmissionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_two_students_can_apply_to_the_same_company() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_user(&pool, "U_STUD02", "vikram@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        seed_profile(&pool, "P_STUD02", "U_STUD02", "CS", 8.2, 0, Some(88.0), Some(82.0)).await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;

        submit_application(&pool, "U_STUD01", "C_ACME01")
            .await
            .unwrap();
        submit_application(&pool, "U_STUD02", "C_ACME01")
            .await
            .unwrap();
        assert_eq!(application_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn test_one_student_can_apply_to_two_companies() {
        let pool = test_pool().await;
        seed_user(&pool, "U_STUD01", "asha@college.edu", "Student").await;
        seed_profile(&pool, "P_STUD01", "U_STUD01", "CS", 8.5, 0, Some(90.0), Some(85.0)).await;
        seed_company(&pool, "C_ACME01", &["CS"]).await;
        seed_company(&pool, "C_BETA01", &["CS"]).await;

        submit_application(&pool, "U_STUD01", "C_ACME01")
            .await
            .unwrap();
        submit_application(&pool, "U_STUD01", "C_BETA01")
            .await
            .unwrap();
        assert_eq!(application_count(&pool).await, 2);
    }
}
