//! Tests for the auth module
//!
//! These tests cover the pieces with no HTTP surface: role parsing, token
//! issue/decode round trip, and the summary view that strips the hash.

#[cfg(test)]
mod tests {
    use super::super::handlers::{is_self_admin_delete, issue_token};
    use super::super::models::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::Student, Role::Faculty, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("HOD"), None);
        assert_eq!(Role::parse("student"), None); // stored roles are exact
    }

    #[test]
    fn test_issue_token_contains_subject_and_role() {
        let token = issue_token("U_ABC123", "Student", "test-secret").unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, "U_ABC123");
        assert_eq!(decoded.claims.role, "Student");
        assert!(decoded.claims.exp > 0);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token("U_ABC123", "Student", "test-secret").unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_self_admin_delete_guard_parses_the_stored_role() {
        let admin = |id: &str, role: &str| User {
            id: id.to_string(),
            email: "tpo@college.edu".to_string(),
            password_hash: "x".to_string(),
            role: role.to_string(),
            profile_image_url: None,
            created_at: None,
        };

        assert!(is_self_admin_delete(&admin("U_ADMIN1", "Admin"), "U_ADMIN1"));
        // Another admin's account is fair game
        assert!(!is_self_admin_delete(&admin("U_ADMIN2", "Admin"), "U_ADMIN1"));
        // Non-admin targets are guarded by role, not identity
        assert!(!is_self_admin_delete(&admin("U_FAC001", "Faculty"), "U_FAC001"));
        // An unrecognized stored role never matches Admin
        assert!(!is_self_admin_delete(&admin("U_ODD001", "admin"), "U_ODD001"));
    }

    #[test]
    fn test_user_summary_never_carries_the_hash() {
        let user = User {
            id: "U_ABC123".to_string(),
            email: "student@college.edu".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: "Student".to_string(),
            profile_image_url: None,
            created_at: Some("2026-01-01 00:00:00".to_string()),
        };

        let summary = UserSummary::from(user);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("student@college.edu"));
    }
}
