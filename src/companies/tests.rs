//! Tests for companies module
//!
//! Covers listing validation and the JSON department-set round trip.

#[cfg(test)]
mod tests {
    use super::super::models::*;
    use super::super::validators::CompanyValidator;
    use crate::common::Validator;

    fn valid_request() -> CreateCompanyRequest {
        CreateCompanyRequest {
            company_name: "Acme".to_string(),
            job_description: "Graduate engineer, Pune".to_string(),
            min_sgpa: Some(7.0),
            min_tenth_percent: Some(60.0),
            min_twelfth_percent: Some(60.0),
            allowed_departments: vec!["CS".to_string(), "IT".to_string()],
            allowed_backlogs: Some(0),
            application_deadline: "2026-10-01T23:59:59Z".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let result = CompanyValidator.validate(&valid_request());
        assert!(result.is_valid());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut request = valid_request();
        request.company_name = "   ".to_string();
        let result = CompanyValidator.validate(&request);
        assert!(!result.is_valid());
        assert!(result.errors().iter().any(|e| e.field == "company_name"));
    }

    #[test]
    fn test_thresholds_out_of_range_fail() {
        let mut request = valid_request();
        request.min_sgpa = Some(11.0);
        request.min_tenth_percent = Some(-1.0);
        let result = CompanyValidator.validate(&request);
        assert!(result.errors().iter().any(|e| e.field == "min_sgpa"));
        assert!(result
            .errors()
            .iter()
            .any(|e| e.field == "min_tenth_percent"));
    }

    #[test]
    fn test_bad_deadline_fails() {
        let mut request = valid_request();
        request.application_deadline = "next friday".to_string();
        let result = CompanyValidator.validate(&request);
        assert!(result
            .errors()
            .iter()
            .any(|e| e.field == "application_deadline"));
    }

    #[test]
    fn test_empty_department_list_is_allowed_but_blank_names_are_not() {
        // An empty set is a legal (if strict) listing: it admits no one
        let mut request = valid_request();
        request.allowed_departments = vec![];
        assert!(CompanyValidator.validate(&request).is_valid());

        request.allowed_departments = vec!["CS".to_string(), " ".to_string()];
        assert!(!CompanyValidator.validate(&request).is_valid());
    }

    #[test]
    fn test_department_list_round_trip() {
        let company = Company {
            id: "C_TEST01".to_string(),
            company_name: "Acme".to_string(),
            job_description: "desc".to_string(),
            min_sgpa: 0.0,
            min_tenth_percent: 0.0,
            min_twelfth_percent: 0.0,
            allowed_departments: r#"["CS","IT"]"#.to_string(),
            allowed_backlogs: 0,
            application_deadline: "2026-10-01T23:59:59Z".to_string(),
            posted_by: "U_ADMIN1".to_string(),
            is_archived: 0,
            created_at: None,
            updated_at: None,
        };

        assert_eq!(company.department_list(), vec!["CS", "IT"]);

        // Serialized responses carry a real array and a real boolean
        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["allowed_departments"][0], "CS");
        assert_eq!(json["is_archived"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_company_round_trips_through_its_own_serde() {
        let company = Company {
            id: "C_TEST03".to_string(),
            company_name: "Acme".to_string(),
            job_description: "desc".to_string(),
            min_sgpa: 7.0,
            min_tenth_percent: 60.0,
            min_twelfth_percent: 60.0,
            allowed_departments: r#"["CS"]"#.to_string(),
            allowed_backlogs: 0,
            application_deadline: "2026-10-01T23:59:59Z".to_string(),
            posted_by: "U_ADMIN1".to_string(),
            is_archived: 1,
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&company).unwrap();
        assert_eq!(json["is_archived"], serde_json::Value::Bool(true));

        let back: Company = serde_json::from_value(json).unwrap();
        assert_eq!(back.is_archived, 1);
        assert_eq!(back.allowed_departments, r#"["CS"]"#);
    }

    #[test]
    fn test_malformed_stored_departments_degrade_to_empty() {
        let company = Company {
            id: "C_TEST02".to_string(),
            company_name: "Acme".to_string(),
            job_description: "desc".to_string(),
            min_sgpa: 0.0,
            min_tenth_percent: 0.0,
            min_twelfth_percent: 0.0,
            allowed_departments: "not json".to_string(),
            allowed_backlogs: 0,
            application_deadline: "2026-10-01T23:59:59Z".to_string(),
            posted_by: "U_ADMIN1".to_string(),
            is_archived: 0,
            created_at: None,
            updated_at: None,
        };

        // Empty means "admits no one", the conservative direction
        assert!(company.department_list().is_empty());
    }
}
