use chrono::DateTime;

use super::models::CreateCompanyRequest;
use crate::common::{ValidationResult, Validator};

pub struct CompanyValidator;

impl Validator<CreateCompanyRequest> for CompanyValidator {
    fn validate(&self, data: &CreateCompanyRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.company_name.trim().is_empty() {
            result.add_error("company_name", "Company name is required");
        }
        if data.company_name.len() > 255 {
            result.add_error("company_name", "Company name must not exceed 255 characters");
        }
        if data.job_description.trim().is_empty() {
            result.add_error("job_description", "Job description is required");
        }

        if let Some(sgpa) = data.min_sgpa {
            if !(0.0..=10.0).contains(&sgpa) {
                result.add_error("min_sgpa", "Must be between 0 and 10");
            }
        }
        if let Some(tenth) = data.min_tenth_percent {
            if !(0.0..=100.0).contains(&tenth) {
                result.add_error("min_tenth_percent", "Must be between 0 and 100");
            }
        }
        if let Some(twelfth) = data.min_twelfth_percent {
            if !(0.0..=100.0).contains(&twelfth) {
                result.add_error("min_twelfth_percent", "Must be between 0 and 100");
            }
        }
        if let Some(backlogs) = data.allowed_backlogs {
            if backlogs < 0 {
                result.add_error("allowed_backlogs", "Must not be negative");
            }
        }

        if data
            .allowed_departments
            .iter()
            .any(|d| d.trim().is_empty())
        {
            result.add_error("allowed_departments", "Department names must not be blank");
        }

        if DateTime::parse_from_rfc3339(&data.application_deadline).is_err() {
            result.add_error(
                "application_deadline",
                "Must be an RFC 3339 timestamp, e.g. 2026-10-01T23:59:59Z",
            );
        }

        result
    }
}
