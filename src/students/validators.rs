use super::models::StudentProfileUpdate;
use crate::common::{ValidationResult, Validator};

pub struct StudentProfileUpdateValidator;

impl Validator<StudentProfileUpdate> for StudentProfileUpdateValidator {
    fn validate(&self, data: &StudentProfileUpdate) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(tenth) = data.tenth_percent {
            if !(0.0..=100.0).contains(&tenth) {
                result.add_error("tenth_percent", "Must be between 0 and 100");
            }
        }

        if let Some(twelfth) = data.twelfth_percent {
            if !(0.0..=100.0).contains(&twelfth) {
                result.add_error("twelfth_percent", "Must be between 0 and 100");
            }
        }

        if let Some(phone) = &data.phone_number {
            if !phone.is_empty() && phone.len() > 20 {
                result.add_error("phone_number", "Must not exceed 20 characters");
            }
        }

        if let Some(url) = &data.resume_url {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(
                    "resume_url",
                    "Must be a valid URL starting with http:// or https://",
                );
            }
        }

        result
    }
}
