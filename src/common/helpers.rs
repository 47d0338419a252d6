// Helper functions for safe logging and serialization

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Masks email addresses for safe logging.
/// Keeps the first character of the local part and the full domain.
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => "***@***.***".to_string(),
        },
        _ => "***@***.***".to_string(),
    }
}

/// Serializes a department list stored as a JSON text column into a proper
/// array for API responses. Malformed stored text degrades to an empty list.
pub fn serialize_departments<S>(departments: &String, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let depts: Vec<String> = serde_json::from_str(departments).unwrap_or_default();
    depts.serialize(serializer)
}

/// Deserializes a department array into the JSON text stored in the database.
pub fn deserialize_departments<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let depts: Vec<String> = Vec::deserialize(deserializer)?;
    serde_json::to_string(&depts).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log_masks_local_part() {
        assert_eq!(safe_email_log("student@college.edu"), "s***@college.edu");
    }

    #[test]
    fn test_safe_email_log_keeps_multibyte_first_char_whole() {
        // A one-character local part must not be sliced mid-codepoint
        assert_eq!(safe_email_log("é@college.edu"), "é***@college.edu");
        assert_eq!(safe_email_log("über@college.edu"), "ü***@college.edu");
    }

    #[test]
    fn test_safe_email_log_handles_garbage() {
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
        assert_eq!(safe_email_log("@nodomainlocal"), "***@***.***");
    }
}
