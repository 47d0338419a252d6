use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::{deserialize_departments, serialize_departments};

// SQLite stores the archived flag as an integer; the API speaks booleans.
fn serialize_int_as_bool<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_bool(*value != 0)
}

fn deserialize_bool_as_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: bool = Deserialize::deserialize(deserializer)?;
    Ok(value as i64)
}

/// A recruiting drive with eligibility thresholds and a deadline.
///
/// Listings are never deleted, only archived; archived listings drop out of
/// the active feed but stay referenced by past applications.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: String,
    pub company_name: String,
    pub job_description: String,
    pub min_sgpa: f64,
    pub min_tenth_percent: f64,
    pub min_twelfth_percent: f64,
    // JSON array of department names, stored as TEXT
    #[serde(serialize_with = "serialize_departments")]
    #[serde(deserialize_with = "deserialize_departments")]
    pub allowed_departments: String,
    pub allowed_backlogs: i64,
    pub application_deadline: String,
    pub posted_by: String,
    #[serde(serialize_with = "serialize_int_as_bool")]
    #[serde(deserialize_with = "deserialize_bool_as_int")]
    pub is_archived: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Company {
    /// The closed set of departments this listing admits. An empty list
    /// admits no one; it is never a wildcard.
    pub fn department_list(&self) -> Vec<String> {
        serde_json::from_str(&self.allowed_departments).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub company_name: String,
    pub job_description: String,
    pub min_sgpa: Option<f64>,
    pub min_tenth_percent: Option<f64>,
    pub min_twelfth_percent: Option<f64>,
    pub allowed_departments: Vec<String>,
    pub allowed_backlogs: Option<i64>,
    pub application_deadline: String,
}

/// Feed entry returned to authenticated callers. For students the advisory
/// eligibility flags are filled in from the shared evaluator; other roles get
/// the bare listing.
#[derive(Debug, Serialize)]
pub struct CompanyFeedItem {
    #[serde(flatten)]
    pub company: Company,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ineligibility_reason: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}
