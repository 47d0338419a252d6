//! Shared eligibility evaluation.
//!
//! This is the single definition of the eligibility rules. The admission
//! service runs it as the server-side enforcement check, and the listing feed
//! runs the same code to annotate listings for display, so the two surfaces
//! cannot drift apart. The function is pure: no I/O, no clock, no state.

use serde::Serialize;

use crate::companies::models::Company;
use crate::students::models::StudentProfile;

/// The first rule a profile failed, in evaluation order. Only affects what is
/// reported back to the student; the boolean outcome is the AND of all rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    IncompleteProfile,
    SgpaBelowCutoff,
    TenthBelowCutoff,
    TwelfthBelowCutoff,
    TooManyBacklogs,
    DepartmentNotAllowed,
}

impl IneligibilityReason {
    pub fn message(&self) -> &'static str {
        match self {
            IneligibilityReason::IncompleteProfile => {
                "Complete your 10th and 12th percentages to become eligible"
            }
            IneligibilityReason::SgpaBelowCutoff => "SGPA below the company cutoff",
            IneligibilityReason::TenthBelowCutoff => "10th percentage below the company cutoff",
            IneligibilityReason::TwelfthBelowCutoff => "12th percentage below the company cutoff",
            IneligibilityReason::TooManyBacklogs => "Too many active backlogs",
            IneligibilityReason::DepartmentNotAllowed => "Department not in the allowed list",
        }
    }
}

/// Evaluate a profile against a listing's rules, reporting the first failure.
///
/// Rules, in order:
/// 1. Both board percentages must be present. An unfilled profile can never
///    qualify; absence is not zero.
/// 2. SGPA, 10th and 12th percentages meet their floors (inclusive).
/// 3. Active backlogs within the allowed ceiling (inclusive).
/// 4. Department is an exact, case-sensitive member of the allowed set. An
///    empty set admits no one.
pub fn check(profile: &StudentProfile, company: &Company) -> Result<(), IneligibilityReason> {
    let (tenth, twelfth) = match (profile.tenth_percent, profile.twelfth_percent) {
        (Some(t), Some(tw)) => (t, tw),
        _ => return Err(IneligibilityReason::IncompleteProfile),
    };

    if profile.sgpa < company.min_sgpa {
        return Err(IneligibilityReason::SgpaBelowCutoff);
    }
    if tenth < company.min_tenth_percent {
        return Err(IneligibilityReason::TenthBelowCutoff);
    }
    if twelfth < company.min_twelfth_percent {
        return Err(IneligibilityReason::TwelfthBelowCutoff);
    }
    if profile.active_backlogs > company.allowed_backlogs {
        return Err(IneligibilityReason::TooManyBacklogs);
    }
    if !company
        .department_list()
        .iter()
        .any(|dept| dept == &profile.department)
    {
        return Err(IneligibilityReason::DepartmentNotAllowed);
    }

    Ok(())
}

/// The plain boolean form used by the admission service.
pub fn evaluate(profile: &StudentProfile, company: &Company) -> bool {
    check(profile, company).is_ok()
}
