use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resumes::{count_groups, field};

/// Completion counts toward these four scalars plus one work and one education group.
const REQUIRED_FIELDS: &[&str] = &["fullName", "email", "summary", "skills"];
const CHECKPOINTS: usize = REQUIRED_FIELDS.len() + 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeStats {
    pub work_experiences: usize,
    pub education: usize,
    pub certifications: usize,
    pub has_skills: bool,
    pub has_summary: bool,
    /// 0–100.
    pub completion: u8,
    /// Exportable: name, email, and at least one work or education group.
    pub is_valid: bool,
}

pub fn compute_resume_stats(data: &Value) -> ResumeStats {
    let work_complete = field(data, "jobTitle_0").is_some() && field(data, "company_0").is_some();
    let education_complete = field(data, "degree_0").is_some() && field(data, "school_0").is_some();

    let completed = REQUIRED_FIELDS
        .iter()
        .filter(|key| field(data, key).is_some())
        .count()
        + usize::from(work_complete)
        + usize::from(education_complete);
    let completion = (completed as f64 * 100.0 / CHECKPOINTS as f64).round() as u8;

    ResumeStats {
        work_experiences: count_groups(data, "jobTitle"),
        education: count_groups(data, "degree"),
        certifications: count_groups(data, "certificationName"),
        has_skills: field(data, "skills").is_some(),
        has_summary: field(data, "summary").is_some(),
        completion,
        is_valid: field(data, "fullName").is_some()
            && field(data, "email").is_some()
            && (work_complete || education_complete),
    }
}
