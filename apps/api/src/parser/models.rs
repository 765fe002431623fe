use serde::{Deserialize, Serialize};

/// One job, in document order. `end_year` may be the `Present` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
    /// Newline-joined description lines, bullet glyphs stripped.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
}
