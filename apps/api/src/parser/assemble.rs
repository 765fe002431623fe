use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::parser::contacts::ContactInfo;
use crate::parser::header::HeaderFields;
use crate::parser::models::{EducationEntry, WorkExperienceEntry};

/// Extraction result in the form layer's vocabulary.
///
/// Serializes as one flat object: the scalar keys are always present (empty
/// string when nothing was found), and every experience / education entry
/// contributes a contiguous `_i`-suffixed key group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResumeFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub title: String,
    pub summary: String,
    pub skills: String,
    pub experiences: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl ParsedResumeFields {
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (key, value) in [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
            ("linkedin", &self.linkedin),
            ("portfolio", &self.portfolio),
            ("title", &self.title),
            ("summary", &self.summary),
            ("skills", &self.skills),
        ] {
            map.insert(key.to_string(), value.clone());
        }

        for (i, job) in self.experiences.iter().enumerate() {
            for (key, value) in [
                ("jobTitle", &job.job_title),
                ("company", &job.company),
                ("startMonth", &job.start_month),
                ("startYear", &job.start_year),
                ("endMonth", &job.end_month),
                ("endYear", &job.end_year),
                ("jobDescription", &job.description),
            ] {
                map.insert(format!("{key}_{i}"), value.clone());
            }
        }

        for (i, edu) in self.education.iter().enumerate() {
            for (key, value) in [
                ("degree", &edu.degree),
                ("school", &edu.school),
                ("educationStartMonth", &edu.start_month),
                ("educationStartYear", &edu.start_year),
                ("educationEndMonth", &edu.end_month),
                ("educationEndYear", &edu.end_year),
            ] {
                map.insert(format!("{key}_{i}"), value.clone());
            }
        }

        map
    }
}

impl Serialize for ParsedResumeFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_field_map().serialize(serializer)
    }
}

/// Combines the extractor outputs. Absent values collapse to `""`.
pub fn assemble(
    contacts: ContactInfo,
    header: HeaderFields,
    location: Option<String>,
    summary: Option<String>,
    skills: Option<String>,
    experiences: Vec<WorkExperienceEntry>,
    education: Vec<EducationEntry>,
) -> ParsedResumeFields {
    ParsedResumeFields {
        full_name: header.full_name.unwrap_or_default(),
        email: contacts.email.unwrap_or_default(),
        phone: contacts.phone.unwrap_or_default(),
        location: location.unwrap_or_default(),
        linkedin: contacts.linkedin.unwrap_or_default(),
        portfolio: contacts.portfolio.unwrap_or_default(),
        title: header.title.unwrap_or_default(),
        summary: summary.unwrap_or_default(),
        skills: skills.unwrap_or_default(),
        experiences,
        education,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALAR_KEYS: [&str; 9] = [
        "fullName",
        "email",
        "phone",
        "location",
        "linkedin",
        "portfolio",
        "title",
        "summary",
        "skills",
    ];

    #[test]
    fn test_empty_result_has_every_scalar_key() {
        let fields = assemble(
            ContactInfo::default(),
            HeaderFields::default(),
            None,
            None,
            None,
            Vec::new(),
            Vec::new(),
        );
        let map = fields.to_field_map();
        assert_eq!(map.len(), SCALAR_KEYS.len());
        for key in SCALAR_KEYS {
            assert_eq!(map.get(key).map(String::as_str), Some(""), "{key}");
        }
    }

    #[test]
    fn test_indexed_groups_are_contiguous() {
        let job = |title: &str| WorkExperienceEntry {
            job_title: title.into(),
            company: "Acme".into(),
            end_year: "Present".into(),
            ..Default::default()
        };
        let fields = assemble(
            ContactInfo {
                email: Some("jane@x.io".into()),
                ..Default::default()
            },
            HeaderFields {
                full_name: Some("Jane Doe".into()),
                title: None,
            },
            None,
            None,
            None,
            vec![job("Engineer"), job("Lead")],
            vec![EducationEntry {
                degree: "B.S.".into(),
                school: "MIT".into(),
                end_year: "2012".into(),
                ..Default::default()
            }],
        );
        let map = fields.to_field_map();
        assert_eq!(map["fullName"], "Jane Doe");
        assert_eq!(map["email"], "jane@x.io");
        assert_eq!(map["jobTitle_0"], "Engineer");
        assert_eq!(map["jobTitle_1"], "Lead");
        assert_eq!(map["endYear_1"], "Present");
        assert!(map.contains_key("jobDescription_1"));
        assert!(!map.contains_key("jobTitle_2"));
        assert_eq!(map["degree_0"], "B.S.");
        assert_eq!(map["educationEndYear_0"], "2012");
        assert_eq!(map.len(), 9 + 2 * 7 + 6);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let fields = ParsedResumeFields {
            full_name: "Jane Doe".into(),
            experiences: vec![WorkExperienceEntry {
                job_title: "Engineer".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["jobTitle_0"], "Engineer");
        assert_eq!(json["summary"], "");
        assert!(json.get("experiences").is_none());
    }
}
