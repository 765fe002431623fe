//! Advisory field checks for saved résumé data. Problems are reported next to
//! the saved row; they never block a save.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::dates::{MONTHS, PRESENT};
use crate::resumes::field;

static EMAIL_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email shape regex"));

const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Keys of one repeatable group, as `(key prefix, required label)` pairs plus its date keys.
struct GroupShape {
    required: &'static [(&'static str, &'static str)],
    start_month: &'static str,
    start_year: &'static str,
    end_month: &'static str,
    end_year: &'static str,
}

const WORK_GROUP: GroupShape = GroupShape {
    required: &[("jobTitle", "Job title"), ("company", "Company name")],
    start_month: "startMonth",
    start_year: "startYear",
    end_month: "endMonth",
    end_year: "endYear",
};

const EDUCATION_GROUP: GroupShape = GroupShape {
    required: &[("degree", "Degree"), ("school", "School name")],
    start_month: "educationStartMonth",
    start_year: "educationStartYear",
    end_month: "educationEndMonth",
    end_year: "educationEndYear",
};

pub fn validate_resume_fields(data: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match field(data, "fullName") {
        None => errors.push(FieldError::new("fullName", "Full name is required")),
        Some(name) if name.chars().count() < MIN_NAME_LEN => errors.push(FieldError::new(
            "fullName",
            format!("Full name must be at least {MIN_NAME_LEN} characters"),
        )),
        Some(_) => {}
    }

    match field(data, "email") {
        None => errors.push(FieldError::new("email", "Email is required")),
        Some(email) if !EMAIL_SHAPE_RE.is_match(email) => {
            errors.push(FieldError::new("email", "Please enter a valid email address"))
        }
        Some(_) => {}
    }

    if let Some(phone) = field(data, "phone") {
        if phone.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
            errors.push(FieldError::new("phone", "Please enter a valid phone number"));
        }
    }

    for key in ["linkedin", "portfolio"] {
        if let Some(url) = field(data, key) {
            if Url::parse(url).is_err() {
                errors.push(FieldError::new(key, format!("Please enter a valid {key}")));
            }
        }
    }

    validate_groups(data, &WORK_GROUP, &mut errors);
    validate_groups(data, &EDUCATION_GROUP, &mut errors);
    errors
}

/// A group `i` exists while any of its required keys is filled.
fn validate_groups(data: &Value, shape: &GroupShape, errors: &mut Vec<FieldError>) {
    for i in 0.. {
        let keys: Vec<(String, &str)> = shape
            .required
            .iter()
            .map(|(prefix, label)| (format!("{prefix}_{i}"), *label))
            .collect();
        if keys.iter().all(|(key, _)| field(data, key).is_none()) {
            break;
        }

        for (key, label) in &keys {
            if field(data, key).is_none() {
                errors.push(FieldError::new(key.clone(), format!("{label} is required")));
            }
        }

        let start = month_year(data, shape.start_month, shape.start_year, i);
        let end_year_key = format!("{}_{i}", shape.end_year);
        let ongoing = field(data, &end_year_key).is_some_and(|y| y.eq_ignore_ascii_case(PRESENT));
        let end = month_year(data, shape.end_month, shape.end_year, i);
        if let (Some(start), Some(end), false) = (start, end, ongoing) {
            if end < start {
                errors.push(FieldError::new(
                    end_year_key,
                    "End date must be after start date",
                ));
            }
        }
    }
}

/// `(year, month index)` for ordering; a missing or unknown month counts as January.
fn month_year(data: &Value, month_key: &str, year_key: &str, i: usize) -> Option<(i32, usize)> {
    let year = field(data, &format!("{year_key}_{i}"))?.parse::<i32>().ok()?;
    let month = field(data, &format!("{month_key}_{i}"))
        .and_then(|m| MONTHS.iter().position(|name| name.eq_ignore_ascii_case(m)))
        .unwrap_or(0);
    Some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields_with_errors(data: Value) -> Vec<String> {
        validate_resume_fields(&data)
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_clean_resume_has_no_errors() {
        let data = json!({
            "fullName": "Jane Doe",
            "email": "jane@x.io",
            "phone": "(555) 123-4567",
            "linkedin": "https://linkedin.com/in/janedoe",
            "jobTitle_0": "Engineer",
            "company_0": "Acme",
            "startMonth_0": "March",
            "startYear_0": "2019",
            "endYear_0": "Present",
            "degree_0": "B.S.",
            "school_0": "MIT",
            "educationEndYear_0": "2014",
        });
        assert!(validate_resume_fields(&data).is_empty());
    }

    #[test]
    fn test_required_scalars() {
        assert_eq!(fields_with_errors(json!({})), ["fullName", "email"]);
        let errors = validate_resume_fields(&json!({ "fullName": "J", "email": "nope" }));
        assert!(errors[0].message.contains("at least 2"));
        assert_eq!(errors[1].message, "Please enter a valid email address");
    }

    #[test]
    fn test_short_phone_and_bad_url() {
        let data = json!({
            "fullName": "Jane Doe",
            "email": "jane@x.io",
            "phone": "555-1234",
            "portfolio": "janedoe dot dev",
        });
        assert_eq!(fields_with_errors(data), ["phone", "portfolio"]);
    }

    #[test]
    fn test_incomplete_groups() {
        let data = json!({
            "fullName": "Jane Doe",
            "email": "jane@x.io",
            "jobTitle_0": "Engineer",
            "company_1": "Initech",
            "school_0": "MIT",
        });
        assert_eq!(fields_with_errors(data), ["company_0", "jobTitle_1", "degree_0"]);
    }

    #[test]
    fn test_reversed_dates_flagged() {
        let data = json!({
            "fullName": "Jane Doe",
            "email": "jane@x.io",
            "jobTitle_0": "Engineer",
            "company_0": "Acme",
            "startMonth_0": "June",
            "startYear_0": "2020",
            "endMonth_0": "January",
            "endYear_0": "2020",
        });
        assert_eq!(fields_with_errors(data), ["endYear_0"]);
    }

    #[test]
    fn test_present_end_never_flagged() {
        let data = json!({
            "fullName": "Jane Doe",
            "email": "jane@x.io",
            "degree_0": "PhD",
            "school_0": "MIT",
            "educationStartYear_0": "2022",
            "educationEndYear_0": "present",
        });
        assert!(validate_resume_fields(&data).is_empty());
    }
}
