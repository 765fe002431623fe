//! APILayer résumé parser backend.
//!
//! The file is forwarded as multipart (`file` field, `apikey` header) and the
//! JSON response is mapped onto [`ParsedResumeFields`]. Only years (and month
//! names when the provider spells them out) are taken from its date strings.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::import::{ResumeParser, UploadedDocument};
use crate::parser::dates::{parse_date_range, PRESENT};
use crate::parser::models::{EducationEntry, WorkExperienceEntry};
use crate::parser::ParsedResumeFields;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiLayerResponse {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ApiLayerExperience>,
    pub education: Vec<ApiLayerEducation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiLayerExperience {
    pub title: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
    pub responsibilities: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiLayerEducation {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub school: Option<String>,
    pub start_date: Option<String>,
    pub graduation_date: Option<String>,
}

pub struct ApiLayerParser {
    client: Client,
    api_key: String,
    url: String,
}

impl ApiLayerParser {
    pub fn new(api_key: String, url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for APILayer")?;
        Ok(Self {
            client,
            api_key,
            url,
        })
    }
}

#[async_trait]
impl ResumeParser for ApiLayerParser {
    async fn parse(&self, document: &UploadedDocument) -> Result<ParsedResumeFields, AppError> {
        info!(
            "Forwarding '{}' ({} bytes) to APILayer",
            document.file_name,
            document.bytes.len()
        );

        let mut part = Part::bytes(document.bytes.to_vec()).file_name(document.file_name.clone());
        if let Some(content_type) = &document.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::Validation(format!("Invalid content type: {e}")))?;
        }

        let response = self
            .client
            .post(&self.url)
            .header("apikey", &self.api_key)
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("APILayer returned {status}: {body}");
            return Err(AppError::Upstream(format!("status {status}: {body}")));
        }

        let payload: ApiLayerResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("unexpected response body: {e}")))?;
        debug!(
            "APILayer returned {} jobs, {} education entries",
            payload.experience.len(),
            payload.education.len()
        );

        Ok(transform_response(payload))
    }

    fn backend_name(&self) -> &'static str {
        "apilayer"
    }
}

/// Maps the provider's response onto the form fields.
pub fn transform_response(response: ApiLayerResponse) -> ParsedResumeFields {
    let full_name = match (&response.first_name, &response.last_name) {
        (None, None) => response.name.clone().unwrap_or_default(),
        (first, last) => format!(
            "{} {}",
            first.as_deref().unwrap_or_default(),
            last.as_deref().unwrap_or_default()
        ),
    };

    let experiences = response
        .experience
        .into_iter()
        .map(|job| {
            let start = parse_date_range(job.start_date.as_deref().unwrap_or_default());
            let (end_month, end_year) = if job.is_current {
                (String::new(), PRESENT.to_string())
            } else {
                let end = parse_date_range(job.end_date.as_deref().unwrap_or_default());
                (end.start_month, end.start_year)
            };
            WorkExperienceEntry {
                job_title: job.title.or(job.position).unwrap_or_default(),
                company: job.company.unwrap_or_default(),
                start_month: start.start_month,
                start_year: start.start_year,
                end_month,
                end_year,
                description: job.description.or(job.responsibilities).unwrap_or_default(),
            }
        })
        .collect();

    let education = response
        .education
        .into_iter()
        .map(|edu| {
            let start = parse_date_range(edu.start_date.as_deref().unwrap_or_default());
            let end = parse_date_range(edu.graduation_date.as_deref().unwrap_or_default());
            EducationEntry {
                degree: edu.degree.unwrap_or_default(),
                school: edu.institution.or(edu.school).unwrap_or_default(),
                start_month: start.start_month,
                start_year: start.start_year,
                end_month: end.start_month,
                end_year: end.start_year,
            }
        })
        .collect();

    ParsedResumeFields {
        full_name: full_name.trim().to_string(),
        email: response.email.unwrap_or_default(),
        phone: response.phone.unwrap_or_default(),
        location: response.location.unwrap_or_default(),
        summary: response.summary.unwrap_or_default(),
        skills: response.skills.join(", "),
        experiences,
        education,
        ..ParsedResumeFields::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_full_response() {
        let raw = serde_json::json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@x.io",
            "phone": "+1 555 123 4567",
            "location": "Austin, TX",
            "summary": "Platform engineer.",
            "skills": ["Rust", "Go", "Terraform"],
            "experience": [
                {
                    "title": "Staff Engineer",
                    "company": "Globex",
                    "start_date": "2021-04-01",
                    "is_current": true,
                    "description": "Owned the platform."
                },
                {
                    "position": "Engineer",
                    "company": "Initech",
                    "start_date": "March 2017",
                    "end_date": "2021-03-15",
                    "responsibilities": "Built APIs."
                }
            ],
            "education": [
                { "degree": "B.S. Computer Science", "institution": "UT Austin", "graduation_date": "2016-05-20" }
            ]
        });
        let response: ApiLayerResponse = serde_json::from_value(raw).unwrap();
        let fields = transform_response(response);

        assert_eq!(fields.full_name, "Jane Doe");
        assert_eq!(fields.location, "Austin, TX");
        assert_eq!(fields.skills, "Rust, Go, Terraform");
        assert_eq!(fields.experiences.len(), 2);
        assert_eq!(fields.experiences[0].job_title, "Staff Engineer");
        assert_eq!(fields.experiences[0].start_year, "2021");
        assert_eq!(fields.experiences[0].end_year, PRESENT);
        assert_eq!(fields.experiences[1].job_title, "Engineer");
        assert_eq!(fields.experiences[1].start_month, "March");
        assert_eq!(fields.experiences[1].start_year, "2017");
        assert_eq!(fields.experiences[1].end_year, "2021");
        assert_eq!(fields.experiences[1].description, "Built APIs.");
        assert_eq!(fields.education[0].school, "UT Austin");
        assert_eq!(fields.education[0].end_year, "2016");
    }

    #[test]
    fn test_transform_sparse_response() {
        let response: ApiLayerResponse =
            serde_json::from_value(serde_json::json!({ "name": "Sam Lee", "skills": [] })).unwrap();
        let fields = transform_response(response);
        assert_eq!(fields.full_name, "Sam Lee");
        assert_eq!(fields.skills, "");
        assert!(fields.experiences.is_empty());
        assert_eq!(fields.to_field_map().len(), 9);
    }

    #[test]
    fn test_transform_first_name_only() {
        let response = ApiLayerResponse {
            first_name: Some("Jane".into()),
            ..Default::default()
        };
        assert_eq!(transform_response(response).full_name, "Jane");
    }
}
