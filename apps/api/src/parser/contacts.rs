//! Contact extraction. Regex scans over the whole raw text.
//!
//! Contact tokens are often split oddly by line wrapping in the source document,
//! so these run against the full blob rather than the line sequence.

use std::sync::LazyLock;

use regex::Regex;

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[ .-]?)?(?:\(\d{3}\)|\d{3})[ .-]?\d{3}[ .-]?\d{4}")
        .expect("valid phone regex")
});

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9_%-]+")
        .expect("valid linkedin regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:https?://|www\.)[^\s|,;<>()"']+"#).expect("valid url regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

pub fn extract_contacts(raw_text: &str) -> ContactInfo {
    ContactInfo {
        email: extract_email(raw_text),
        phone: extract_phone(raw_text),
        linkedin: extract_linkedin(raw_text),
        portfolio: extract_portfolio(raw_text),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

pub fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE
        .find(text)
        .map(|m| with_https_scheme(m.as_str()))
}

/// First http(s)/www URL that is not a LinkedIn profile.
pub fn extract_portfolio(text: &str) -> Option<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']))
        .find(|url| !url.to_lowercase().contains("linkedin"))
        .map(with_https_scheme)
}

fn with_https_scheme(url: &str) -> String {
    if url.to_lowercase().starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// True when the line matches the email or phone pattern.
pub fn is_email_or_phone(line: &str) -> bool {
    EMAIL_RE.is_match(line) || PHONE_RE.is_match(line)
}

/// Broader contact check used by title and paragraph detection: also rejects
/// stray `@` handles and any `http` link.
pub fn looks_like_contact(line: &str) -> bool {
    is_email_or_phone(line) || line.contains('@') || line.to_lowercase().contains("http")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_email_extracted_exactly() {
        let c = extract_contacts("Reach me: jane.doe@example.com any time");
        assert_eq!(c.email.as_deref(), Some("jane.doe@example.com"));
    }

    #[test]
    fn test_first_email_wins() {
        let c = extract_contacts("a@first.io\nb@second.io");
        assert_eq!(c.email.as_deref(), Some("a@first.io"));
    }

    #[test]
    fn test_phone_with_parenthesised_area_code() {
        let c = extract_contacts("Phone: (555) 123-4567");
        assert_eq!(c.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_phone_with_country_code_and_dots() {
        assert_eq!(
            extract_phone("call +1 555.123.4567 now").as_deref(),
            Some("+1 555.123.4567")
        );
        assert_eq!(extract_phone("5551234567").as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        assert_eq!(extract_phone("2019 - 2021, 42 projects"), None);
    }

    #[test]
    fn test_linkedin_without_scheme_gets_https() {
        let c = extract_contacts("linkedin.com/in/janedoe");
        assert_eq!(
            c.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn test_linkedin_with_scheme_kept() {
        let c = extract_contacts("see https://www.linkedin.com/in/jane-doe-42 for more");
        assert_eq!(
            c.linkedin.as_deref(),
            Some("https://www.linkedin.com/in/jane-doe-42")
        );
    }

    #[test]
    fn test_portfolio_skips_linkedin_urls() {
        let text = "https://www.linkedin.com/in/jane | www.janedoe.dev";
        let c = extract_contacts(text);
        assert_eq!(c.portfolio.as_deref(), Some("https://www.janedoe.dev"));
    }

    #[test]
    fn test_portfolio_keeps_scheme_and_trims_punctuation() {
        assert_eq!(
            extract_portfolio("Portfolio: http://example.org/work.").as_deref(),
            Some("http://example.org/work")
        );
    }

    #[test]
    fn test_no_contacts_in_plain_prose() {
        let c = extract_contacts("Nothing to see here");
        assert_eq!(c, ContactInfo::default());
    }

    #[test]
    fn test_looks_like_contact() {
        assert!(looks_like_contact("jane@x.io"));
        assert!(looks_like_contact("@janedoe"));
        assert!(looks_like_contact("https://janedoe.dev"));
        assert!(!looks_like_contact("Senior Software Engineer"));
    }
}
