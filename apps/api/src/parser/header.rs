//! Header detection: positional guesses over the first few lines.
//!
//! Best effort: unconventional layouts (centred names, multi-line titles) are
//! misdetected and that is accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::contacts::{is_email_or_phone, looks_like_contact};
use crate::parser::lines::LineSequence;
use crate::parser::tuning::{char_len, ParserTuning};

const NOT_A_NAME: &[&str] = &["resume", "curriculum", "vitae"];

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Z][A-Za-z.'\- ]{1,40},\s*(?:[A-Z]{2}(?:\s+\d{5}(?:-\d{4})?)?|[A-Z][a-z]+(?:\s[A-Z][a-z]+)?)$",
    )
    .expect("valid location regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFields {
    pub full_name: Option<String>,
    pub title: Option<String>,
}

pub fn detect_header(lines: &LineSequence, tuning: &ParserTuning) -> HeaderFields {
    let full_name = detect_full_name(lines, tuning);
    let title = detect_title(lines, full_name.as_deref(), tuning);
    HeaderFields { full_name, title }
}

fn detect_full_name(lines: &LineSequence, tuning: &ParserTuning) -> Option<String> {
    lines
        .iter()
        .take(tuning.name_window)
        .find(|line| {
            let lower = line.to_lowercase();
            let len = char_len(line);
            !NOT_A_NAME.iter().any(|w| lower.contains(w))
                && !is_email_or_phone(line)
                && !line.contains('|')
                && len > tuning.name_min_len
                && len < tuning.name_max_len
        })
        .cloned()
}

fn detect_title(
    lines: &LineSequence,
    full_name: Option<&str>,
    tuning: &ParserTuning,
) -> Option<String> {
    lines
        .iter()
        .take(tuning.title_window)
        .skip(1)
        .find(|line| {
            let len = char_len(line);
            !looks_like_contact(line)
                && len >= tuning.title_min_len
                && len <= tuning.title_max_len
                && full_name != Some(line.as_str())
        })
        .cloned()
}

/// Finds a `City, ST` / `City, ST 12345` / `City, Country` segment in the
/// header window. Contact lines are often pipe- or bullet-separated, so each
/// line is split into segments first.
pub fn detect_location(
    lines: &LineSequence,
    full_name: Option<&str>,
    tuning: &ParserTuning,
) -> Option<String> {
    lines
        .iter()
        .take(tuning.location_window)
        .flat_map(|line| line.split(['|', '•', '·']))
        .map(str::trim)
        .find(|segment| {
            !segment.is_empty()
                && Some(*segment) != full_name
                && !looks_like_contact(segment)
                && LOCATION_RE.is_match(segment)
        })
        .map(String::from)
}
