//! Education extraction. Entries open on a degree or institution line and pick up
//! the missing half (and a date line) from the lines that follow.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::dates::{has_year, parse_date_range};
use crate::parser::lines::LineSequence;
use crate::parser::models::EducationEntry;
use crate::parser::sections::{locate_heading, section_end, stop_keywords_excluding, SectionKind};
use crate::parser::tuning::ParserTuning;

const EDUCATION_KEYWORDS: &[&str] = &["education", "academic background", "qualifications"];

static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor|master|associate|diploma|degree|doctorate|mba|ph\.?d|b\.?sc|m\.?sc|b\.?tech|m\.?tech|b\.[sae]\.?|m\.[sa]\.?)",
    )
    .expect("valid degree regex")
});

static INSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
        .expect("valid institution regex")
});

pub fn extract_education(lines: &LineSequence, tuning: &ParserTuning) -> Vec<EducationEntry> {
    let Some(header) = locate_heading(lines, EDUCATION_KEYWORDS, tuning.heading_max_len) else {
        return Vec::new();
    };
    let start = header + 1;
    let stops = stop_keywords_excluding(SectionKind::Education);
    let end = section_end(lines, start, &stops).min(start + tuning.education_scan_cap);

    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut dated = false;

    for line in &lines[start.min(end)..end] {
        let degree = part_matching(line, &DEGREE_RE);
        let school = part_matching(line, &INSTITUTION_RE);

        let opens_entry = match entries.last() {
            None => degree.is_some() || school.is_some(),
            Some(current) => {
                (degree.is_some() && !current.degree.is_empty())
                    || (degree.is_none() && school.is_some() && !current.school.is_empty())
            }
        };
        if opens_entry {
            entries.push(EducationEntry::default());
            dated = false;
        }

        let Some(current) = entries.last_mut() else {
            continue;
        };
        if let Some(degree) = degree.filter(|_| current.degree.is_empty()) {
            current.degree = degree.to_string();
        }
        if let Some(school) = school.filter(|_| current.school.is_empty()) {
            current.school = school.to_string();
        }
        if !dated && has_year(line) {
            apply_dates(current, line);
            dated = true;
        }
    }

    debug!("Extracted {} education entries", entries.len());
    entries
}

/// The first `|`/`,`/` - `-separated segment of `line` that matches `re`.
fn part_matching<'a>(line: &'a str, re: &Regex) -> Option<&'a str> {
    if !re.is_match(line) {
        return None;
    }
    line.split(['|', ','])
        .flat_map(|part| part.split(" - "))
        .flat_map(|part| part.split(" – "))
        .map(str::trim)
        .find(|part| re.is_match(part))
}

/// A lone year on an education line is a graduation date.
fn apply_dates(entry: &mut EducationEntry, line: &str) {
    let range = parse_date_range(line);
    if range.end_year.is_empty() {
        entry.end_month = range.start_month;
        entry.end_year = range.start_year;
    } else {
        entry.start_month = range.start_month;
        entry.start_year = range.start_year;
        entry.end_month = range.end_month;
        entry.end_year = range.end_year;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::segment;

    fn education(text: &str) -> Vec<EducationEntry> {
        extract_education(&segment(text), &ParserTuning::default())
    }

    #[test]
    fn test_school_first_then_degree_then_dates() {
        let e = education(
            "EDUCATION\nStanford University\nB.S. Computer Science\nSep 2010 - Jun 2014",
        );
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].school, "Stanford University");
        assert_eq!(e[0].degree, "B.S. Computer Science");
        assert_eq!(e[0].start_month, "September");
        assert_eq!(e[0].start_year, "2010");
        assert_eq!(e[0].end_month, "June");
        assert_eq!(e[0].end_year, "2014");
    }

    #[test]
    fn test_single_line_entries_in_order() {
        let e = education(
            "Education\n\
             Master of Science in Data Science | Columbia University | 2016\n\
             Bachelor of Arts, Economics, Boston College, 2012",
        );
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].degree, "Master of Science in Data Science");
        assert_eq!(e[0].school, "Columbia University");
        assert_eq!(e[0].end_year, "2016");
        assert!(e[0].start_year.is_empty());
        assert_eq!(e[1].degree, "Bachelor of Arts");
        assert_eq!(e[1].school, "Boston College");
        assert_eq!(e[1].end_year, "2012");
    }

    #[test]
    fn test_section_bounded_by_next_heading() {
        let e = education("Education\nMBA, Wharton School\nSkills\nDiploma of Nothing");
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].degree, "MBA");
        assert_eq!(e[0].school, "Wharton School");
    }

    #[test]
    fn test_no_education_section() {
        assert!(education("Experience\nEngineer\nAcme | 2019").is_empty());
        assert!(education("").is_empty());
    }
}
