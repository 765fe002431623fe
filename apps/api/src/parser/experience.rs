//! Work-experience extraction: segments the experience section into job entries.
//!
//! # Entry shape
//! Each entry is a title line followed by a company/dates block and a description:
//! - `Title` / `Company | Dates`
//! - `Title` / `Company, Dates` (or `Company Dates`)
//! - `Title` / `Dates` / `Company` (company optional)
//! - `Title` / `Company` / `Dates` (dates optional)
//!
//! A candidate title is accepted only if a company or a dates line follows it.
//!
//! # Entry boundaries
//! A description ends at a stop heading, the per-entry line cap, or a line that
//! looks like the next entry's title: short, not a bullet, and followed by a
//! year-bearing line (or by a short company line and then a pure dates line).
//! Ambiguity is resolved towards a new entry, so entry counts stay precise at
//! the cost of occasionally splitting a description whose short line is
//! followed by some other 4-digit number.

use tracing::debug;

use crate::parser::dates::{date_token_start, has_year, parse_date_range, starts_with_date};
use crate::parser::lines::LineSequence;
use crate::parser::models::WorkExperienceEntry;
use crate::parser::sections::{
    is_stop_line, locate_heading, section_end, stop_keywords_excluding, SectionKind,
};
use crate::parser::tuning::{char_len, ParserTuning};

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "work history",
    "career history",
    "industrial experience",
];

pub(crate) const BULLET_GLYPHS: &[char] = &['•', '·', '▪', '▫', '-', '*'];

/// Company and dates located after a title line.
#[derive(Debug, Default)]
struct EntryHead {
    company: Option<String>,
    dates: Option<String>,
    /// First line after the company/dates block.
    next_line: usize,
}

pub fn extract_work_experience(
    lines: &LineSequence,
    tuning: &ParserTuning,
) -> Vec<WorkExperienceEntry> {
    let Some(header) = locate_heading(lines, EXPERIENCE_KEYWORDS, tuning.heading_max_len) else {
        return Vec::new();
    };
    let start = header + 1;
    let stops = stop_keywords_excluding(SectionKind::Experience);
    let end = section_end(lines, start, &stops).min(start + tuning.experience_scan_cap);
    debug!("Experience section: header {header}, lines {start}..{end}");

    let mut entries = Vec::new();
    let mut cursor = start;
    while cursor < end {
        match parse_entry(lines, cursor, end, &stops, tuning) {
            Some((entry, resume_at)) => {
                entries.push(entry);
                cursor = resume_at;
            }
            None => cursor += 1,
        }
    }

    debug!("Extracted {} work experience entries", entries.len());
    entries
}

/// Tries to read one entry whose title is `lines[at]`. Returns the entry and the
/// index where scanning resumes (always > `at`).
fn parse_entry(
    lines: &LineSequence,
    at: usize,
    end: usize,
    stops: &[&str],
    tuning: &ParserTuning,
) -> Option<(WorkExperienceEntry, usize)> {
    let title = &lines[at];
    let len = char_len(title);
    if len < tuning.title_line_min_len || len > tuning.title_line_max_len || at + 1 >= end {
        return None;
    }

    let head = read_entry_head(lines, at + 1, end, tuning);
    if head.company.is_none() && head.dates.is_none() {
        return None;
    }

    let dates = head
        .dates
        .as_deref()
        .map(parse_date_range)
        .unwrap_or_default();
    let (description, resume_at) = collect_description(lines, head.next_line, end, stops, tuning);

    Some((
        WorkExperienceEntry {
            job_title: title.clone(),
            company: head.company.unwrap_or_default(),
            start_month: dates.start_month,
            start_year: dates.start_year,
            end_month: dates.end_month,
            end_year: dates.end_year,
            description,
        },
        resume_at,
    ))
}

fn read_entry_head(lines: &LineSequence, at: usize, end: usize, tuning: &ParserTuning) -> EntryHead {
    let line = lines[at].as_str();

    if !has_year(line) {
        // Company line; the dates may follow on the next line.
        let dates = lines
            .get(at + 1)
            .filter(|next| at + 1 < end && has_year(next))
            .map(String::from);
        let next_line = if dates.is_some() { at + 2 } else { at + 1 };
        return EntryHead {
            company: Some(line.to_string()),
            dates,
            next_line,
        };
    }

    if line.contains('|') {
        let (dated, undated): (Vec<&str>, Vec<&str>) = line
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .partition(|part| has_year(part));
        return EntryHead {
            company: undated.first().map(|c| c.to_string()),
            dates: Some(dated.join(" ")),
            next_line: at + 1,
        };
    }

    let split = date_token_start(line).unwrap_or(0);
    let company = trim_company(&line[..split]);
    if !company.is_empty() {
        return EntryHead {
            company: Some(company.to_string()),
            dates: Some(line[split..].to_string()),
            next_line: at + 1,
        };
    }

    // Pure dates line; a short, undated, unbulleted line after it is the company.
    let company = lines
        .get(at + 1)
        .filter(|next| {
            at + 1 < end
                && !has_year(next)
                && char_len(next) < tuning.company_max_len
                && !starts_with_bullet(next)
        })
        .map(String::from);
    let next_line = if company.is_some() { at + 2 } else { at + 1 };
    EntryHead {
        company,
        dates: Some(line.to_string()),
        next_line,
    }
}

fn collect_description(
    lines: &LineSequence,
    from: usize,
    end: usize,
    stops: &[&str],
    tuning: &ParserTuning,
) -> (String, usize) {
    let mut collected: Vec<&str> = Vec::new();
    let mut cursor = from;

    while cursor < end && collected.len() < tuning.description_max_lines {
        let line = lines[cursor].as_str();
        if is_stop_line(line, stops) || starts_new_entry(lines, cursor, end, tuning) {
            break;
        }
        let stripped = strip_bullet(line);
        if !stripped.is_empty() {
            collected.push(stripped);
        }
        cursor += 1;
    }

    (collected.join("\n"), cursor)
}

fn starts_new_entry(lines: &LineSequence, at: usize, end: usize, tuning: &ParserTuning) -> bool {
    let line = lines[at].as_str();
    let len = char_len(line);
    if len < tuning.title_line_min_len
        || len >= tuning.boundary_line_max_len
        || starts_with_bullet(line)
        || at + 1 >= end
    {
        return false;
    }

    let next = lines[at + 1].as_str();
    if has_year(next) {
        return true;
    }
    char_len(next) < tuning.company_max_len && at + 2 < end && starts_with_date(&lines[at + 2])
}

fn starts_with_bullet(line: &str) -> bool {
    line.starts_with(BULLET_GLYPHS)
}

pub(crate) fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| BULLET_GLYPHS.contains(&c) || c.is_whitespace())
}

fn trim_company(prefix: &str) -> &str {
    prefix
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || ",;|-–—(@".contains(c))
        .trim()
}
