//! Section location primitives shared by every section-scoped extractor.

use crate::parser::lines::LineSequence;
use crate::parser::tuning::char_len;

/// The résumé sections whose headings can terminate another section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    References,
    Volunteer,
    Awards,
    Publications,
    Languages,
    Interests,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Projects,
        SectionKind::References,
        SectionKind::Volunteer,
        SectionKind::Awards,
        SectionKind::Publications,
        SectionKind::Languages,
        SectionKind::Interests,
    ];

    /// Exact heading names (lowercase) that open this section.
    pub fn headings(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &[
                "summary",
                "professional summary",
                "career summary",
                "objective",
                "career objective",
                "profile",
                "professional profile",
                "about me",
            ],
            SectionKind::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "work history",
                "employment",
                "employment history",
                "career history",
            ],
            SectionKind::Education => &["education", "academic background", "qualifications"],
            SectionKind::Skills => &[
                "skills",
                "technical skills",
                "core competencies",
                "key skills",
            ],
            SectionKind::Certifications => &["certifications", "certificates", "licenses"],
            SectionKind::Projects => &["projects", "personal projects", "key projects"],
            SectionKind::References => &["references"],
            SectionKind::Volunteer => &["volunteer", "volunteer experience", "volunteering"],
            SectionKind::Awards => &["awards", "honors", "awards & honors", "awards and honors"],
            SectionKind::Publications => &["publications"],
            SectionKind::Languages => &["languages"],
            SectionKind::Interests => &["interests", "hobbies"],
        }
    }
}

/// Headings of every section except `current`. A line equal to one of these
/// ends the section being extracted.
pub fn stop_keywords_excluding(current: SectionKind) -> Vec<&'static str> {
    SectionKind::ALL
        .iter()
        .filter(|kind| **kind != current)
        .flat_map(|kind| kind.headings().iter().copied())
        .collect()
}

/// Index of the first line that case-insensitively contains any keyword.
pub fn locate_section(lines: &[String], keywords: &[&str]) -> Option<usize> {
    lines.iter().position(|line| contains_any(line, keywords))
}

/// [`locate_section`] restricted to lines shorter than `max_len` chars, so prose
/// that merely mentions a keyword is not mistaken for a heading.
pub fn locate_heading(lines: &LineSequence, keywords: &[&str], max_len: usize) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = locate_section(&lines[offset..], keywords) {
        let at = offset + found;
        if char_len(&lines[at]) < max_len {
            return Some(at);
        }
        offset = at + 1;
    }
    None
}

/// First index at or after `start` whose line is exactly a stop keyword
/// (optionally followed by `:`), else `lines.len()`.
pub fn section_end(lines: &LineSequence, start: usize, stop_keywords: &[&str]) -> usize {
    (start..lines.len())
        .find(|&i| is_stop_line(&lines[i], stop_keywords))
        .unwrap_or(lines.len())
}

pub fn is_stop_line(line: &str, stop_keywords: &[&str]) -> bool {
    let normalized = line.trim().to_lowercase();
    let normalized = normalized
        .strip_suffix(':')
        .map(str::trim_end)
        .unwrap_or(&normalized);
    stop_keywords.iter().any(|k| *k == normalized)
}

fn contains_any(line: &str, keywords: &[&str]) -> bool {
    let lower = line.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
