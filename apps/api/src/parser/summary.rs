//! Summary extraction: a headed section first, an unheaded prose paragraph second.

use tracing::debug;

use crate::parser::contacts::looks_like_contact;
use crate::parser::lines::LineSequence;
use crate::parser::sections::{
    is_stop_line, locate_heading, section_end, stop_keywords_excluding, SectionKind,
};
use crate::parser::tuning::{char_len, ParserTuning};

const SUMMARY_KEYWORDS: &[&str] = &[
    "summary",
    "professional summary",
    "objective",
    "profile",
    "about me",
    "about",
];

const LIST_BULLETS: &[char] = &['•', '·', '▪', '▫'];

/// Keywords whose clustering marks a line as a skills list rather than prose.
const COMMON_SKILL_KEYWORDS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "node",
    "sql",
    "html",
    "css",
    "aws",
    "docker",
    "git",
    "excel",
    "agile",
    "leadership",
    "communication",
    "teamwork",
    "management",
];

pub fn extract_summary(lines: &LineSequence, tuning: &ParserTuning) -> Option<String> {
    let stops = stop_keywords_excluding(SectionKind::Summary);

    match locate_heading(lines, SUMMARY_KEYWORDS, tuning.heading_max_len) {
        Some(header) => {
            debug!("Summary header at line {header}");
            headed_summary(lines, header, &stops, tuning)
        }
        None => fallback_paragraph(lines, &stops, tuning),
    }
}

fn headed_summary(
    lines: &LineSequence,
    header: usize,
    stops: &[&str],
    tuning: &ParserTuning,
) -> Option<String> {
    let start = header + 1;
    let end = section_end(lines, start, stops).min(start + tuning.summary_window);

    let summary = lines[start.min(end)..end]
        .iter()
        .filter(|line| char_len(line) > tuning.summary_line_min_len)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    (char_len(&summary) > tuning.summary_min_len).then_some(summary)
}

/// Many résumés open with an unheaded paragraph. Skip the header block, then take
/// the first long prose line that is not a skills list, plus its long continuations.
fn fallback_paragraph(lines: &LineSequence, stops: &[&str], tuning: &ParserTuning) -> Option<String> {
    let proportional = (lines.len() as f64 * tuning.fallback_start_ratio) as usize;
    let start = tuning.fallback_min_start.max(proportional);
    let scan_end = (start + tuning.fallback_scan_window).min(lines.len());

    let first = (start..scan_end).find(|&i| {
        let line = &lines[i];
        char_len(line) >= tuning.fallback_paragraph_min_len
            && !looks_like_contact(line)
            && !is_stop_line(line, stops)
            && !looks_like_skills_list(line, tuning)
    })?;
    debug!("Summary fallback paragraph at line {first}");

    let mut paragraph = vec![lines[first].as_str()];
    for line in lines.iter().skip(first + 1) {
        if paragraph.len() >= tuning.fallback_max_lines
            || is_stop_line(line, stops)
            || char_len(line) <= tuning.fallback_continuation_min_len
        {
            break;
        }
        paragraph.push(line);
    }

    let summary = paragraph.join(" ");
    (char_len(&summary) > tuning.fallback_min_len).then_some(summary)
}

/// Scores a line for list-like punctuation and clustered skill keywords.
pub fn looks_like_skills_list(line: &str, tuning: &ParserTuning) -> bool {
    let commas = line.matches(',').count();
    let bullets = line.chars().filter(|c| LIST_BULLETS.contains(c)).count();
    let pipes = line.matches('|').count();
    let lower = line.to_lowercase();
    let keywords = COMMON_SKILL_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();

    commas >= tuning.skills_like_min_commas
        || bullets >= tuning.skills_like_min_bullets
        || pipes >= tuning.skills_like_min_pipes
        || keywords >= tuning.skills_like_min_keywords
}
