//! Heuristic résumé parser.
//!
//! Turns the plain text of a résumé into the flat field map the résumé form
//! consumes. Every extractor is a pure function over the shared
//! [`LineSequence`](lines::LineSequence); a miss yields an empty field, never an
//! error.

pub mod assemble;
pub mod contacts;
pub mod dates;
pub mod education;
pub mod experience;
pub mod header;
pub mod lines;
pub mod models;
pub mod sections;
pub mod skills;
pub mod summary;
pub mod tuning;

use tracing::debug;

pub use assemble::ParsedResumeFields;
pub use tuning::ParserTuning;

/// Runs every extractor over `raw_text`. Total and deterministic.
pub fn parse_resume(raw_text: &str, tuning: &ParserTuning) -> ParsedResumeFields {
    let lines = lines::segment(raw_text);
    debug!("Parsing résumé text: {} non-empty lines", lines.len());

    let contacts = contacts::extract_contacts(raw_text);
    let header = header::detect_header(&lines, tuning);
    let location = header::detect_location(&lines, header.full_name.as_deref(), tuning);
    let summary = summary::extract_summary(&lines, tuning);
    let skills = skills::extract_skills(&lines, tuning);
    let experiences = experience::extract_work_experience(&lines, tuning);
    let education = education::extract_education(&lines, tuning);

    assemble::assemble(
        contacts,
        header,
        location,
        summary,
        skills,
        experiences,
        education,
    )
}
