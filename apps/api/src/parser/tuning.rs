//! Tunable thresholds for the résumé heuristics.
//!
//! Every window size and length cut-off used by the extractors lives here so the
//! heuristics can be adjusted (and tested) without touching extractor code.
//! `ParserTuning::default()` reproduces the production behaviour.

#[derive(Debug, Clone)]
pub struct ParserTuning {
    // Header
    /// Lines [0, name_window) are name candidates.
    pub name_window: usize,
    /// Name length must be strictly inside (min, max).
    pub name_min_len: usize,
    pub name_max_len: usize,
    /// Lines [1, title_window) are title candidates. Line 0 is never a title.
    pub title_window: usize,
    pub title_min_len: usize,
    pub title_max_len: usize,
    /// Lines scanned for a `City, ST` location segment.
    pub location_window: usize,

    // Section headings
    /// A heading line must be shorter than this to count as a section header.
    pub heading_max_len: usize,

    // Summary (headed)
    pub summary_line_min_len: usize,
    pub summary_window: usize,
    pub summary_min_len: usize,

    // Summary (fallback paragraph)
    pub fallback_min_start: usize,
    /// Fraction of the document skipped before looking for an unheaded paragraph.
    pub fallback_start_ratio: f64,
    pub fallback_scan_window: usize,
    pub fallback_paragraph_min_len: usize,
    pub fallback_continuation_min_len: usize,
    pub fallback_max_lines: usize,
    pub fallback_min_len: usize,

    // Skills-list detection
    pub skills_like_min_commas: usize,
    pub skills_like_min_bullets: usize,
    pub skills_like_min_pipes: usize,
    pub skills_like_min_keywords: usize,

    // Skills section
    pub skills_line_min_len: usize,
    pub skills_window: usize,
    pub skills_min_len: usize,

    // Work experience
    pub title_line_min_len: usize,
    pub title_line_max_len: usize,
    /// Max length of a line taken as company after a pure dates line.
    pub company_max_len: usize,
    /// Lines shorter than this may start a new entry inside a description.
    pub boundary_line_max_len: usize,
    pub description_max_lines: usize,
    /// Hard bound on lines scanned past the experience header.
    pub experience_scan_cap: usize,

    // Education
    pub education_scan_cap: usize,
}

impl Default for ParserTuning {
    fn default() -> Self {
        Self {
            name_window: 4,
            name_min_len: 3,
            name_max_len: 50,
            title_window: 4,
            title_min_len: 5,
            title_max_len: 60,
            location_window: 6,

            heading_max_len: 40,

            summary_line_min_len: 10,
            summary_window: 10,
            summary_min_len: 20,

            fallback_min_start: 6,
            fallback_start_ratio: 0.1,
            fallback_scan_window: 20,
            fallback_paragraph_min_len: 100,
            fallback_continuation_min_len: 50,
            fallback_max_lines: 10,
            fallback_min_len: 50,

            skills_like_min_commas: 4,
            skills_like_min_bullets: 2,
            skills_like_min_pipes: 2,
            skills_like_min_keywords: 3,

            skills_line_min_len: 2,
            skills_window: 15,
            skills_min_len: 3,

            title_line_min_len: 5,
            title_line_max_len: 100,
            company_max_len: 60,
            boundary_line_max_len: 80,
            description_max_lines: 20,
            experience_scan_cap: 150,

            education_scan_cap: 30,
        }
    }
}

/// Character length, not byte length. Résumés routinely contain `•` and accented names.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
