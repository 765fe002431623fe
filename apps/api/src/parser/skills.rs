use crate::parser::lines::LineSequence;
use crate::parser::sections::{locate_heading, section_end, stop_keywords_excluding, SectionKind};
use crate::parser::tuning::{char_len, ParserTuning};

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "expertise",
    "technologies",
    "tools",
];

/// Flattens the skills section into one `", "`-joined string.
pub fn extract_skills(lines: &LineSequence, tuning: &ParserTuning) -> Option<String> {
    let header = locate_heading(lines, SKILLS_KEYWORDS, tuning.heading_max_len)?;
    let start = header + 1;
    let stops = stop_keywords_excluding(SectionKind::Skills);
    let end = section_end(lines, start, &stops).min(start + tuning.skills_window);

    let skills = lines[start.min(end)..end]
        .iter()
        .filter(|line| char_len(line) > tuning.skills_line_min_len)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    (char_len(&skills) > tuning.skills_min_len).then_some(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::segment;

    fn skills(text: &str) -> Option<String> {
        extract_skills(&segment(text), &ParserTuning::default())
    }

    #[test]
    fn test_single_line_section() {
        assert_eq!(
            skills("SKILLS\nGo, Python, Kubernetes, AWS").as_deref(),
            Some("Go, Python, Kubernetes, AWS")
        );
    }

    #[test]
    fn test_multi_line_joined_with_comma() {
        assert_eq!(
            skills("Technical Skills:\nRust\nPostgreSQL\nGo").as_deref(),
            Some("Rust, PostgreSQL")
        );
    }

    #[test]
    fn test_stops_before_next_section() {
        let s = skills("Skills\nRust, Go\nPython\nEXPERIENCE\nStaff Engineer\nAcme | 2020 - 2022").unwrap();
        assert_eq!(s, "Rust, Go, Python");
        assert!(!s.contains("EXPERIENCE"));
        assert!(!s.contains("Staff Engineer"));
    }

    #[test]
    fn test_long_sentence_mentioning_skills_is_not_a_header() {
        let s = skills(
            "Used strong communication skills to align three product teams\nSkills\nFigma, Sketch",
        );
        assert_eq!(s.as_deref(), Some("Figma, Sketch"));
    }

    #[test]
    fn test_window_cap() {
        let body: Vec<String> = (0..20).map(|i| format!("skill{i:02}")).collect();
        let s = skills(&format!("Skills\n{}", body.join("\n"))).unwrap();
        assert!(s.ends_with("skill14"));
    }

    #[test]
    fn test_too_short_rejected() {
        assert_eq!(skills("Skills\nC"), None);
        assert_eq!(skills(""), None);
    }
}
