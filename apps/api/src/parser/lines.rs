use std::ops::Deref;

/// Ordered, trimmed, non-empty lines of a document. Shared read-only input of
/// every line-based extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence(Vec<String>);

impl LineSequence {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl Deref for LineSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Splits raw text on `\n` / `\r`, trims every piece and drops empties.
pub fn segment(raw_text: &str) -> LineSequence {
    LineSequence(
        raw_text
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_drops_blank_lines_and_trims() {
        let lines = segment("  Jane Doe  \n\n\t\nEngineer\n   ");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.get(0), Some("Jane Doe"));
        assert_eq!(lines.get(1), Some("Engineer"));
    }

    #[test]
    fn test_segment_handles_mixed_line_endings() {
        let lines = segment("one\r\ntwo\rthree\nfour");
        assert_eq!(&lines[..], &["one", "two", "three", "four"]);
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("").is_empty());
        assert!(segment(" \n \r\n ").is_empty());
    }

    #[test]
    fn test_every_line_non_empty() {
        let lines = segment("a\n \n b \n\n\nc");
        assert!(lines.iter().all(|l| !l.is_empty()));
    }
}
