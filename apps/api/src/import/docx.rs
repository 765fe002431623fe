use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::import::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main document part of a `.docx` archive: one line per `w:p`,
/// `w:tab` as a space, `w:br` as a line break.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractionError::Corrupt(format!("not a .docx archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Corrupt(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Corrupt(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push(' '),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    lines.push(current.trim().to_string());
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Corrupt(format!("bad document XML: {err}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExtractionError::Corrupt(format!(
                    "bad document XML at byte {}: {err}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    /// Builds a minimal `.docx` whose body holds one `w:p` per paragraph;
    /// each paragraph is given as its raw run XML.
    pub(crate) fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|runs| format!("<w:p>{runs}</w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn run(text: &str) -> String {
        format!(r#"<w:r><w:t xml:space="preserve">{text}</w:t></w:r>"#)
    }

    #[test]
    fn test_one_line_per_paragraph_and_runs_concatenated() {
        let name = format!("{}{}", run("Jane "), run("Doe"));
        let title = run("Staff Engineer");
        let bytes = docx_with_paragraphs(&[&name, &title]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Jane Doe\nStaff Engineer");
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let line = format!(
            "{}<w:r><w:tab/></w:r>{}<w:r><w:br/></w:r>{}",
            run("Acme &amp; Co"),
            run("2019"),
            run("Remote")
        );
        let bytes = docx_with_paragraphs(&[&line]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "Acme & Co 2019\nRemote");
    }

    #[test]
    fn test_empty_paragraphs_kept_as_blank_lines() {
        let bytes = docx_with_paragraphs(&[&run("A"), "", &run("B")]);
        assert_eq!(extract_docx_text(&bytes).unwrap(), "A\n\nB");
    }

    #[test]
    fn test_not_a_zip_is_corrupt() {
        assert!(matches!(
            extract_docx_text(b"plain bytes"),
            Err(ExtractionError::Corrupt(_))
        ));
    }

    #[test]
    fn test_zip_without_document_part_is_corrupt() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_docx_text(&bytes),
            Err(ExtractionError::Corrupt(m)) if m.contains("word/document.xml")
        ));
    }
}
