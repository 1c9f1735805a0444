//! Resume text extraction.
//!
//! PDF parsing is delegated to `pdf-extract`. The parse is CPU-bound and the
//! library may panic on malformed input, so the async entry point runs it in
//! `spawn_blocking` and reports a panic as an unreadable document.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::intake::models::ResumeDocument;
use crate::settings::TRUNCATION_MARKER;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("the file is not a readable PDF: {0}")]
    Unreadable(String),

    #[error("Could not extract text from the PDF. Please try a different PDF.")]
    Empty,
}

/// Extracts the text of every page and caps it at `max_chars` characters.
///
/// Longer text is cut at `max_chars` and followed by the truncation marker.
/// An empty result is returned as-is; callers decide whether that is an error.
pub fn extract_text_from_pdf(bytes: &[u8], max_chars: usize) -> Result<String, ExtractionError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    Ok(cap_text(raw.trim(), max_chars))
}

/// Cuts `text` to `max_chars` characters, appending the truncation marker when anything was dropped.
pub fn cap_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

impl ResumeDocument {
    /// Extracts a resume off the async runtime. Empty text is a terminal error.
    pub async fn extract(bytes: Bytes, max_chars: usize) -> Result<Self, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes, max_chars))
            .await
            .map_err(|e| {
                debug!("PDF extraction task failed: {e}");
                ExtractionError::Unreadable("the PDF parser aborted".to_string())
            })??;

        if text.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }

        let truncated = text.ends_with(TRUNCATION_MARKER);
        info!(
            "Extracted {} characters of resume text (truncated={truncated})",
            text.chars().count()
        );

        Ok(ResumeDocument { text, truncated })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream, StringFormat};

    /// A one-page PDF with each of `lines` drawn in Helvetica, top to bottom.
    pub fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 720 - (i as i64) * 18;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(line.as_bytes().to_vec(), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::pdf_with_lines;
    use super::*;
    use crate::settings::MAX_RESUME_CHARS;

    #[test]
    fn test_cap_text_truncates_long_text_with_marker() {
        let text = "a".repeat(70_000);
        let capped = cap_text(&text, MAX_RESUME_CHARS);
        assert_eq!(
            capped.chars().count(),
            MAX_RESUME_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(capped.ends_with("\n\n[TRUNCATED]"));
    }

    #[test]
    fn test_cap_text_keeps_short_text() {
        assert_eq!(cap_text("short resume", 100), "short resume");
    }

    #[test]
    fn test_cap_text_at_exact_limit_is_untouched() {
        let text = "b".repeat(50);
        assert_eq!(cap_text(&text, 50), text);
    }

    #[test]
    fn test_cap_text_respects_multibyte_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(cap_text(&text, 3), format!("ééé{TRUNCATION_MARKER}"));
    }

    #[tokio::test]
    async fn test_extracts_text_from_generated_pdf() {
        let bytes = Bytes::from(pdf_with_lines(&["Jane Doe", "Senior Python developer"]));
        let doc = ResumeDocument::extract(bytes, MAX_RESUME_CHARS).await.unwrap();
        assert!(doc.text.contains("Jane Doe"));
        assert!(doc.text.contains("Senior Python developer"));
        assert!(!doc.truncated);
    }

    #[tokio::test]
    async fn test_long_resume_is_flagged_truncated() {
        let bytes = Bytes::from(pdf_with_lines(&["Rust engineer with many projects"]));
        let doc = ResumeDocument::extract(bytes, 10).await.unwrap();
        assert!(doc.truncated);
        assert!(doc.text.ends_with(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_pdf_without_text_is_empty() {
        let bytes = Bytes::from(pdf_with_lines(&[]));
        let result = ResumeDocument::extract(bytes, MAX_RESUME_CHARS).await;
        assert!(matches!(result, Err(ExtractionError::Empty)));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_unreadable() {
        let result =
            ResumeDocument::extract(Bytes::from_static(b"this is not a pdf"), MAX_RESUME_CHARS)
                .await;
        assert!(matches!(result, Err(ExtractionError::Unreadable(_))));
    }
}
