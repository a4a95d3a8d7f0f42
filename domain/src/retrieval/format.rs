//! Context formatting for prompts

use super::document::RetrievedDocument;

/// Sentinel context produced when retrieval returned nothing.
///
/// Graders must treat this text as insufficient context.
pub const NO_DOCUMENTS_FOUND: &str = "No relevant documents found.";

const PLACEHOLDER: &str = "N/A";
const SEPARATOR: &str = "\n\n---\n\n";

/// Renders retrieved documents into one human-readable text block
pub struct ContextFormatter;

impl ContextFormatter {
    /// Format documents, one block per document joined by a fixed separator.
    ///
    /// Never returns an empty string: an empty input yields
    /// [`NO_DOCUMENTS_FOUND`].
    pub fn format(documents: &[RetrievedDocument]) -> String {
        if documents.is_empty() {
            return NO_DOCUMENTS_FOUND.to_string();
        }

        documents
            .iter()
            .map(Self::format_document)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Whether a context block is the "no documents" sentinel
    pub fn is_empty_context(context: &str) -> bool {
        let context = context.trim();
        context.is_empty() || context == NO_DOCUMENTS_FOUND
    }

    fn format_document(doc: &RetrievedDocument) -> String {
        let meta = &doc.metadata;
        let reviews = match doc.text.trim() {
            "" => field(&meta.raw_review_text),
            text => text,
        };
        format!(
            "Title: {}\nPrice: {}\nRating: {}\nReviews: \n{}",
            field(&meta.title),
            field(&meta.price),
            field(&meta.rating),
            reviews
        )
    }
}

fn field(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::document::DocumentMetadata;

    fn iphone() -> RetrievedDocument {
        RetrievedDocument::new(
            "Great battery life",
            DocumentMetadata::default()
                .with_title("iPhone 15")
                .with_price("$699")
                .with_rating("4.5"),
        )
    }

    #[test]
    fn test_empty_input_yields_sentinel() {
        assert_eq!(ContextFormatter::format(&[]), NO_DOCUMENTS_FOUND);
        assert!(ContextFormatter::is_empty_context(&ContextFormatter::format(&[])));
    }

    #[test]
    fn test_single_document() {
        let text = ContextFormatter::format(&[iphone()]);
        assert_eq!(
            text,
            "Title: iPhone 15\nPrice: $699\nRating: 4.5\nReviews: \nGreat battery life"
        );
        assert!(!ContextFormatter::is_empty_context(&text));
    }

    #[test]
    fn test_missing_fields_use_placeholder() {
        let doc = RetrievedDocument::new("  solid build  ", DocumentMetadata::default());
        let text = ContextFormatter::format(&[doc]);
        assert_eq!(
            text,
            "Title: N/A\nPrice: N/A\nRating: N/A\nReviews: \nsolid build"
        );
    }

    #[test]
    fn test_blank_text_falls_back_to_raw_review() {
        let doc = RetrievedDocument::new(
            "",
            DocumentMetadata::default()
                .with_title("Pixel 8")
                .with_price("   ")
                .with_raw_review_text("camera is superb"),
        );
        let text = ContextFormatter::format(&[doc]);
        assert!(text.contains("Price: N/A"));
        assert!(text.ends_with("camera is superb"));
    }

    #[test]
    fn test_documents_joined_by_separator() {
        let text = ContextFormatter::format(&[iphone(), iphone()]);
        assert_eq!(text.matches("\n\n---\n\n").count(), 1);
        assert_eq!(text.matches("Title: iPhone 15").count(), 2);
    }

    #[test]
    fn test_format_is_deterministic() {
        let docs = vec![iphone()];
        assert_eq!(ContextFormatter::format(&docs), ContextFormatter::format(&docs));
    }
}
