// file: src/exporter/text.rs
// description: human readable rendering of extraction results

use crate::models::ExtractionResult;
use crate::utils::Validator;
use colored::Colorize;
use std::fmt::Write;

const CONTEXT_PREVIEW_CHARS: usize = 80;

/// Renders one line per kind, `kind: [match, match]`.
#[derive(Debug, Clone, Default)]
pub struct TextPrinter {
    colored: bool,
    show_offsets: bool,
}

impl TextPrinter {
    pub fn new(colored: bool, show_offsets: bool) -> Self {
        Self {
            colored,
            show_offsets,
        }
    }

    pub fn render(&self, result: &ExtractionResult) -> String {
        let mut output = String::new();

        for (kind, matches) in result.iter() {
            let items: Vec<String> = matches
                .iter()
                .map(|m| {
                    if self.show_offsets {
                        format!("{} @{}..{}", m.raw_text, m.start_offset, m.end_offset)
                    } else {
                        m.raw_text.clone()
                    }
                })
                .collect();

            let _ = writeln!(output, "{}: [{}]", self.label(kind.as_str()), items.join(", "));

            for m in matches {
                if let Some(context) = &m.context {
                    let _ = writeln!(
                        output,
                        "    {} … {}",
                        m.raw_text,
                        Validator::truncate_text(context, CONTEXT_PREVIEW_CHARS)
                    );
                }
            }
        }

        for overlap in &result.overlaps {
            let _ = writeln!(
                output,
                "{}: {} \"{}\" / {} \"{}\" @{}..{}",
                self.warn_label("overlap"),
                overlap.first,
                overlap.first_text,
                overlap.second,
                overlap.second_text,
                overlap.start_offset,
                overlap.end_offset
            );
        }

        output
    }

    pub fn summary(&self, source: &str, result: &ExtractionResult) -> String {
        let found = result.iter().filter(|(_, m)| !m.is_empty()).count();
        format!(
            "{}: {} entities across {} of {} kinds",
            source,
            result.total(),
            found,
            result.kinds().count()
        )
    }

    fn label(&self, text: &str) -> String {
        if self.colored {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn_label(&self, text: &str) -> String {
        if self.colored {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractionConfig, OverlapPolicy};
    use crate::extractor::{EntityExtractor, SAMPLE_TEXT};
    use crate::models::EntityKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_plain() {
        let extractor = EntityExtractor::with_kinds(&[EntityKind::Email, EntityKind::Date]);
        let result = extractor.extract("Contact: a@b.com");
        let printer = TextPrinter::new(false, false);

        assert_eq!(printer.render(&result), "email: [a@b.com]\ndate: []\n");
    }

    #[test]
    fn test_render_offsets() {
        let extractor = EntityExtractor::with_kinds(&[EntityKind::PhoneNumber]);
        let result = extractor.extract("Call 555-123-4567 today");
        let printer = TextPrinter::new(false, true);

        assert_eq!(printer.render(&result), "phone_number: [555-123-4567 @5..17]\n");
    }

    #[test]
    fn test_render_overlaps() {
        let extractor = EntityExtractor::new(ExtractionConfig {
            overlap_policy: OverlapPolicy::Flag,
            ..ExtractionConfig::default()
        });
        let rendered = TextPrinter::new(false, false).render(&extractor.extract(SAMPLE_TEXT));

        assert!(rendered.contains(
            "overlap: phone_number \"987-654-3210\" / account_number \"987-654-3210\""
        ));
    }

    #[test]
    fn test_summary() {
        let extractor = EntityExtractor::with_kinds(&[EntityKind::Email, EntityKind::Date]);
        let result = extractor.extract("Contact: a@b.com");
        let printer = TextPrinter::default();

        assert_eq!(
            printer.summary("<inline>", &result),
            "<inline>: 1 entities across 1 of 2 kinds"
        );
    }
}
