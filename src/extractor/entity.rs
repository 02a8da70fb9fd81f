// file: src/extractor/entity.rs
// description: single-pass entity extraction over in-memory text
// reference: https://docs.rs/regex

use crate::config::{ExtractionConfig, OverlapPolicy};
use crate::extractor::context;
use crate::extractor::patterns::{self, pattern_for};
use crate::models::{EntityKind, EntityMatch, ExtractionResult, Overlap};
use std::collections::HashSet;
use tracing::debug;

/// Scans text for every enabled entity kind.
///
/// Holds only immutable configuration, so one extractor can be shared freely
/// and `extract` returns the same result for the same input.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    config: ExtractionConfig,
    kinds: Vec<EntityKind>,
}

impl EntityExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        patterns::compile_all();
        let kinds = config.enabled_kinds();
        Self { config, kinds }
    }

    pub fn with_kinds(kinds: &[EntityKind]) -> Self {
        Self::new(ExtractionConfig {
            kinds: kinds.to_vec(),
            ..ExtractionConfig::default()
        })
    }

    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new(self.kinds.iter().copied());

        for &kind in &self.kinds {
            let matches = self.extract_kind(text, kind);
            debug!("Found {} {} match(es)", matches.len(), kind);
            result.set(kind, matches);
        }

        match self.config.overlap_policy {
            OverlapPolicy::Independent => {}
            OverlapPolicy::Flag => {
                result.overlaps = find_overlaps(&result);
                if !result.overlaps.is_empty() {
                    debug!("Flagged {} cross-kind overlap(s)", result.overlaps.len());
                }
            }
            OverlapPolicy::Exclusive => resolve_exclusive(&mut result),
        }

        result
    }

    pub fn extract_kind(&self, text: &str, kind: EntityKind) -> Vec<EntityMatch> {
        let pattern = pattern_for(kind);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut matches = Vec::new();

        for captures in pattern.regex.captures_iter(text) {
            let Some(found) = captures.get(pattern.group) else {
                continue;
            };

            if !self.accept(text, kind, found.start(), found.as_str()) {
                continue;
            }

            if self.config.unique && !seen.insert(found.as_str()) {
                continue;
            }

            let mut entity = EntityMatch::new(kind, found.as_str(), found.start(), found.end());
            if self.config.context_window > 0 {
                entity = entity.with_context(context::surrounding(
                    text,
                    found.start(),
                    found.end(),
                    self.config.context_window,
                ));
            }
            matches.push(entity);
        }

        matches
    }

    fn accept(&self, text: &str, kind: EntityKind, start: usize, raw: &str) -> bool {
        match kind {
            EntityKind::AccountNumber => patterns::is_account_number(text, start),
            EntityKind::Date if self.config.validate_dates => patterns::is_valid_date(raw),
            _ => true,
        }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Extracts every kind with default settings.
pub fn extract(text: &str) -> ExtractionResult {
    EntityExtractor::default().extract(text)
}

fn find_overlaps(result: &ExtractionResult) -> Vec<Overlap> {
    let mut all: Vec<&EntityMatch> = result.all_matches().collect();
    all.sort_by_key(|m| (m.start_offset, m.kind));

    let mut overlaps = Vec::new();
    for (i, a) in all.iter().enumerate() {
        for b in all[i + 1..]
            .iter()
            .take_while(|b| b.start_offset < a.end_offset)
        {
            if a.kind != b.kind {
                overlaps.push(Overlap::between(a, b));
            }
        }
    }
    overlaps
}

fn resolve_exclusive(result: &mut ExtractionResult) {
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for matches in result.entities.values_mut() {
        matches.retain(|m| {
            !claimed
                .iter()
                .any(|&(start, end)| m.start_offset < end && start < m.end_offset)
        });
        claimed.extend(matches.iter().map(|m| (m.start_offset, m.end_offset)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::sample::SAMPLE_TEXT;
    use pretty_assertions::assert_eq;

    fn with_policy(policy: OverlapPolicy) -> EntityExtractor {
        EntityExtractor::new(ExtractionConfig {
            overlap_policy: policy,
            ..ExtractionConfig::default()
        })
    }

    #[test]
    fn test_email_example() {
        let result = extract("Contact: a@b.com");
        let emails = result.get(EntityKind::Email);

        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].raw_text, "a@b.com");
        assert_eq!((emails[0].start_offset, emails[0].end_offset), (9, 16));
    }

    #[test]
    fn test_phone_example() {
        let result = extract("Call 555-123-4567 today");
        assert_eq!(result.raw_texts(EntityKind::PhoneNumber), vec!["555-123-4567"]);
    }

    #[test]
    fn test_date_example() {
        let result = extract("Meeting on 2024-01-15");
        assert_eq!(result.raw_texts(EntityKind::Date), vec!["2024-01-15"]);
    }

    #[test]
    fn test_empty_and_plain_text() {
        for text in ["", "hello world"] {
            let result = extract(text);
            assert!(result.is_empty());
            assert_eq!(result.kinds().count(), EntityKind::ALL.len());
        }
    }

    #[test]
    fn test_offsets_index_the_input() {
        let text = format!("🚨 {SAMPLE_TEXT} £12 中文");
        let result = extract(&text);

        assert!(!result.is_empty());
        for m in result.all_matches() {
            assert_eq!(&text[m.start_offset..m.end_offset], m.raw_text);
        }
    }

    #[test]
    fn test_no_overlap_within_kind() {
        let result = extract(SAMPLE_TEXT);
        for (_, matches) in result.iter() {
            for pair in matches.windows(2) {
                assert!(pair[0].end_offset <= pair[1].start_offset);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let extractor = EntityExtractor::default();
        assert_eq!(extractor.extract(SAMPLE_TEXT), extractor.extract(SAMPLE_TEXT));
    }

    #[test]
    fn test_sample_passage() {
        let result = extract(SAMPLE_TEXT);

        assert_eq!(
            result.raw_texts(EntityKind::Email),
            vec!["sarah.johnson@techcorp.com", "mike.davis@company.org"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::PhoneNumber),
            vec![
                "(555) 123-4567",
                "+1-800-555-0199",
                "987-654-3210",
                "555.987.6543",
                "(+44)7912991234",
                "(800)CALL-NOW"
            ]
        );
        assert_eq!(
            result.raw_texts(EntityKind::Date),
            vec!["2024-03-15", "06/06/2025"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::Url),
            vec![
                "https://www.techcorp.com",
                "ftp://files.techcorp.com/docs",
                "http://techcorp.com"
            ]
        );
        assert_eq!(
            result.raw_texts(EntityKind::Reference),
            vec!["#INV-2024-001", "#TK-9876", "#ORD-ABC-123"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::Currency),
            vec!["$1,250.75", "£3,000.80", "$2,100"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::CreditCard),
            vec!["4532-1234-5678-9012"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::AccountNumber),
            vec!["987-654-3210"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::SocialSecurityNumber),
            vec!["123-45-6789"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::IpAddress),
            vec!["192.168.1.100", "192.168.1.1"]
        );
        assert_eq!(
            result.raw_texts(EntityKind::PersonName),
            vec!["Sarah Johnson", "Mike Davis"]
        );
        assert!(result.overlaps.is_empty());
    }

    #[test]
    fn test_flag_policy_reports_overlap() {
        let result = with_policy(OverlapPolicy::Flag).extract(SAMPLE_TEXT);

        assert_eq!(result.overlaps.len(), 1);
        let overlap = &result.overlaps[0];
        assert_eq!(overlap.first, EntityKind::PhoneNumber);
        assert_eq!(overlap.second, EntityKind::AccountNumber);
        assert_eq!(overlap.first_text, "987-654-3210");
        assert_eq!(result.raw_texts(EntityKind::AccountNumber), vec!["987-654-3210"]);
    }

    #[test]
    fn test_exclusive_policy_drops_lower_priority() {
        let result = with_policy(OverlapPolicy::Exclusive).extract(SAMPLE_TEXT);

        assert!(result.get(EntityKind::AccountNumber).is_empty());
        assert!(result.raw_texts(EntityKind::PhoneNumber).contains(&"987-654-3210"));

        let all: Vec<&EntityMatch> = result.all_matches().collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_unique_drops_repeats() {
        let text = "a@b.com then a@b.com and c@d.com";
        let plain = EntityExtractor::with_kinds(&[EntityKind::Email]).extract(text);
        assert_eq!(plain.get(EntityKind::Email).len(), 3);

        let unique = EntityExtractor::new(ExtractionConfig {
            kinds: vec![EntityKind::Email],
            unique: true,
            ..ExtractionConfig::default()
        })
        .extract(text);
        assert_eq!(unique.raw_texts(EntityKind::Email), vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn test_kind_filter() {
        let result = EntityExtractor::with_kinds(&[EntityKind::Date]).extract(SAMPLE_TEXT);

        assert_eq!(result.kinds().collect::<Vec<_>>(), vec![EntityKind::Date]);
        assert!(result.get(EntityKind::Email).is_empty());
    }

    #[test]
    fn test_date_validation_toggle() {
        let text = "Bad date 2024-13-45 here";
        assert!(extract(text).get(EntityKind::Date).is_empty());

        let lenient = EntityExtractor::new(ExtractionConfig {
            validate_dates: false,
            ..ExtractionConfig::default()
        })
        .extract(text);
        assert_eq!(lenient.raw_texts(EntityKind::Date), vec!["2024-13-45"]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_entities() {
        let lenient = EntityExtractor::new(ExtractionConfig {
            validate_dates: false,
            ..ExtractionConfig::default()
        });

        for text in [
            "Call ５５５-１２３-４５６７ today",
            "Meeting on ٢٠٢٤-٠١-١٥",
            "SSN １２３-４５-６７８９, card ４５３２-１２３４-５６７８-９０１２",
            "Paid $１,２５０.７５",
        ] {
            let result = lenient.extract(text);
            assert!(result.is_empty(), "{:?} yielded {:?}", text, result);
        }
    }

    #[test]
    fn test_context_window() {
        let extractor = EntityExtractor::new(ExtractionConfig {
            kinds: vec![EntityKind::Email],
            context_window: 8,
            ..ExtractionConfig::default()
        });
        let result = extractor.extract("Reach me at a@b.com today please");

        assert_eq!(
            result.get(EntityKind::Email)[0].context.as_deref(),
            Some("h me at a@b.com today p")
        );
    }
}
