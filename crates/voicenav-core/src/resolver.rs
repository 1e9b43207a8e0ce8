//! Keyword-to-room resolution with coverage-based confidence.

use serde::{Deserialize, Serialize};

use crate::room::{AliasTable, ROOM_ALIASES, RoomCategory};

/// Confidence assigned when the whole phrase is an alias.
pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;
/// Upper bound for partial matches.
pub const PARTIAL_MATCH_CEILING: f64 = 0.9;
/// Baseline added to every partial match.
pub const PARTIAL_MATCH_BASELINE: f64 = 0.3;
/// Weight applied to the alias coverage of the phrase.
pub const COVERAGE_WEIGHT: f64 = 0.8;

/// Outcome of resolving one phrase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// `None` when no alias occurs in the phrase.
    pub category: Option<RoomCategory>,
    /// In `[0.0, 1.0]`; `0.0` whenever `category` is `None`.
    pub confidence: f64,
}

impl Resolution {
    /// The unresolved result.
    pub const fn none() -> Self {
        Self {
            category: None,
            confidence: 0.0,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.category.is_some()
    }
}

/// Maps free-form phrases to a [`RoomCategory`].
///
/// Stateless apart from the borrowed alias table, so a single instance can be
/// shared freely across tasks.
#[derive(Debug, Clone, Copy)]
pub struct RoomResolver {
    aliases: &'static AliasTable,
}

impl Default for RoomResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomResolver {
    /// Creates a resolver over the built-in [`ROOM_ALIASES`].
    pub fn new() -> Self {
        Self::with_aliases(ROOM_ALIASES)
    }

    /// Creates a resolver over a custom, ordered alias table.
    pub fn with_aliases(aliases: &'static AliasTable) -> Self {
        Self { aliases }
    }

    /// Resolves `phrase` to the best-scoring room category.
    ///
    /// The phrase is lowercased and trimmed; nothing else is normalized.
    /// Every alias contained in the phrase is scored and the highest score
    /// wins. On equal scores the alias seen first in table order is kept.
    pub fn resolve(&self, phrase: &str) -> Resolution {
        let text = phrase.trim().to_lowercase();
        let mut best = Resolution::none();

        for (category, aliases) in self.aliases {
            for alias in aliases.iter() {
                let alias = alias.to_lowercase();
                if alias.is_empty() || !text.contains(&alias) {
                    continue;
                }

                let confidence = score(&text, &alias);
                tracing::debug!(alias = %alias, category = %category, confidence, "alias matched");

                if confidence > best.confidence {
                    best = Resolution {
                        category: Some(*category),
                        confidence,
                    };
                }
            }
        }

        best
    }
}

/// Scores an alias already known to be contained in `text`.
///
/// Lengths are counted in characters so CJK aliases get the same coverage
/// weighting as Latin ones.
pub fn score(text: &str, alias: &str) -> f64 {
    if alias == text {
        return EXACT_MATCH_CONFIDENCE;
    }
    if !text.contains(alias) {
        return 0.0;
    }
    let coverage = alias.chars().count() as f64 / text.chars().count() as f64;
    PARTIAL_MATCH_CEILING.min(coverage * COVERAGE_WEIGHT + PARTIAL_MATCH_BASELINE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(alias_len: usize, text_len: usize) -> f64 {
        PARTIAL_MATCH_CEILING
            .min(alias_len as f64 / text_len as f64 * COVERAGE_WEIGHT + PARTIAL_MATCH_BASELINE)
    }

    #[test]
    fn test_exact_alias_is_full_confidence() {
        let resolver = RoomResolver::new();
        let result = resolver.resolve("Kitchen");
        assert_eq!(result.category, Some(RoomCategory::Kitchen));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let result = RoomResolver::new().resolve("  living room \n");
        assert_eq!(result.category, Some(RoomCategory::LivingRoom));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_partial_match_uses_coverage() {
        let phrase = "I want to go to the living room";
        let result = RoomResolver::new().resolve(phrase);
        assert_eq!(result.category, Some(RoomCategory::LivingRoom));
        assert_eq!(result.confidence, partial("living room".len(), phrase.len()));
        assert!(result.confidence >= 0.3 && result.confidence <= 0.9);
    }

    #[test]
    fn test_cjk_lengths_count_characters() {
        // "去客厅" is three characters, the alias two.
        let result = RoomResolver::new().resolve("去客厅");
        assert_eq!(result.category, Some(RoomCategory::LivingRoom));
        assert_eq!(result.confidence, 0.9f64.min(2.0 / 3.0 * 0.8 + 0.3));
    }

    #[test]
    fn test_partial_match_is_capped() {
        // 7/8 coverage would score 1.0 without the ceiling.
        let result = RoomResolver::new().resolve("kitchen!");
        assert_eq!(result.category, Some(RoomCategory::Kitchen));
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_long_phrase_keeps_baseline() {
        let phrase = format!("study{}", " please".repeat(200));
        let result = RoomResolver::new().resolve(&phrase);
        assert_eq!(result.category, Some(RoomCategory::Study));
        assert!(result.confidence > 0.3 && result.confidence < 0.31);
    }

    #[test]
    fn test_tie_keeps_first_in_table_order() {
        // "bedroom" and "kitchen" are both 7 characters; bedroom comes first.
        let result = RoomResolver::new().resolve("kitchen bedroom");
        assert_eq!(result.category, Some(RoomCategory::Bedroom));
    }

    #[test]
    fn test_longer_alias_wins() {
        // "dining room" covers more of the phrase than "study".
        let result = RoomResolver::new().resolve("the dining room or the study");
        assert_eq!(result.category, Some(RoomCategory::DiningRoom));
    }

    #[test]
    fn test_empty_phrase_is_unresolved() {
        let result = RoomResolver::new().resolve("");
        assert_eq!(result, Resolution::none());
        let result = RoomResolver::new().resolve("   ");
        assert_eq!(result, Resolution::none());
    }

    #[test]
    fn test_no_alias_is_unresolved() {
        let result = RoomResolver::new().resolve("take me to the garage");
        assert!(!result.is_resolved());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_punctuation_is_not_stripped() {
        // "living-room" does not contain the alias "living room".
        let result = RoomResolver::new().resolve("living-room");
        assert!(!result.is_resolved());
    }

    #[test]
    fn test_custom_alias_table() {
        static TABLE: &AliasTable = &[(RoomCategory::Balcony, &["terrace"])];
        let resolver = RoomResolver::with_aliases(TABLE);
        assert_eq!(
            resolver.resolve("terrace").category,
            Some(RoomCategory::Balcony)
        );
        assert!(!resolver.resolve("balcony").is_resolved());
    }

    #[test]
    fn test_score_without_containment_is_zero() {
        assert_eq!(score("kitchen", "study"), 0.0);
    }
}
