// Essay Text Statistics
// Surface statistics used by the heuristic fallback and its analysis text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Discourse markers that show up disproportionately in template-like prose.
pub const FORMAL_MARKERS: [&str; 6] = [
    "furthermore",
    "moreover",
    "consequently",
    "therefore",
    "nevertheless",
    "subsequently",
];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+").expect("word regex"))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EssayStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    /// Distinct lowercased words over total words (type-token ratio).
    pub vocabulary_diversity: f64,
    /// Occurrences of [`FORMAL_MARKERS`], case-insensitive.
    pub formal_word_count: usize,
}

/// Compute essay surface statistics.
///
/// Words are whitespace-delimited tokens; sentences are the non-empty
/// segments produced by splitting on `.`, `!` and `?`.
pub fn compute_stats(text: &str) -> EssayStats {
    let words: Vec<&str> = word_re().find_iter(text).map(|m| m.as_str()).collect();
    let word_count = words.len();

    if word_count == 0 {
        return EssayStats::default();
    }

    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);

    let avg_words_per_sentence = word_count as f64 / sentence_count as f64;

    let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let vocabulary_diversity = distinct.len() as f64 / word_count as f64;

    let lowered = text.to_lowercase();
    let formal_word_count = FORMAL_MARKERS
        .iter()
        .map(|marker| lowered.matches(marker).count())
        .sum();

    EssayStats {
        word_count,
        sentence_count,
        avg_words_per_sentence,
        vocabulary_diversity,
        formal_word_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let stats = compute_stats("");
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
    }

    #[test]
    fn test_word_and_sentence_counts() {
        let stats = compute_stats("One two three. Four five six! Seven?");
        assert_eq!(stats.word_count, 7);
        assert_eq!(stats.sentence_count, 3);
        assert!((stats.avg_words_per_sentence - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_sentence() {
        let stats = compute_stats("a run on fragment with no ending");
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.word_count, 7);
    }

    #[test]
    fn test_vocabulary_diversity_lowercases() {
        let stats = compute_stats("The the THE cat.");
        assert_eq!(stats.word_count, 4);
        // "the" x3 collapses; "the"/"cat." remain distinct
        assert!((stats.vocabulary_diversity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_formal_markers_case_insensitive() {
        let stats = compute_stats("Furthermore, it rained. MOREOVER, therefore we left.");
        assert_eq!(stats.formal_word_count, 3);
    }
}
