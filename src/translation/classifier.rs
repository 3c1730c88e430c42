/*!
 * Text-complexity classification for prompt-strategy selection.
 *
 * The heuristic implementation scores word count, a fixed idiom allow-list,
 * and non-standard symbols. It is deliberately shallow: the allow-list is
 * literal phrase matching, not idiom detection, so texts with unlisted
 * idioms will classify as simpler than they are. The trait seam exists so a
 * model-based classifier can replace it without touching the pipeline.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Debug;

use crate::translation::prompts::PromptStrategy;

/// Known idiom phrases, matched case-insensitively as literal substrings
const IDIOM_PATTERNS: &[&str] = &[
    "kick the bucket",
    "break a leg",
    "piece of cake",
    "under the weather",
    "hit the sack",
    "spill the beans",
    "once in a blue moon",
    "cost an arm and a leg",
    "raining cats and dogs",
    "bite the bullet",
    "burn the midnight oil",
    "let the cat out of the bag",
];

// Anything outside word characters, whitespace, and ordinary punctuation
static SYMBOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s.,!?;:'"()-]"#).expect("valid symbol pattern"));

/// Strategy selection seam
pub trait ComplexityClassifier: Send + Sync + Debug {
    /// Pick a prompt strategy for the given input text
    fn classify(&self, text: &str) -> PromptStrategy;
}

/// Word-count and allow-list based classifier
///
/// `PromptStrategy::StepwiseReasoning` is never chosen automatically; it is
/// reachable only through an explicit strategy override.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    /// Create a new heuristic classifier
    pub fn new() -> Self {
        Self
    }

    /// Check the idiom allow-list
    pub fn contains_idiom(text: &str) -> bool {
        let lowered = text.to_lowercase();
        IDIOM_PATTERNS.iter().any(|idiom| lowered.contains(idiom))
    }

    /// Check for non-standard punctuation or symbols
    pub fn contains_symbols(text: &str) -> bool {
        SYMBOL_PATTERN.is_match(text)
    }
}

impl ComplexityClassifier for HeuristicClassifier {
    fn classify(&self, text: &str) -> PromptStrategy {
        let word_count = text.split_whitespace().count();
        let has_idiom = Self::contains_idiom(text);
        let has_symbols = Self::contains_symbols(text);

        if word_count <= 5 && !has_idiom && !has_symbols {
            PromptStrategy::Minimal
        } else if word_count <= 15 && !has_idiom {
            PromptStrategy::SingleExample
        } else {
            PromptStrategy::MultiExample
        }
    }
}
