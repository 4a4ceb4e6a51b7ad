//! # Sequential matcher
//!
//! Walks a batch of spoken words against the target words from a start
//! index. Each spoken word either
//!
//! - matches the expected word (exactly, or within the length-based edit
//!   threshold) and advances the cursor by one,
//! - matches one of the next `lookahead` words, in which case the words in
//!   between are treated as unheard and skipped, or
//! - matches nothing nearby and is dropped without moving the cursor.
//!
//! Running past the last target word counts one completion and restarts at
//! index 0, so a single long utterance can complete the text several times.

use crate::config::MatcherConfig;
use crate::distance::is_fuzzy_match;
use crate::normalize::normalize;
use crate::tokenize::tokenize;

/// Outcome of one [`SequentialMatcher::match_batch`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct MatchResult {
    /// Times the cursor wrapped past the end of the target words.
    pub completions: u32,
    /// Index of the next expected target word, always `< len` for a
    /// non-empty target.
    pub current_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SequentialMatcher {
    config: MatcherConfig,
}

impl SequentialMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn match_batch<S, T>(&self, spoken: &[S], target: &[T], start_index: usize) -> MatchResult
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if target.is_empty() {
            return MatchResult::default();
        }

        let len = target.len();
        let mut idx = if start_index > len {
            tracing::warn!(start_index, len, "start_index_clamped");
            0
        } else {
            start_index
        };
        let mut completions = 0;

        for word in spoken {
            let word = word.as_ref();

            if idx >= len {
                completions += 1;
                idx = 0;
            }

            if self.matches(word, target[idx].as_ref()) {
                idx += 1;
                continue;
            }

            let window = self.config.lookahead.min(len - idx - 1);
            if let Some(skip) =
                (1..=window).find(|&skip| self.matches(word, target[idx + skip].as_ref()))
            {
                idx += skip + 1;
            }
        }

        if idx >= len {
            completions += 1;
            idx = 0;
        }

        MatchResult {
            completions,
            current_index: idx,
        }
    }

    fn matches(&self, spoken: &str, target: &str) -> bool {
        is_fuzzy_match(spoken, target, &self.config)
    }
}

/// [`SequentialMatcher::match_batch`] with the default configuration.
pub fn match_batch<S, T>(spoken: &[S], target: &[T], start_index: usize) -> MatchResult
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    SequentialMatcher::default().match_batch(spoken, target, start_index)
}

/// A reference text prepared for matching and display.
///
/// Keeps the whitespace tokens as written alongside the normalized words the
/// matcher sees. Tokens that normalize to nothing are shown but never
/// expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetText {
    reference: String,
    tokens: Vec<String>,
    words: Vec<String>,
    token_to_word: Vec<Option<usize>>,
}

impl TargetText {
    pub fn new(reference: &str) -> Self {
        let mut tokens = Vec::new();
        let mut words = Vec::new();
        let mut token_to_word = Vec::new();

        for token in tokenize(reference) {
            let word = normalize(token);
            if word.is_empty() {
                token_to_word.push(None);
            } else {
                token_to_word.push(Some(words.len()));
                words.push(word);
            }
            tokens.push(token.to_string());
        }

        Self {
            reference: reference.to_string(),
            tokens,
            words,
            token_to_word,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Normalized words, in matching order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Display tokens paired with the matching index they stand for.
    pub fn tokens(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.tokens
            .iter()
            .map(String::as_str)
            .zip(self.token_to_word.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
