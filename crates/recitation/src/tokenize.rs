use crate::normalize::normalize;

/// Split `text` on runs of whitespace, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Tokenize, then normalize every token on its own.
///
/// Tokens that normalize to nothing (punctuation, digits, Latin) cannot be
/// matched against anything and are dropped.
pub fn normalized_words(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}
