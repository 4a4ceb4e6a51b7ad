use crate::error::{Error, Result};

/// Tuning knobs of the sequential matcher. The defaults are the values the
/// matcher was designed around; change them only with field data at hand.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(default)]
pub struct MatcherConfig {
    /// How many target words a spoken word may jump over to resync.
    pub lookahead: usize,
    /// Normalized words shorter than this only match exactly.
    pub min_fuzzy_length: usize,
    /// Normalized words at least this long tolerate two edits instead of one.
    pub long_word_length: usize,
}

impl MatcherConfig {
    pub const DEFAULT_LOOKAHEAD: usize = 2;
    pub const DEFAULT_MIN_FUZZY_LENGTH: usize = 3;
    pub const DEFAULT_LONG_WORD_LENGTH: usize = 6;
    pub const MAX_LOOKAHEAD: usize = 8;

    /// Largest edit distance at which a word of `len` characters still
    /// counts as the same word.
    pub fn max_allowed_distance(&self, len: usize) -> usize {
        if len < self.min_fuzzy_length {
            0
        } else if len < self.long_word_length {
            1
        } else {
            2
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookahead > Self::MAX_LOOKAHEAD {
            return Err(Error::InvalidConfig {
                field: "lookahead",
                reason: format!("must be at most {}", Self::MAX_LOOKAHEAD),
            });
        }
        if self.min_fuzzy_length == 0 {
            return Err(Error::InvalidConfig {
                field: "min_fuzzy_length",
                reason: "must be positive".to_string(),
            });
        }
        if self.long_word_length < self.min_fuzzy_length {
            return Err(Error::InvalidConfig {
                field: "long_word_length",
                reason: format!("must be at least min_fuzzy_length ({})", self.min_fuzzy_length),
            });
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            lookahead: Self::DEFAULT_LOOKAHEAD,
            min_fuzzy_length: Self::DEFAULT_MIN_FUZZY_LENGTH,
            long_word_length: Self::DEFAULT_LONG_WORD_LENGTH,
        }
    }
}

/// How segment results drive completions and the highlight.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionMode {
    /// Hands-free: completions fire as soon as they are heard, recognition
    /// keeps running across any number of repetitions.
    #[default]
    AutoReset,
    /// Manual start/stop: one completion per final result, then stop.
    SingleShot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(default)]
pub struct SessionConfig {
    pub mode: SessionMode,
    pub matcher: MatcherConfig,
}

impl SessionConfig {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            matcher: MatcherConfig::default(),
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()
    }
}
