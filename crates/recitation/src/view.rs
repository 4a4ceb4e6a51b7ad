use crate::matcher::TargetText;
use crate::normalize::remove_tashkeel_only;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WordState {
    Recited,
    Current,
    Pending,
    /// Not a matchable word (punctuation, numbering); never highlighted.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct FrameWord {
    pub text: String,
    pub state: WordState,
}

/// Everything a renderer needs to draw the reference text with progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct RecitationFrame {
    pub words: Vec<FrameWord>,
    pub highlight_index: usize,
    pub completions_total: u32,
}

impl RecitationFrame {
    pub(crate) fn build(target: &TargetText, highlight_index: usize, completions_total: u32) -> Self {
        let words = target
            .tokens()
            .map(|(token, index)| FrameWord {
                text: remove_tashkeel_only(token),
                state: match index {
                    None => WordState::Ignored,
                    Some(i) if i < highlight_index => WordState::Recited,
                    Some(i) if i == highlight_index => WordState::Current,
                    Some(_) => WordState::Pending,
                },
            })
            .collect();

        Self {
            words,
            highlight_index,
            completions_total,
        }
    }

    pub fn recited(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(|w| w.state == WordState::Recited)
            .map(|w| w.text.as_str())
    }

    pub fn current(&self) -> Option<&str> {
        self.words
            .iter()
            .find(|w| w.state == WordState::Current)
            .map(|w| w.text.as_str())
    }
}

impl std::fmt::Display for RecitationFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match word.state {
                WordState::Recited => write!(f, "[{}]", word.text)?,
                WordState::Current => write!(f, ">{}<", word.text)?,
                WordState::Pending | WordState::Ignored => f.write_str(&word.text)?,
            }
        }
        Ok(())
    }
}
