pub mod callbacks;
pub mod config;
pub mod distance;
pub mod error;
pub mod input;
pub mod matcher;
pub mod normalize;
pub mod progress;
pub mod session;
pub mod tokenize;
pub mod view;

pub use callbacks::{EventLog, SessionCallbacks, SessionEvent};
pub use config::{MatcherConfig, SessionConfig, SessionMode};
pub use distance::{distance, is_fuzzy_match, max_allowed_distance};
pub use error::{Error, Result};
pub use input::{
    NativeAlternative, NativeEngineSource, NativeRecognitionEvent, SpeechSegmentSource,
    TranscriptSegment, WebSpeechEvent, WebSpeechResult, WebSpeechSource, drive,
};
pub use matcher::{MatchResult, SequentialMatcher, TargetText, match_batch};
pub use normalize::{is_arabic_char, normalize, remove_tashkeel_only};
pub use progress::{RecitationStore, Zeker};
pub use session::{MatchCursor, RecitationSession, SegmentOutcome, SegmentState};
pub use tokenize::{normalized_words, tokenize};
pub use view::{FrameWord, RecitationFrame, WordState};
