use std::collections::VecDeque;

use crate::callbacks::SessionCallbacks;
use crate::session::RecitationSession;

/// Backend-agnostic recognizer result: the transcript of the current
/// utterance so far, and whether the recognizer considers it settled.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, is_final: bool) -> Self {
        Self {
            text: text.into(),
            is_final,
        }
    }
}

/// A speech recognizer backend, seen as a pull-based stream of segments.
///
/// Implementations translate their backend's event shape into
/// [`TranscriptSegment`]s and skip events that carry no transcript.
pub trait SpeechSegmentSource {
    fn next_segment(&mut self) -> Option<TranscriptSegment>;
}

// ── Native engine ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAlternative {
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Result event of an on-device recognition engine: ranked alternatives for
/// the current utterance plus a finality flag.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeRecognitionEvent {
    pub results: Vec<NativeAlternative>,
    pub is_final: bool,
}

impl NativeRecognitionEvent {
    /// The best alternative as a segment, or `None` when there is none.
    pub fn to_segment(&self) -> Option<TranscriptSegment> {
        let best = self.results.first()?;
        Some(TranscriptSegment {
            text: best.transcript.clone(),
            is_final: self.is_final,
        })
    }
}

pub struct NativeEngineSource<I> {
    events: I,
}

impl<I> NativeEngineSource<I>
where
    I: Iterator<Item = NativeRecognitionEvent>,
{
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<I> SpeechSegmentSource for NativeEngineSource<I>
where
    I: Iterator<Item = NativeRecognitionEvent>,
{
    fn next_segment(&mut self) -> Option<TranscriptSegment> {
        self.events.find_map(|event| event.to_segment())
    }
}

// ── Browser speech API ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSpeechResult {
    pub transcript: String,
    pub is_final: bool,
}

/// Result event of a browser speech API in continuous mode.
///
/// `results` holds every result of the recognition session; entries from
/// `result_index` on belong to the utterance that changed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSpeechEvent {
    pub result_index: usize,
    pub results: Vec<WebSpeechResult>,
}

impl WebSpeechEvent {
    /// Segments for the changed results.
    ///
    /// Results up to the last final one are settled and come out as one final
    /// segment; any interim results after it follow as a partial segment.
    pub fn to_segments(&self) -> Vec<TranscriptSegment> {
        let Some(changed) = self.results.get(self.result_index..) else {
            return Vec::new();
        };

        let split = changed
            .iter()
            .rposition(|r| r.is_final)
            .map_or(0, |last| last + 1);
        let (settled, interim) = changed.split_at(split);

        let mut segments = Vec::with_capacity(2);
        if !settled.is_empty() {
            segments.push(TranscriptSegment::new(join_transcripts(settled), true));
        }
        if !interim.is_empty() {
            segments.push(TranscriptSegment::new(join_transcripts(interim), false));
        }
        segments
    }
}

fn join_transcripts(results: &[WebSpeechResult]) -> String {
    results
        .iter()
        .map(|r| r.transcript.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct WebSpeechSource<I> {
    events: I,
    pending: VecDeque<TranscriptSegment>,
}

impl<I> WebSpeechSource<I>
where
    I: Iterator<Item = WebSpeechEvent>,
{
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
            pending: VecDeque::new(),
        }
    }
}

impl<I> SpeechSegmentSource for WebSpeechSource<I>
where
    I: Iterator<Item = WebSpeechEvent>,
{
    fn next_segment(&mut self) -> Option<TranscriptSegment> {
        loop {
            if let Some(segment) = self.pending.pop_front() {
                return Some(segment);
            }
            let event = self.events.next()?;
            self.pending.extend(event.to_segments());
        }
    }
}

// ── Driver ───────────────────────────────────────────────────────────────────

/// Feed every segment of `source` into `session`, in order.
///
/// Stops pulling as soon as the session asks recognition to stop. Returns the
/// number of segments handled.
pub fn drive(
    session: &mut RecitationSession,
    source: &mut dyn SpeechSegmentSource,
    callbacks: &mut dyn SessionCallbacks,
) -> usize {
    let mut handled = 0;

    while let Some(segment) = source.next_segment() {
        let outcome = session.on_transcript_segment(&segment.text, segment.is_final, callbacks);
        handled += 1;

        if outcome.stop_requested {
            tracing::debug!(handled, "source_drained_on_stop");
            break;
        }
    }

    handled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(transcript: &str, is_final: bool) -> NativeRecognitionEvent {
        NativeRecognitionEvent {
            results: vec![NativeAlternative {
                transcript: transcript.to_string(),
                confidence: None,
            }],
            is_final,
        }
    }

    fn web(result_index: usize, results: &[(&str, bool)]) -> WebSpeechEvent {
        WebSpeechEvent {
            result_index,
            results: results
                .iter()
                .map(|&(t, f)| WebSpeechResult {
                    transcript: t.to_string(),
                    is_final: f,
                })
                .collect(),
        }
    }

    #[test]
    fn native_uses_best_alternative() {
        let mut event = native("سبحان الله", true);
        event.results.push(NativeAlternative {
            transcript: "سبحان".to_string(),
            confidence: Some(0.2),
        });
        assert_eq!(
            event.to_segment(),
            Some(TranscriptSegment::new("سبحان الله", true))
        );
    }

    #[test]
    fn native_skips_events_without_results() {
        let empty = NativeRecognitionEvent {
            results: vec![],
            is_final: false,
        };
        let mut source = NativeEngineSource::new(vec![empty, native("الله", false)]);

        assert_eq!(
            source.next_segment(),
            Some(TranscriptSegment::new("الله", false))
        );
        assert_eq!(source.next_segment(), None);
    }

    #[test]
    fn web_joins_results_from_result_index() {
        let event = web(1, &[("قديم", true), ("سبحان", false), (" الله ", false)]);
        assert_eq!(
            event.to_segments(),
            [TranscriptSegment::new("سبحان الله", false)]
        );

        let event = web(1, &[("قديم", true), ("سبحان", true), ("الله", true)]);
        assert_eq!(
            event.to_segments(),
            [TranscriptSegment::new("سبحان الله", true)]
        );
    }

    #[test]
    fn web_splits_settled_results_from_interim_tail() {
        let event = web(
            0,
            &[("سبحان الله", true), ("وبحمده", true), ("سبحان", false)],
        );
        assert_eq!(
            event.to_segments(),
            [
                TranscriptSegment::new("سبحان الله وبحمده", true),
                TranscriptSegment::new("سبحان", false),
            ]
        );
    }

    #[test]
    fn web_source_yields_both_halves_of_a_split_event() {
        let mut source = WebSpeechSource::new(vec![
            web(0, &[("سبحان الله", true), ("وبحمده", false)]),
            web(1, &[("سبحان الله", true), ("وبحمده", true)]),
        ]);

        assert_eq!(
            source.next_segment(),
            Some(TranscriptSegment::new("سبحان الله", true))
        );
        assert_eq!(
            source.next_segment(),
            Some(TranscriptSegment::new("وبحمده", false))
        );
        assert_eq!(
            source.next_segment(),
            Some(TranscriptSegment::new("وبحمده", true))
        );
        assert_eq!(source.next_segment(), None);
    }

    #[test]
    fn web_skips_out_of_range_index() {
        assert!(web(2, &[("سبحان", true)]).to_segments().is_empty());
        assert!(web(1, &[("سبحان", true)]).to_segments().is_empty());
    }

    #[test]
    fn web_events_deserialize_from_camel_case() {
        let event: WebSpeechEvent = serde_json::from_str(
            r#"{ "resultIndex": 0, "results": [{ "transcript": "الله", "isFinal": true }] }"#,
        )
        .unwrap();
        assert_eq!(event, web(0, &[("الله", true)]));
    }

    #[test]
    fn drive_stops_after_stop_request() {
        use crate::callbacks::EventLog;
        use crate::config::{SessionConfig, SessionMode};

        let mut session = RecitationSession::with_reference_text(
            SessionConfig::new(SessionMode::SingleShot),
            "سبحان الله",
        );
        let mut source = NativeEngineSource::new(vec![
            native("سبحان", false),
            native("سبحان الله", true),
            native("سبحان الله", true),
        ]);
        let mut log = EventLog::new();

        let handled = drive(&mut session, &mut source, &mut log);

        assert_eq!(handled, 2);
        assert_eq!(log.completions(), 1);
        assert!(source.next_segment().is_some());
    }
}
