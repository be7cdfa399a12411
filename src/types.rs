use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Word {
    /// proto3 JSON omits empty strings, so a missing word reads as "".
    #[serde(default, alias = "word")]
    pub text: String,
    /// Offsets omitted on the wire (proto3 JSON drops zero durations) read as zero.
    #[serde(default, alias = "startTime", alias = "start_time")]
    pub start: Timestamp,
    #[serde(default, alias = "endTime", alias = "end_time")]
    pub end: Timestamp,
}

impl Word {
    pub fn new(text: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One candidate transcription. Word order follows the recognizer; timing is
/// usually monotonic but that is not guaranteed.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl RecognitionAlternative {
    pub fn from_words(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }
}

/// One recognized segment; `alternatives` are ranked best-first.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
}

impl RecognitionResult {
    pub fn from_words(words: Vec<Word>) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative::from_words(words)],
        }
    }

    pub fn best(&self) -> Option<&RecognitionAlternative> {
        self.alternatives.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// 1-based and contiguous across a whole track.
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl Cue {
    pub fn duration(&self) -> Timestamp {
        self.end.saturating_sub(self.start)
    }
}
