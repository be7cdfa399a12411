use crate::binning::{BinDuration, BinnedTrack};
use crate::error::SubtitleError;
use crate::recognition::RecognizedTranscript;
use crate::types::{Cue, RecognitionResult};

/// Upstream speech recognizer output, already reduced to timed words.
pub trait TranscriptSource: Send + Sync {
    fn recognize(&self) -> Result<RecognizedTranscript, SubtitleError>;

    /// Short label used in logs and reports.
    fn label(&self) -> String;
}

pub trait CueGrouper: Send + Sync {
    fn group_cues(&self, results: &[RecognitionResult], bin: BinDuration) -> BinnedTrack;
}

pub trait SubtitleSink: Send + Sync {
    fn write_cues(&self, cues: &[Cue]) -> Result<(), SubtitleError>;
}
