pub mod binning;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod recognition;
pub mod srt;
pub mod timestamp;
pub mod types;

pub use binning::report::{
    compute_track_report, Meta, Report, SkipStage, SkippedResult, TrackReport,
    REPORT_SCHEMA_VERSION,
};
pub use binning::{
    bin_cues, bin_track, BinDuration, BinnedTrack, ResultOutcome, SkipReason, DEFAULT_BIN_SECONDS,
};
pub use config::SubtitleConfig;
pub use error::SubtitleError;
pub use pipeline::builder::SubtitlePipelineBuilder;
pub use pipeline::runtime::{SubtitlePipeline, SubtitleRun};
pub use pipeline::traits::{CueGrouper, SubtitleSink, TranscriptSource};
pub use recognition::{load_response, parse_response, RecognizedTranscript, RejectedResult};
pub use timestamp::Timestamp;
pub use types::{Cue, RecognitionAlternative, RecognitionResult, Word};
