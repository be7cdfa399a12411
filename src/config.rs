use crate::binning::{BinDuration, DEFAULT_BIN_SECONDS};
use crate::error::SubtitleError;

#[derive(Debug, Clone)]
pub struct SubtitleConfig {
    /// Recognizer response JSON read by the default transcript source.
    pub response_path: String,
    /// SubRip file written by the default sink.
    pub output_path: String,
    pub bin_seconds: f64,
}

impl SubtitleConfig {
    pub const DEFAULT_BIN_SECONDS: f64 = DEFAULT_BIN_SECONDS;

    pub fn bin_duration(&self) -> Result<BinDuration, SubtitleError> {
        BinDuration::from_secs_f64(self.bin_seconds)
    }
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            response_path: String::new(),
            output_path: "subtitles.srt".to_string(),
            bin_seconds: Self::DEFAULT_BIN_SECONDS,
        }
    }
}
