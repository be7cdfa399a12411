use std::fs;
use std::path::{Path, PathBuf};

use crate::binning::{bin_track, BinDuration, BinnedTrack};
use crate::error::SubtitleError;
use crate::pipeline::traits::{CueGrouper, SubtitleSink, TranscriptSource};
use crate::recognition::{load_response, RecognizedTranscript};
use crate::srt::compose;
use crate::types::{Cue, RecognitionResult};

pub struct JsonResponseFile {
    path: PathBuf,
}

impl JsonResponseFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TranscriptSource for JsonResponseFile {
    fn recognize(&self) -> Result<RecognizedTranscript, SubtitleError> {
        load_response(&self.path)
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct TimeBinGrouper;

impl CueGrouper for TimeBinGrouper {
    fn group_cues(&self, results: &[RecognitionResult], bin: BinDuration) -> BinnedTrack {
        bin_track(results, bin)
    }
}

pub struct SrtFileSink {
    path: PathBuf,
}

impl SrtFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Creates the parent directory of an output file, if it has one.
pub(crate) fn create_parent_dir(path: &Path, context: &'static str) -> Result<(), SubtitleError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|e| SubtitleError::io(context, e)),
        None => Ok(()),
    }
}

impl SubtitleSink for SrtFileSink {
    fn write_cues(&self, cues: &[Cue]) -> Result<(), SubtitleError> {
        create_parent_dir(&self.path, "create subtitle output directory")?;
        fs::write(&self.path, compose(cues))
            .map_err(|e| SubtitleError::io("write subtitle file", e))
    }
}
