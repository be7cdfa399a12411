use crate::binning::report::{compute_track_report, TrackReport};
use crate::binning::BinDuration;
use crate::error::SubtitleError;
use crate::pipeline::traits::{CueGrouper, SubtitleSink, TranscriptSource};
use crate::types::Cue;

pub struct SubtitlePipeline {
    bin: BinDuration,
    source: Box<dyn TranscriptSource>,
    grouper: Box<dyn CueGrouper>,
    sink: Box<dyn SubtitleSink>,
}

pub(crate) struct SubtitlePipelineParts {
    pub bin: BinDuration,
    pub source: Box<dyn TranscriptSource>,
    pub grouper: Box<dyn CueGrouper>,
    pub sink: Box<dyn SubtitleSink>,
}

#[derive(Debug, Clone)]
pub struct SubtitleRun {
    pub cues: Vec<Cue>,
    pub report: TrackReport,
}

impl SubtitlePipeline {
    pub(crate) fn from_parts(parts: SubtitlePipelineParts) -> Self {
        Self {
            bin: parts.bin,
            source: parts.source,
            grouper: parts.grouper,
            sink: parts.sink,
        }
    }

    pub fn bin(&self) -> BinDuration {
        self.bin
    }

    /// Recognize, bin and write one track. Nothing is written if recognition
    /// fails.
    pub fn run(&self) -> Result<SubtitleRun, SubtitleError> {
        let label = self.source.label();
        let transcript = self.source.recognize()?;
        let track = self.grouper.group_cues(&transcript.results, self.bin);
        let report = compute_track_report(&label, &track, self.bin, &transcript.rejected);

        if report.counts.results_rejected > 0 || report.counts.results_skipped > 0 {
            tracing::warn!(
                source = label.as_str(),
                rejected = report.counts.results_rejected,
                skipped = report.counts.results_skipped,
                "pipeline: some recognition results produced no cues"
            );
        }

        self.sink.write_cues(&track.cues)?;
        tracing::info!(
            source = label.as_str(),
            cues = report.counts.cue_count,
            words = report.counts.word_count,
            bin_seconds = self.bin.as_secs_f64(),
            "pipeline: wrote subtitle track"
        );

        Ok(SubtitleRun {
            cues: track.cues,
            report,
        })
    }
}
