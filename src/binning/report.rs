use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SubtitleError;
use crate::pipeline::defaults::create_parent_dir;
use crate::recognition::RejectedResult;
use crate::types::Cue;

use super::{BinDuration, BinnedTrack, ResultOutcome};

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub tracks: Vec<TrackReport>,
}

impl Report {
    /// Writes the report as pretty JSON with a trailing newline.
    pub fn write_json(&self, path: &Path) -> Result<(), SubtitleError> {
        create_parent_dir(path, "create report output directory")?;
        let mut file =
            File::create(path).map_err(|e| SubtitleError::io("create report file", e))?;
        serde_json::to_writer_pretty(&mut file, self)
            .map_err(|e| SubtitleError::json("serialize report", e))?;
        file.write_all(b"\n")
            .map_err(|e| SubtitleError::io("finalize report file", e))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub bin_seconds: f64,
    pub track_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub id: String,
    pub counts: TrackCounts,
    pub durations: DurationMetrics,
    pub structural: StructuralMetrics,
    pub skipped: Vec<SkippedResult>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackCounts {
    pub results_total: u32,
    pub results_binned: u32,
    pub results_skipped: u32,
    pub results_rejected: u32,
    pub cue_count: u32,
    pub word_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationMetrics {
    pub total_cue_ms: u64,
    pub mean_cue_ms: f32,
    pub max_cue_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralMetrics {
    /// Cues that start before the previous cue ends.
    pub overlapping_cue_count: u32,
    pub non_monotonic_start_count: u32,
    /// Tail cues may legitimately run past the bin span.
    pub over_bin_cue_count: u32,
    pub zero_length_cue_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipStage {
    /// Position indexes the raw response `results` array.
    Decode,
    /// Position indexes the decoded results handed to the binner.
    Binning,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedResult {
    pub stage: SkipStage,
    pub position: usize,
    pub reason: String,
}

pub fn compute_track_report(
    id: &str,
    track: &BinnedTrack,
    bin: BinDuration,
    rejected: &[RejectedResult],
) -> TrackReport {
    let mut skipped: Vec<SkippedResult> = rejected
        .iter()
        .map(|r| SkippedResult {
            stage: SkipStage::Decode,
            position: r.position,
            reason: r.message.clone(),
        })
        .collect();

    let mut results_binned = 0usize;
    let mut word_count = 0usize;
    for (position, outcome) in track.outcomes.iter().enumerate() {
        match outcome {
            ResultOutcome::Binned {
                word_count: words, ..
            } => {
                results_binned += 1;
                word_count += words;
            }
            ResultOutcome::Skipped(reason) => skipped.push(SkippedResult {
                stage: SkipStage::Binning,
                position,
                reason: reason.as_str().to_string(),
            }),
        }
    }
    let results_skipped = track.outcomes.len() - results_binned;

    let mut notes = Vec::new();
    if track.cues.is_empty() {
        notes.push("no_cues".to_string());
    }
    if !rejected.is_empty() {
        notes.push(format!("rejected_results={}", rejected.len()));
    }
    if results_skipped > 0 {
        notes.push(format!("skipped_results={results_skipped}"));
    }

    TrackReport {
        id: id.to_string(),
        counts: TrackCounts {
            results_total: to_u32(track.outcomes.len() + rejected.len()),
            results_binned: to_u32(results_binned),
            results_skipped: to_u32(results_skipped),
            results_rejected: to_u32(rejected.len()),
            cue_count: to_u32(track.cues.len()),
            word_count: to_u32(word_count),
        },
        durations: compute_duration_metrics(&track.cues),
        structural: compute_structural_metrics(&track.cues, bin),
        skipped,
        notes,
    }
}

fn compute_duration_metrics(cues: &[Cue]) -> DurationMetrics {
    let durations: Vec<u64> = cues.iter().map(|cue| cue.duration().as_millis()).collect();
    let total_cue_ms = durations.iter().sum::<u64>();
    let mean_cue_ms = if durations.is_empty() {
        0.0
    } else {
        (total_cue_ms as f64 / durations.len() as f64) as f32
    };
    DurationMetrics {
        total_cue_ms,
        mean_cue_ms,
        max_cue_ms: durations.iter().copied().max().unwrap_or(0),
    }
}

fn compute_structural_metrics(cues: &[Cue], bin: BinDuration) -> StructuralMetrics {
    let mut overlapping_cue_count = 0usize;
    let mut non_monotonic_start_count = 0usize;
    for pair in cues.windows(2) {
        let current = &pair[0];
        let next = &pair[1];
        if current.end > next.start {
            overlapping_cue_count += 1;
        }
        if current.start > next.start {
            non_monotonic_start_count += 1;
        }
    }

    let over_bin_cue_count = cues
        .iter()
        .filter(|cue| cue.duration() > bin.as_timestamp())
        .count();
    let zero_length_cue_count = cues.iter().filter(|cue| cue.end <= cue.start).count();

    StructuralMetrics {
        overlapping_cue_count: to_u32(overlapping_cue_count),
        non_monotonic_start_count: to_u32(non_monotonic_start_count),
        over_bin_cue_count: to_u32(over_bin_cue_count),
        zero_length_cue_count: to_u32(zero_length_cue_count),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
