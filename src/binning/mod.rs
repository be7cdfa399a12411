use serde::Serialize;

use crate::error::SubtitleError;
use crate::timestamp::Timestamp;
use crate::types::{Cue, RecognitionResult};

pub mod report;
mod state;
#[cfg(test)]
mod tests;

use state::{CueDraft, OpenCue, Transition};

pub const DEFAULT_BIN_SECONDS: f64 = 3.0;

/// Span a cue may cover before the next word opens a new cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinDuration(Timestamp);

impl BinDuration {
    pub fn from_secs_f64(seconds: f64) -> Result<Self, SubtitleError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(SubtitleError::invalid_argument(format!(
                "bin_seconds must be a positive finite number, got {seconds}"
            )));
        }
        // Finite and positive, so `None` only means the span overflowed.
        let span = Timestamp::from_secs_f64(seconds).unwrap_or(Timestamp::from_micros(u64::MAX));
        if span == Timestamp::ZERO {
            return Err(SubtitleError::invalid_argument(format!(
                "bin_seconds {seconds} is below microsecond resolution"
            )));
        }
        Ok(Self(span))
    }

    pub fn as_timestamp(self) -> Timestamp {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Default for BinDuration {
    fn default() -> Self {
        Self(Timestamp::from_millis(3_000))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoAlternatives,
    EmptyWordList,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoAlternatives => "no_alternatives",
            Self::EmptyWordList => "empty_word_list",
        }
    }
}

/// What happened to one recognition result, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome {
    Binned { cue_count: usize, word_count: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinnedTrack {
    pub cues: Vec<Cue>,
    pub outcomes: Vec<ResultOutcome>,
}

struct BinnedResult {
    drafts: Vec<CueDraft>,
    word_count: usize,
}

/// Groups the best alternative of every result into cues no wider than
/// `bin_seconds`, numbering them 1..N across the whole input.
///
/// Results without words are skipped; only an invalid `bin_seconds` fails.
pub fn bin_cues(
    results: &[RecognitionResult],
    bin_seconds: f64,
) -> Result<Vec<Cue>, SubtitleError> {
    let bin = BinDuration::from_secs_f64(bin_seconds)?;
    Ok(bin_track(results, bin).cues)
}

pub fn bin_track(results: &[RecognitionResult], bin: BinDuration) -> BinnedTrack {
    let mut track = BinnedTrack {
        cues: Vec::new(),
        outcomes: Vec::with_capacity(results.len()),
    };

    for (position, outcome) in results
        .iter()
        .map(|result| bin_result(result, bin))
        .enumerate()
    {
        match outcome {
            Ok(binned) => {
                track.outcomes.push(ResultOutcome::Binned {
                    cue_count: binned.drafts.len(),
                    word_count: binned.word_count,
                });
                for draft in binned.drafts {
                    let index = track.cues.len() + 1;
                    track.cues.push(draft.into_cue(index));
                }
            }
            Err(reason) => {
                tracing::warn!(
                    position,
                    reason = reason.as_str(),
                    "binning: skipped recognition result"
                );
                track.outcomes.push(ResultOutcome::Skipped(reason));
            }
        }
    }

    track
}

fn bin_result(result: &RecognitionResult, bin: BinDuration) -> Result<BinnedResult, SkipReason> {
    let best = result.best().ok_or(SkipReason::NoAlternatives)?;
    let (first, rest) = best
        .words
        .split_first()
        .ok_or(SkipReason::EmptyWordList)?;

    let mut drafts = Vec::new();
    let mut open = OpenCue::at_result_start(first, bin);
    for word in rest {
        open = match open.feed(word, bin) {
            Transition::Accumulating(open) => open,
            Transition::Emitting { closed, opened } => {
                drafts.push(closed);
                opened
            }
        };
    }
    drafts.push(open.close());

    Ok(BinnedResult {
        drafts,
        word_count: best.words.len(),
    })
}
