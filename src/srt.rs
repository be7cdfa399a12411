//! SubRip rendering for binned cues.

use std::fmt::{self, Write as _};

use crate::timestamp::Timestamp;
use crate::types::Cue;

/// `HH:MM:SS,mmm`, truncating below the millisecond. Hours widen past two
/// digits instead of wrapping.
pub fn format_timestamp(ts: Timestamp) -> String {
    let total_ms = ts.as_millis();
    let millis = total_ms % 1_000;
    let total_secs = total_ms / 1_000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3_600;
    format!("{hours:02}:{mins:02}:{secs:02},{millis:03}")
}

/// Collapses runs of newlines and strips leading/trailing ones so cue text
/// cannot terminate its block early. Whitespace-only lines are kept.
fn legal_content(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n\n",
            self.index,
            format_timestamp(self.start),
            format_timestamp(self.end),
            legal_content(&self.text)
        )
    }
}

fn skip_reason(cue: &Cue) -> Option<&'static str> {
    if cue.text.trim().is_empty() {
        Some("no content")
    } else if cue.start >= cue.end {
        Some("start time >= end time")
    } else {
        None
    }
}

/// Stable-sorts cues by `(start, end, index)`, drops cues with no text or no
/// positive duration, and renumbers the survivors from 1.
pub fn sort_and_reindex(cues: &[Cue]) -> Vec<Cue> {
    let mut sorted: Vec<&Cue> = cues.iter().collect();
    sorted.sort_by_key(|cue| (cue.start, cue.end, cue.index));

    let mut out = Vec::with_capacity(sorted.len());
    for cue in sorted {
        if let Some(reason) = skip_reason(cue) {
            tracing::debug!(
                index = cue.index,
                start_us = cue.start.as_micros(),
                end_us = cue.end.as_micros(),
                reason,
                "srt: dropped cue"
            );
            continue;
        }
        out.push(Cue {
            index: out.len() + 1,
            ..cue.clone()
        });
    }
    out
}

/// Renders a SubRip document after [`sort_and_reindex`].
pub fn compose(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in sort_and_reindex(cues) {
        // Writing into a String cannot fail.
        let _ = write!(out, "{cue}");
    }
    out
}
