use crate::timestamp::Timestamp;
use crate::types::{Cue, Word};

use super::BinDuration;

/// A closed cue that has not been numbered yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CueDraft {
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl CueDraft {
    pub(crate) fn into_cue(self, index: usize) -> Cue {
        Cue {
            index,
            start: self.start,
            end: self.end,
            text: self.text,
        }
    }
}

/// Cue being filled while walking one result's words.
#[derive(Clone, Debug)]
pub(crate) struct OpenCue {
    start: Timestamp,
    bin_end: Timestamp,
    /// End of the most recently absorbed word; becomes the cue end on close.
    last_end: Timestamp,
    text: String,
}

pub(crate) enum Transition {
    /// The word fit inside the bin and was absorbed.
    Accumulating(OpenCue),
    /// The word crossed the bin end: the previous cue is closed and the word
    /// opens the next one.
    Emitting { closed: CueDraft, opened: OpenCue },
}

impl OpenCue {
    /// Opens the first cue of a result.
    ///
    /// A first word whose whole-seconds part is zero snaps to the media start,
    /// dropping any sub-second remainder.
    pub(crate) fn at_result_start(word: &Word, bin: BinDuration) -> Self {
        let start = if word.start.whole_seconds() == 0 {
            Timestamp::ZERO
        } else {
            word.start
        };
        Self::starting_at(start, word, bin)
    }

    fn at_word(word: &Word, bin: BinDuration) -> Self {
        Self::starting_at(word.start, word, bin)
    }

    fn starting_at(start: Timestamp, word: &Word, bin: BinDuration) -> Self {
        Self {
            start,
            bin_end: start + bin.as_timestamp(),
            last_end: word.end,
            text: word.text.clone(),
        }
    }

    pub(crate) fn feed(mut self, word: &Word, bin: BinDuration) -> Transition {
        if word.end < self.bin_end {
            self.text.push(' ');
            self.text.push_str(&word.text);
            self.last_end = word.end;
            return Transition::Accumulating(self);
        }

        Transition::Emitting {
            closed: self.close(),
            opened: Self::at_word(word, bin),
        }
    }

    pub(crate) fn close(self) -> CueDraft {
        // Non-monotonic upstream words can put the last end before the start.
        let end = self.last_end.max(self.start);
        tracing::debug!(
            start_us = self.start.as_micros(),
            end_us = end.as_micros(),
            bin_end_us = self.bin_end.as_micros(),
            text = self.text.as_str(),
            "binning: closed cue"
        );
        CueDraft {
            start: self.start,
            end,
            text: self.text,
        }
    }
}
