use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SubtitleError;
use crate::types::RecognitionResult;

/// Top-level recognizer document. Results stay as raw JSON so one bad entry
/// cannot fail the whole document.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// A result that could not be decoded. `position` indexes the response's
/// `results` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedResult {
    pub position: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecognizedTranscript {
    pub results: Vec<RecognitionResult>,
    pub rejected: Vec<RejectedResult>,
}

impl RecognizedTranscript {
    pub fn from_results(results: Vec<RecognitionResult>) -> Self {
        Self {
            results,
            rejected: Vec::new(),
        }
    }
}

pub fn parse_response(json: &str) -> Result<RecognizedTranscript, SubtitleError> {
    let raw: RawResponse =
        serde_json::from_str(json).map_err(|e| SubtitleError::json("parse recognition response", e))?;

    let mut transcript = RecognizedTranscript {
        results: Vec::with_capacity(raw.results.len()),
        rejected: Vec::new(),
    };
    for (position, value) in raw.results.into_iter().enumerate() {
        match serde_json::from_value::<RecognitionResult>(value) {
            Ok(result) => transcript.results.push(result),
            Err(err) => {
                tracing::warn!(
                    position,
                    error = %err,
                    "recognition: rejected malformed result"
                );
                transcript.rejected.push(RejectedResult {
                    position,
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(transcript)
}

pub fn load_response(path: &Path) -> Result<RecognizedTranscript, SubtitleError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| SubtitleError::io("read recognition response", e))?;
    parse_response(&data)
}
