use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SubtitleError;

const MICROS_PER_SEC: u64 = 1_000_000;
const MICROS_PER_MILLI: u64 = 1_000;
const NANOS_PER_MICRO: u32 = 1_000;
const MAX_NANOS: i64 = 999_999_999;
const MAX_FRACTION_DIGITS: usize = 9;

/// Offset from the start of the media.
///
/// Every offset is held as a whole number of microseconds. Nanosecond input is
/// truncated (not rounded) to microseconds at the boundary, so two offsets
/// that differ only below one microsecond compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    micros: u64,
}

impl Timestamp {
    pub const ZERO: Self = Self { micros: 0 };

    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self {
            micros: millis.saturating_mul(MICROS_PER_MILLI),
        }
    }

    /// Builds an offset from protobuf-style `(seconds, nanos)` parts.
    pub fn from_parts(seconds: u64, nanos: u32) -> Self {
        Self {
            micros: seconds
                .saturating_mul(MICROS_PER_SEC)
                .saturating_add(u64::from(nanos / NANOS_PER_MICRO)),
        }
    }

    /// Rounds a fractional second count to the nearest microsecond.
    /// Returns `None` for negative or non-finite input.
    pub fn from_secs_f64(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        let micros = (seconds * MICROS_PER_SEC as f64).round();
        if micros >= u64::MAX as f64 {
            return None;
        }
        Some(Self {
            micros: micros as u64,
        })
    }

    /// Parses a proto3 JSON duration such as `"3s"`, `"1.5s"` or `"0.000001s"`.
    pub fn parse_duration_str(text: &str) -> Result<Self, SubtitleError> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_suffix('s')
            .ok_or_else(|| SubtitleError::malformed_timestamp(text, "missing 's' suffix"))?;
        if body.starts_with('-') {
            return Err(SubtitleError::malformed_timestamp(text, "negative offset"));
        }

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (body, None),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SubtitleError::malformed_timestamp(
                text,
                "whole seconds must be decimal digits",
            ));
        }
        let seconds: u64 = whole
            .parse()
            .map_err(|_| SubtitleError::malformed_timestamp(text, "whole seconds out of range"))?;

        let nanos = match fraction {
            None => 0,
            Some(digits) => {
                if digits.is_empty()
                    || digits.len() > MAX_FRACTION_DIGITS
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(SubtitleError::malformed_timestamp(
                        text,
                        "fraction must have one to nine decimal digits",
                    ));
                }
                let padded = format!("{digits:0<width$}", width = MAX_FRACTION_DIGITS);
                padded.parse::<u32>().map_err(|_| {
                    SubtitleError::malformed_timestamp(text, "fraction out of range")
                })?
            }
        };

        Ok(Self::from_parts(seconds, nanos))
    }

    pub const fn as_micros(self) -> u64 {
        self.micros
    }

    pub const fn as_millis(self) -> u64 {
        self.micros / MICROS_PER_MILLI
    }

    pub const fn whole_seconds(self) -> u64 {
        self.micros / MICROS_PER_SEC
    }

    pub const fn subsec_micros(self) -> u32 {
        (self.micros % MICROS_PER_SEC) as u32
    }

    pub fn as_secs_f64(self) -> f64 {
        self.micros as f64 / MICROS_PER_SEC as f64
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            micros: self.micros.saturating_add(other.micros),
        }
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            micros: self.micros.saturating_sub(other.micros),
        }
    }
}

impl Add for Timestamp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

/// Renders the proto3 JSON duration form, using 0, 3 or 6 fractional digits.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.whole_seconds();
        let micros = self.subsec_micros();
        if micros == 0 {
            write!(f, "{seconds}s")
        } else if micros % 1_000 == 0 {
            write!(f, "{seconds}.{:03}s", micros / 1_000)
        } else {
            write!(f, "{seconds}.{micros:06}s")
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Wire shapes accepted for an offset.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Text(String),
    Seconds(f64),
    Parts {
        #[serde(default)]
        seconds: RawSeconds,
        // Absent nanos is the legacy shape: the remainder is zero.
        #[serde(default)]
        nanos: Option<i64>,
    },
}

/// proto3 JSON encodes int64 as a string, other producers use a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Int(i64),
    Text(String),
}

impl Default for RawSeconds {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl RawOffset {
    fn into_timestamp(self) -> Result<Timestamp, SubtitleError> {
        match self {
            Self::Text(text) => Timestamp::parse_duration_str(&text),
            Self::Seconds(seconds) => Timestamp::from_secs_f64(seconds).ok_or_else(|| {
                SubtitleError::malformed_timestamp(
                    seconds.to_string(),
                    "seconds must be finite and non-negative",
                )
            }),
            Self::Parts { seconds, nanos } => {
                let seconds = match seconds {
                    RawSeconds::Int(value) => value,
                    RawSeconds::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                        SubtitleError::malformed_timestamp(text.clone(), "seconds is not an integer")
                    })?,
                };
                if seconds < 0 {
                    return Err(SubtitleError::malformed_timestamp(
                        seconds.to_string(),
                        "negative offset",
                    ));
                }
                let nanos = nanos.unwrap_or(0);
                if !(0..=MAX_NANOS).contains(&nanos) {
                    return Err(SubtitleError::malformed_timestamp(
                        nanos.to_string(),
                        "nanos must be within 0..=999999999",
                    ));
                }
                Ok(Timestamp::from_parts(seconds as u64, nanos as u32))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawOffset::deserialize(deserializer)?
            .into_timestamp()
            .map_err(serde::de::Error::custom)
    }
}
