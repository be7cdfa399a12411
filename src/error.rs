use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubtitleError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error("malformed timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: &'static str },
}

impl SubtitleError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_timestamp(value: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedTimestamp {
            value: value.into(),
            reason,
        }
    }
}
