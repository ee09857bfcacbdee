//! Shared error types across rockblock crates.

use std::fmt;

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid request that never reached the decoder.
    BadRequest,
    /// Payload is not well-formed urlencoded data.
    DecodeFailed,
    /// Payload decoded but one or more fields did not coerce.
    MappingFailed,
    /// Invalid gateway configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::DecodeFailed => "DECODE_FAILED",
            ClientCode::MappingFailed => "MAPPING_FAILED",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Failure to turn a raw payload into a `StructuredValue`.
///
/// Offsets are byte positions in the raw payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid percent-escape at byte {offset}")]
    InvalidEscape { offset: usize },
    #[error("payload is not valid UTF-8 after percent-decoding")]
    InvalidUtf8,
    #[error("parameter `{segment}` has no `=` separator")]
    MissingSeparator { segment: String },
    #[error("empty key segment in `{key}`")]
    EmptyKey { key: String },
    #[error("unterminated `[` in key `{key}`")]
    UnterminatedBracket { key: String },
    #[error("unexpected text after `]` in key `{key}`")]
    MalformedKey { key: String },
    #[error("key `{key}` nests deeper than {max} levels")]
    TooDeep { key: String, max: usize },
}

/// A single field that could not be coerced into the message schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire key of the offending field.
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every field failure collected during one mapping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError {
    pub errors: Vec<FieldError>,
}

impl MappingError {
    /// Wire keys of the failed fields, in schema order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid fields: ")?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MappingError {}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Mapping(#[from] MappingError),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl WebhookError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            WebhookError::BadRequest(_) => ClientCode::BadRequest,
            WebhookError::Decode(_) => ClientCode::DecodeFailed,
            WebhookError::Mapping(_) => ClientCode::MappingFailed,
            WebhookError::Config(_) => ClientCode::Config,
            WebhookError::Internal(_) => ClientCode::Internal,
        }
    }
}
