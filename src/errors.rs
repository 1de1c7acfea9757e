use std::fmt::Write;

use thiserror::Error;

use crate::bytes::hex_dump;

/// Result type of every parser of the crate.
pub type PcapResult<T> = Result<T, PcapError>;

/* ----- enum ErrorKind ----- */

/// Category of a [`PcapError`].
///
/// Every kind is fatal for the whole capture: the position of the next record depends on
/// every previous field being read correctly.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum ErrorKind {
    /// The buffer is shorter than a fixed-size structure, or the magic number is unknown.
    #[error("Format error")]
    Format,
    /// The data is well formed but uses a link type, network protocol or transport this
    /// crate doesn't decode.
    #[error("Unsupported variant")]
    UnsupportedVariant,
    /// Two fields contradict each other (lengths mostly).
    #[error("Consistency error")]
    Consistency,
}

/* ----- struct PcapError ----- */

/// Error raised while decoding a capture.
///
/// Carries the failing field, the byte offset where the failing structure starts and a hex dump
/// of the offending bytes. Errors raised by a nested parser are kept in `causes`.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} in {field} at offset {offset}: {message}{}{}", render_bytes(.bytes), render_causes(.causes))]
pub struct PcapError {
    /// Category of the error
    pub kind: ErrorKind,
    /// Structure or field that failed to parse
    pub field: &'static str,
    /// Offset of the failing structure, from the start of the capture once surfaced by the decoder
    pub offset: usize,
    /// Human readable description
    pub message: String,
    /// Hex dump of the offending bytes
    pub bytes: String,
    /// Associated errors, innermost last
    pub causes: Vec<PcapError>,
}

impl PcapError {
    /// Creates an error located at offset 0 of the slice being parsed.
    pub fn new(kind: ErrorKind, field: &'static str, message: impl Into<String>, bytes: &[u8]) -> Self {
        PcapError {
            kind,
            field,
            offset: 0,
            message: message.into(),
            bytes: hex_dump(bytes),
            causes: Vec::new(),
        }
    }

    /// Shorthand for an [`ErrorKind::Format`] error.
    pub fn format(field: &'static str, message: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(ErrorKind::Format, field, message, bytes)
    }

    /// Shorthand for an [`ErrorKind::UnsupportedVariant`] error.
    pub fn unsupported(field: &'static str, message: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(ErrorKind::UnsupportedVariant, field, message, bytes)
    }

    /// Shorthand for an [`ErrorKind::Consistency`] error.
    pub fn consistency(field: &'static str, message: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(ErrorKind::Consistency, field, message, bytes)
    }

    /// The buffer is too small to hold `field`.
    pub fn incomplete(field: &'static str, needed: usize, bytes: &[u8]) -> Self {
        Self::format(field, format!("buffer too small: need {needed}B, got {}B", bytes.len()), bytes)
    }

    /// Moves the error `base` bytes further, used when a sub-slice error is surfaced by its parent.
    pub fn at_offset(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }

    /// Appends an associated error.
    pub fn with_cause(mut self, cause: PcapError) -> Self {
        self.causes.push(cause);
        self
    }

    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The innermost associated error, or `self` when there is none.
    pub fn root_cause(&self) -> &PcapError {
        match self.causes.last() {
            Some(cause) => cause.root_cause(),
            None => self,
        }
    }
}

fn render_bytes(bytes: &str) -> String {
    if bytes.is_empty() {
        String::new()
    }
    else {
        format!(" [{bytes}]")
    }
}

fn render_causes(causes: &[PcapError]) -> String {
    if causes.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nAssociated error list:");
    for cause in causes {
        for (i, line) in cause.to_string().lines().enumerate() {
            let marker = if i == 0 { "-->" } else { "   " };
            let _ = write!(out, "\n    {marker} {line}");
        }
    }

    out
}
