extern crate alloc;

use alloc::string::String;

/// Strict-mode-only binding failures (§4.D); in lenient mode these downgrade
/// to `Diagnostic`s instead of aborting.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("segment {segment_name} at index {segment_index} has no applicable loop-start rule")]
    NoApplicableRule {
        segment_index: usize,
        segment_name: String,
    },
    #[error("segment {segment_name} at index {segment_index} is not permitted in loop {loop_id}")]
    UnexpectedSegment {
        segment_index: usize,
        segment_name: String,
        loop_id: String,
    },
    #[error("ambiguous hierarchy at HL segment index {segment_index}: {message}")]
    AmbiguousHierarchy { segment_index: usize, message: String },
}

/// Envelope-closing failures (§4.G): count mismatches, control number
/// mismatches, and unresolvable implementation-guide versions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("{envelope} count mismatch: header declared {declared}, found {actual}")]
    CountMismatch {
        envelope: &'static str,
        declared: i64,
        actual: i64,
    },
    #[error("{envelope} control number mismatch: {opening} != {closing}")]
    ControlNumberMismatch {
        envelope: &'static str,
        opening: String,
        closing: String,
    },
    #[error("unknown implementation guide version {version}")]
    UnknownVersion { version: String },
}

/// The top-level union returned by the public parse entry point.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Delimiter(#[from] segment::DelimiterError),
    #[error(transparent)]
    Tokenize(#[from] segment::TokenizeError),
    #[error(transparent)]
    Decode(#[from] x12_schema::DecodeError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    /// A catastrophic, non-recoverable abort raised by a segment handler
    /// mid-parse, distinct from the structural/schema/binding/envelope
    /// families above (mirrors the split between recoverable-incomplete and
    /// catastrophic-abort conditions).
    #[error("parse halted: {0}")]
    Halt(String),
}
