/// Failure discovering delimiters from the ISA header (spec component A).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterError {
    /// The buffer does not start with `ISA`.
    #[error("not X12 data: first three bytes are not 'ISA'")]
    NotX12,
    /// An element, component, or segment delimiter was whitespace or a digit.
    #[error("delimiter byte {byte:#04x} at offset {offset} is not a valid delimiter")]
    BadDelimiter { offset: usize, byte: u8 },
    /// Fewer than 106 bytes were available to read the fixed ISA header.
    #[error("ISA header is truncated: need 106 bytes, got {got}")]
    TruncatedHeader { got: usize },
}

/// Failure splitting the byte stream into segment records (spec component B).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// The stream ended without a segment terminator after non-whitespace bytes.
    #[error("segment starting at byte {offset} has no terminator")]
    TruncatedSegment { offset: usize },
    /// A segment's identifier was empty (segment terminator immediately after element separator).
    #[error("segment at byte {offset} has an empty segment id")]
    EmptySegmentId { offset: usize },
}
