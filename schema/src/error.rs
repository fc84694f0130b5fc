/// Failure decoding a raw segment against its schema (spec component C).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// No schema is registered for this segment name.
    #[error("unknown segment {name}")]
    UnknownSegment { name: SegmentNameBuf },
    /// A required field was absent or empty.
    #[error("segment {segment} is missing required field {field_index}")]
    MissingRequiredField {
        segment: &'static str,
        field_index: usize,
    },
    /// A field's value is not a member of its enumerated value set.
    #[error("segment {segment} field {field_index} value {value:?} is not a valid enum member")]
    BadEnum {
        segment: &'static str,
        field_index: usize,
        value: SegmentNameBuf,
    },
    /// A field's length falls outside its schema's min/max bounds.
    #[error("segment {segment} field {field_index} has length {len}, expected {min}..={max}")]
    BadLength {
        segment: &'static str,
        field_index: usize,
        len: usize,
        min: usize,
        max: usize,
    },
    /// A decimal field contains non-numeric bytes.
    #[error("segment {segment} field {field_index} is not a valid decimal")]
    BadNumeric {
        segment: &'static str,
        field_index: usize,
    },
    /// A date, time, or datetime field has the wrong length or non-digit bytes.
    #[error("segment {segment} field {field_index} is not a valid date/time")]
    BadDate {
        segment: &'static str,
        field_index: usize,
    },
}

/// A fixed-capacity copy of a short segment or value name, used so error
/// variants stay `Copy` without reaching for an owned string in a `core`-only
/// crate.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SegmentNameBuf {
    bytes: [u8; 16],
    len: u8,
}

impl SegmentNameBuf {
    pub fn new(s: &str) -> Self {
        let mut bytes = [0u8; 16];
        let len = s.len().min(16);
        bytes[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("<non-utf8>")
    }
}

impl core::fmt::Display for SegmentNameBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Debug for SegmentNameBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
