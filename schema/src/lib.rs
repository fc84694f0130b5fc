#![no_std]

//! Field schemas and typed decoding of raw X12 segments.
//!
//! Built on top of [`segment`]'s zero-copy tokenizer: given a [`segment::RawSegment`]
//! and a [`SchemaRegistry`], [`decode::decode`] validates the segment's fields against
//! its schema (required-field presence, length bounds, enum membership) and returns a
//! [`decode::DecodedSegment`] whose individual fields decode to typed [`value::FieldValue`]s
//! on demand.

mod decode;
mod error;
mod types;
mod value;

pub use decode::{decode, DecodedSegment, DEFAULT_CENTURY_PIVOT};
pub use error::{DecodeError, SegmentNameBuf};
pub use types::{FieldSchema, FieldType, SchemaRegistry, SegmentSchema};
pub use value::{Decimal, FieldValue, SimpleDate, SimpleDateTime};
