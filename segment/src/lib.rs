#![no_std]

//! Delimiter discovery and segment tokenizing for X12 EDI interchanges.
//!
//! This crate is the bottom layer of the stack: it turns a raw byte buffer
//! into a lazy stream of [`RawSegment`]s, each still borrowing from the
//! input and split only as far as the element separator. It knows nothing
//! about segment schemas, loops, or transaction sets — those live in the
//! crates built on top of this one.
//!
//! # Usage
//! ```
//! use segment::SegmentTokenizer;
//!
//! let data = b"ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *231213*1430*^*00501*000000001*0*P*:~GS*HC*SENDER*RECEIVER*20231213*1430*1*X*005010X222A1~ST*837*0001~SE*2*0001~GE*1*1~IEA*1*000000001~";
//!
//! for segment in SegmentTokenizer::new(data).unwrap() {
//!     let segment = segment.unwrap();
//!     println!("{:?}", segment.id_str());
//! }
//! ```

#[cfg(test)]
extern crate std;

mod delimiters;
mod element;
mod error;
mod tokenizer;

pub use delimiters::{Delimiters, ISA_HEADER_LEN};
pub use element::{Element, SplitIter};
pub use error::{DelimiterError, TokenizeError};
pub use tokenizer::{is_x12_data, FieldIter, RawSegment, SegmentTokenizer};
