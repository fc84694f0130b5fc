use crate::delimiters::Delimiters;
use crate::element::{Element, SplitIter};
use crate::error::TokenizeError;

/// One parsed segment, still borrowing from the input buffer.
///
/// `id` is the segment identifier (e.g. `b"NM1"`). `fields()` lazily splits the
/// remainder of the segment on the element separator; nothing is copied or
/// validated against a schema at this layer.
#[derive(Debug, Clone, Copy)]
pub struct RawSegment<'a> {
    id: &'a [u8],
    data: &'a [u8],
    delimiters: Delimiters,
    /// 1-based position of this segment within the interchange.
    pub index: usize,
}

impl<'a> RawSegment<'a> {
    #[inline]
    pub fn id(&self) -> &'a [u8] {
        self.id
    }

    #[inline]
    pub fn id_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.id).ok()
    }

    #[inline]
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Iterate over the segment's data elements in order (not including the segment id).
    pub fn fields(&self) -> FieldIter<'a> {
        FieldIter {
            inner: Element::new(self.data).split_components(self.delimiters.element),
        }
    }

    /// Get the field at `index` (0-based, not including the segment id).
    pub fn field(&self, index: usize) -> Option<Element<'a>> {
        self.fields().nth(index)
    }

    /// Number of data elements in the segment (not including the segment id).
    pub fn field_count(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.fields().count()
        }
    }
}

/// Iterator over a segment's data elements.
pub struct FieldIter<'a> {
    inner: SplitIter<'a>,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Element::new)
    }
}

/// Returns true iff the first three non-whitespace bytes of `data` are `ISA`.
pub fn is_x12_data(data: &[u8]) -> bool {
    let trimmed = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &data[start..])
        .unwrap_or(&[]);
    trimmed.starts_with(b"ISA")
}

fn is_newline(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Lazily splits a byte buffer into [`RawSegment`]s.
///
/// Delimiters are discovered once from the leading ISA header; every segment
/// thereafter (including the ISA segment itself, which uses the same
/// delimiters for its data elements) is tokenized against them.
pub struct SegmentTokenizer<'a> {
    remaining: &'a [u8],
    consumed: usize,
    delimiters: Delimiters,
    next_index: usize,
}

impl<'a> SegmentTokenizer<'a> {
    pub fn new(buffer: &'a [u8]) -> Result<Self, crate::error::DelimiterError> {
        let delimiters = Delimiters::discover(buffer)?;
        Ok(Self {
            remaining: buffer,
            consumed: 0,
            delimiters,
            next_index: 1,
        })
    }

    /// Build a tokenizer from already-known delimiters, skipping ISA discovery.
    /// Used by callers (and tests) that already validated or chose delimiters.
    pub fn with_delimiters(buffer: &'a [u8], delimiters: Delimiters) -> Self {
        Self {
            remaining: buffer,
            consumed: 0,
            delimiters,
            next_index: 1,
        }
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    fn skip_newlines(&mut self) {
        let skip = self
            .remaining
            .iter()
            .take_while(|&&b| is_newline(b))
            .count();
        self.remaining = &self.remaining[skip..];
        self.consumed += skip;
    }
}

impl<'a> Iterator for SegmentTokenizer<'a> {
    type Item = Result<RawSegment<'a>, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_newlines();
        if self.remaining.is_empty() {
            return None;
        }

        let term_pos = self
            .remaining
            .iter()
            .position(|&b| b == self.delimiters.segment);

        let term_pos = match term_pos {
            Some(pos) => pos,
            None => {
                if self.remaining.iter().all(|&b| b.is_ascii_whitespace()) {
                    return None;
                }
                return Some(Err(TokenizeError::TruncatedSegment {
                    offset: self.consumed,
                }));
            }
        };

        let segment_data = &self.remaining[..term_pos];
        let id_end = segment_data
            .iter()
            .position(|&b| b == self.delimiters.element)
            .unwrap_or(segment_data.len());

        if id_end == 0 {
            return Some(Err(TokenizeError::EmptySegmentId {
                offset: self.consumed,
            }));
        }

        let id = &segment_data[..id_end];
        let data = if id_end < segment_data.len() {
            &segment_data[id_end + 1..]
        } else {
            &[][..]
        };

        let index = self.next_index;
        self.next_index += 1;

        self.remaining = &self.remaining[term_pos + 1..];
        self.consumed += term_pos + 1;

        Some(Ok(RawSegment {
            id,
            data,
            delimiters: self.delimiters,
            index,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::vec;

    const SAMPLE: &[u8] = b"ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *231213*1430*^*00501*000000001*0*P*:~GS*HC*SENDER*RECEIVER*20231213*1430*1*X*005010X222A1~ST*837*0001~SE*2*0001~GE*1*1~IEA*1*000000001~";

    #[test]
    fn tokenizes_full_interchange() {
        let tokenizer = SegmentTokenizer::new(SAMPLE).unwrap();
        let segments: Result<alloc::vec::Vec<_>, _> =
            tokenizer.map(|r| r.map(|s| s.id_str().unwrap())).collect();
        let segments = segments.unwrap();
        assert_eq!(segments, vec!["ISA", "GS", "ST", "SE", "GE", "IEA"]);
    }

    #[test]
    fn isa_fields_are_split_like_any_other_segment() {
        let tokenizer = SegmentTokenizer::new(SAMPLE).unwrap();
        let isa = tokenizer.into_iter().next().unwrap().unwrap();
        assert_eq!(isa.field(5).unwrap().as_str().unwrap().trim(), "SENDER");
    }

    #[test]
    fn skips_newlines_between_segments() {
        let mut data = SAMPLE.to_vec();
        // insert CRLF after the ISA terminator
        let isa_end = 106;
        data.splice(isa_end..isa_end, b"\r\n".iter().copied());
        let tokenizer = SegmentTokenizer::new(&data).unwrap();
        let count = tokenizer.filter(|r| r.is_ok()).count();
        assert_eq!(count, 6);
    }

    #[test]
    fn truncated_segment_is_reported() {
        let mut data = SAMPLE.to_vec();
        data.truncate(data.len() - 10); // chop off the terminator of IEA
        let tokenizer = SegmentTokenizer::new(&data).unwrap();
        let last = tokenizer.last().unwrap();
        assert!(matches!(last, Err(TokenizeError::TruncatedSegment { .. })));
    }

    #[test]
    fn detects_x12_data_regardless_of_leading_whitespace() {
        assert!(is_x12_data(b"  \n ISA*00*"));
        assert!(!is_x12_data(b"GS*HC*"));
    }
}

#[cfg(test)]
extern crate alloc;
