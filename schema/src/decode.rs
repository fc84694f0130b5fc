use segment::{Element, RawSegment};

use crate::error::{DecodeError, SegmentNameBuf};
use crate::types::{FieldSchema, FieldType, SchemaRegistry, SegmentSchema};
use crate::value::{Decimal, FieldValue, SimpleDate, SimpleDateTime};

/// Default pivot year for resolving two-digit `ISA` dates, per spec §4.C: years
/// below the pivot resolve to 20xx, at or above resolve to 19xx.
pub const DEFAULT_CENTURY_PIVOT: u8 = 50;

/// A segment that has been validated against its schema.
///
/// Field access is lazy: `decode` validates required-field presence, length
/// bounds, and enum membership up front, but individual field values are only
/// converted to a [`FieldValue`] when asked for.
#[derive(Debug, Clone, Copy)]
pub struct DecodedSegment<'a> {
    raw: RawSegment<'a>,
    schema: &'static SegmentSchema,
    century_pivot: u8,
}

impl<'a> DecodedSegment<'a> {
    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    pub fn schema(&self) -> &'static SegmentSchema {
        self.schema
    }

    pub fn raw(&self) -> &RawSegment<'a> {
        &self.raw
    }

    /// Decode the field at `index` (0-based). Already validated by `decode`;
    /// returns `FieldValue::Null` for an absent optional field.
    pub fn field(&self, index: usize) -> FieldValue<'a> {
        let Some(field_schema) = self.schema.fields.get(index) else {
            return FieldValue::Null;
        };
        let element = self.raw.field(index);
        decode_present_field(element, field_schema, self.century_pivot).unwrap_or(FieldValue::Null)
    }

    /// Decode the field by schema name, if present in the schema.
    pub fn field_named(&self, name: &str) -> Option<FieldValue<'a>> {
        let index = self.schema.fields.iter().position(|f| f.name == name)?;
        Some(self.field(index))
    }

    /// Decode a single component of a composite field.
    pub fn component(
        &self,
        field_index: usize,
        component_index: usize,
    ) -> Result<FieldValue<'a>, DecodeError> {
        let field_schema = self
            .schema
            .fields
            .get(field_index)
            .ok_or(DecodeError::BadLength {
                segment: self.schema.name,
                field_index,
                len: 0,
                min: 0,
                max: 0,
            })?;
        let FieldType::Composite(components) = field_schema.field_type else {
            return Ok(FieldValue::Null);
        };
        let Some(component_schema) = components.get(component_index) else {
            return Ok(FieldValue::Null);
        };
        let Some(element) = self.raw.field(field_index) else {
            return Ok(FieldValue::Null);
        };
        let sub = element
            .split_components(self.raw.delimiters().component)
            .nth(component_index)
            .unwrap_or(&[]);
        if sub.is_empty() {
            return Ok(FieldValue::Null);
        }
        decode_scalar(Element::new(sub), component_schema, self.century_pivot)
    }
}

fn decode_present_field<'a>(
    element: Option<Element<'a>>,
    field_schema: &FieldSchema,
    century_pivot: u8,
) -> Result<FieldValue<'a>, DecodeError> {
    match element {
        Some(e) if !e.is_empty() => {
            if let FieldType::Composite(_) = field_schema.field_type {
                Ok(FieldValue::Composite(e))
            } else {
                decode_scalar(e, field_schema, century_pivot)
            }
        }
        _ => Ok(FieldValue::Null),
    }
}

fn decode_scalar<'a>(
    element: Element<'a>,
    field_schema: &FieldSchema,
    century_pivot: u8,
) -> Result<FieldValue<'a>, DecodeError> {
    let text = element.as_str().ok_or(DecodeError::BadNumeric {
        segment: "",
        field_index: 0,
    })?;

    match field_schema.field_type {
        FieldType::Text | FieldType::Id => Ok(FieldValue::Text(text)),
        FieldType::Enum(values) => {
            if values.contains(&text) {
                Ok(FieldValue::Text(text))
            } else {
                Err(DecodeError::BadEnum {
                    segment: field_schema.name,
                    field_index: 0,
                    value: SegmentNameBuf::new(text),
                })
            }
        }
        FieldType::Date => parse_date(text, century_pivot)
            .map(FieldValue::Date)
            .ok_or(DecodeError::BadDate {
                segment: field_schema.name,
                field_index: 0,
            }),
        FieldType::Time => {
            if (text.len() == 4 || text.len() == 6) && text.bytes().all(|b| b.is_ascii_digit()) {
                Ok(FieldValue::Time(text))
            } else {
                Err(DecodeError::BadDate {
                    segment: field_schema.name,
                    field_index: 0,
                })
            }
        }
        FieldType::DateTime => parse_datetime(text, century_pivot)
            .map(FieldValue::DateTime)
            .ok_or(DecodeError::BadDate {
                segment: field_schema.name,
                field_index: 0,
            }),
        FieldType::Decimal => parse_decimal(text).map(FieldValue::Decimal).ok_or(
            DecodeError::BadNumeric {
                segment: field_schema.name,
                field_index: 0,
            },
        ),
        FieldType::Composite(_) => Ok(FieldValue::Composite(element)),
    }
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_date(s: &str, century_pivot: u8) -> Option<SimpleDate> {
    match s.len() {
        8 => {
            let year = digits(&s[0..4])? as u16;
            let month = digits(&s[4..6])? as u8;
            let day = digits(&s[6..8])? as u8;
            valid_ymd(year, month, day, 8)
        }
        6 => {
            let yy = digits(&s[0..2])? as u8;
            let month = digits(&s[2..4])? as u8;
            let day = digits(&s[4..6])? as u8;
            let year = if yy < century_pivot {
                2000 + yy as u16
            } else {
                1900 + yy as u16
            };
            valid_ymd(year, month, day, 6)
        }
        _ => None,
    }
}

fn valid_ymd(year: u16, month: u8, day: u8, source_width: u8) -> Option<SimpleDate> {
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some(SimpleDate {
            year,
            month,
            day,
            source_width,
        })
    } else {
        None
    }
}

fn parse_datetime(s: &str, century_pivot: u8) -> Option<SimpleDateTime> {
    if s.len() != 12 {
        return None;
    }
    let date = parse_date(&s[0..8], century_pivot)?;
    let hour = digits(&s[8..10])? as u8;
    let minute = digits(&s[10..12])? as u8;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(SimpleDateTime { date, hour, minute })
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1i64, &s[1..]),
        _ => (1i64, s),
    };
    if rest.is_empty() {
        return None;
    }
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
        || (int_part.is_empty() && frac_part.is_empty())
    {
        return None;
    }
    let scale = frac_part.len() as u8;
    let mut mantissa: i64 = 0;
    for b in int_part.bytes().chain(frac_part.bytes()) {
        mantissa = mantissa.checked_mul(10)?.checked_add((b - b'0') as i64)?;
    }
    Some(Decimal::new(sign * mantissa, scale))
}

/// Look up and validate a raw segment against the registry, per spec §4.C.
pub fn decode<'a>(
    raw: &RawSegment<'a>,
    registry: &SchemaRegistry,
    century_pivot: u8,
) -> Result<DecodedSegment<'a>, DecodeError> {
    let name = raw.id_str().unwrap_or("");
    let schema = registry
        .lookup(name)
        .ok_or_else(|| DecodeError::UnknownSegment {
            name: SegmentNameBuf::new(name),
        })?;

    for (index, field_schema) in schema.fields.iter().enumerate() {
        let element = raw.field(index);
        let present = element.map(|e| !e.is_empty()).unwrap_or(false);

        if !present {
            if field_schema.required {
                return Err(DecodeError::MissingRequiredField {
                    segment: schema.name,
                    field_index: index,
                });
            }
            continue;
        }

        let element = element.unwrap();
        let len = element.as_bytes().len();
        if !matches!(field_schema.field_type, FieldType::Composite(_))
            && (len < field_schema.min_len || len > field_schema.max_len)
        {
            return Err(DecodeError::BadLength {
                segment: schema.name,
                field_index: index,
                len,
                min: field_schema.min_len,
                max: field_schema.max_len,
            });
        }

        decode_scalar_checked(element, field_schema, schema.name, index, century_pivot)?;
    }

    Ok(DecodedSegment {
        raw: *raw,
        schema,
        century_pivot,
    })
}

/// Like [`decode_scalar`], but rewrites error variants to carry the real
/// segment name and field index rather than the placeholders used internally.
fn decode_scalar_checked(
    element: Element<'_>,
    field_schema: &FieldSchema,
    segment_name: &'static str,
    field_index: usize,
    century_pivot: u8,
) -> Result<(), DecodeError> {
    if matches!(field_schema.field_type, FieldType::Composite(_)) {
        return Ok(());
    }
    decode_scalar(element, field_schema, century_pivot)
        .map(|_| ())
        .map_err(|e| relabel(e, segment_name, field_index))
}

fn relabel(err: DecodeError, segment_name: &'static str, field_index: usize) -> DecodeError {
    match err {
        DecodeError::BadEnum { value, .. } => DecodeError::BadEnum {
            segment: segment_name,
            field_index,
            value,
        },
        DecodeError::BadDate { .. } => DecodeError::BadDate {
            segment: segment_name,
            field_index,
        },
        DecodeError::BadNumeric { .. } => DecodeError::BadNumeric {
            segment: segment_name,
            field_index,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentSchema;
    use pretty_assertions::assert_eq;
    use segment::SegmentTokenizer;

    const NM1_FIELDS: &[FieldSchema] = &[
        FieldSchema::id("entity_identifier_code", true, 2, 3),
        FieldSchema::enumerated("entity_type_qualifier", true, &["1", "2"]),
        FieldSchema::text("last_or_org_name", true, 1, 60),
    ];
    const SCHEMAS: &[SegmentSchema] = &[SegmentSchema {
        name: "NM1",
        fields: NM1_FIELDS,
    }];

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(SCHEMAS)
    }

    fn tokenize(data: &'static [u8]) -> RawSegment<'static> {
        SegmentTokenizer::with_delimiters(data, segment::Delimiters::default())
            .next()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn decodes_required_and_enum_fields() {
        let raw = tokenize(b"NM1*85*2*ACME CLINIC~");
        let decoded = decode(&raw, &registry(), DEFAULT_CENTURY_PIVOT).unwrap();
        assert_eq!(decoded.field(0).as_text(), Some("85"));
        assert_eq!(decoded.field(2).as_text(), Some("ACME CLINIC"));
    }

    #[test]
    fn missing_required_field_fails() {
        let raw = tokenize(b"NM1*85*2~");
        let err = decode(&raw, &registry(), DEFAULT_CENTURY_PIVOT).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingRequiredField {
                segment: "NM1",
                field_index: 2,
            }
        );
    }

    #[test]
    fn bad_enum_value_fails() {
        let raw = tokenize(b"NM1*85*9*ACME CLINIC~");
        let err = decode(&raw, &registry(), DEFAULT_CENTURY_PIVOT).unwrap_err();
        assert!(matches!(err, DecodeError::BadEnum { field_index: 1, .. }));
    }

    #[test]
    fn unknown_segment_fails() {
        let raw = tokenize(b"ZZZ*1~");
        let err = decode(&raw, &registry(), DEFAULT_CENTURY_PIVOT).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownSegment { .. }));
    }

    #[test]
    fn eight_digit_date_decodes_directly() {
        assert_eq!(
            parse_date("20231213", DEFAULT_CENTURY_PIVOT),
            Some(SimpleDate {
                year: 2023,
                month: 12,
                day: 13,
                source_width: 8,
            })
        );
    }

    #[test]
    fn six_digit_date_uses_century_pivot() {
        assert_eq!(
            parse_date("231213", 50),
            Some(SimpleDate {
                year: 2023,
                month: 12,
                day: 13,
                source_width: 6,
            })
        );
        assert_eq!(
            parse_date("871213", 50),
            Some(SimpleDate {
                year: 1987,
                month: 12,
                day: 13,
                source_width: 6,
            })
        );
    }

    #[test]
    fn decimal_preserves_scale() {
        assert_eq!(parse_decimal("123.45"), Some(Decimal::new(12345, 2)));
        assert_eq!(parse_decimal("-7"), Some(Decimal::new(-7, 0)));
        assert_eq!(parse_decimal("12.3.4"), None);
    }
}
