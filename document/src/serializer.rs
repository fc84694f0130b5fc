extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;

use segment::Delimiters;
use x12_schema::Decimal;

use crate::config::{BinderConfig, CustomDelimiters};
use crate::tree::{DocumentTree, OwnedFieldValue, OwnedSegment};

/// Serialize a document tree back to wire format (§4.F), in document order:
/// header segments, each top-level loop's subtree in pre-order, footer segments.
pub fn serialize(tree: &DocumentTree, config: &BinderConfig) -> String {
    let delimiters = resolve_delimiters(tree.delimiters, config.custom_delimiters);
    let mut out = String::new();

    for segment in &tree.header {
        write_segment(&mut out, segment, delimiters, config.use_new_lines_on_emit);
    }

    for loop_id in tree.walk_preorder() {
        for segment in &tree.node(loop_id).segments {
            write_segment(&mut out, segment, delimiters, config.use_new_lines_on_emit);
        }
    }

    for segment in &tree.footer {
        write_segment(&mut out, segment, delimiters, config.use_new_lines_on_emit);
    }

    out
}

/// A segment self-serializes using the delimiters in effect when it was
/// produced (§3): default to what the tree discovered from its source ISA
/// header, overriding only when the caller explicitly supplies its own.
fn resolve_delimiters(discovered: Delimiters, custom: Option<CustomDelimiters>) -> Delimiters {
    match custom {
        Some(c) => Delimiters {
            element: c.element,
            component: c.component,
            repetition: c.repetition,
            segment: c.segment,
        },
        None => discovered,
    }
}

fn write_segment(out: &mut String, segment: &OwnedSegment, delimiters: Delimiters, pretty: bool) {
    out.push_str(&segment.name);

    // Trailing empty (null) fields are dropped, per the wire convention that
    // an absent optional field need not be represented at all.
    let last_present = segment
        .fields
        .iter()
        .rposition(|f| !matches!(f, OwnedFieldValue::Null));

    if let Some(last) = last_present {
        for field in &segment.fields[..=last] {
            out.push(delimiters.element as char);
            write_field(out, field, delimiters);
        }
    }

    out.push(delimiters.segment as char);
    if pretty {
        out.push('\n');
    }
}

fn write_field(out: &mut String, field: &OwnedFieldValue, delimiters: Delimiters) {
    match field {
        OwnedFieldValue::Null => {}
        OwnedFieldValue::Text(s) => out.push_str(s),
        OwnedFieldValue::Decimal(d) => write_decimal(out, *d),
        OwnedFieldValue::Date(d) => write_date(out, d),
        OwnedFieldValue::Time(s) => out.push_str(s),
        OwnedFieldValue::DateTime(dt) => {
            write_date(out, &dt.date);
            let _ = write!(out, "{:02}{:02}", dt.hour, dt.minute);
        }
        OwnedFieldValue::Composite(parts) => {
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    out.push(delimiters.component as char);
                }
                write_field(out, part, delimiters);
            }
        }
    }
}

fn write_decimal(out: &mut String, d: Decimal) {
    let _ = d.render(out);
}

fn write_date(out: &mut String, date: &x12_schema::SimpleDate) {
    if date.source_width == 6 {
        let _ = write!(out, "{:02}{:02}{:02}", date.year % 100, date.month, date.day);
    } else {
        let _ = write!(out, "{:04}{:02}{:02}", date.year, date.month, date.day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OwnedFieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_trailing_null_fields() {
        let mut tree = DocumentTree::new();
        let loop_id = tree.create_loop("loop_2300", None);
        tree.append_segment(
            loop_id,
            OwnedSegment {
                name: "CLM".into(),
                fields: alloc::vec![
                    OwnedFieldValue::Text("CLAIM1".into()),
                    OwnedFieldValue::Decimal(Decimal::new(15000, 2)),
                    OwnedFieldValue::Null,
                    OwnedFieldValue::Null,
                ],
                index: 1,
            },
        );
        let out = serialize(&tree, &BinderConfig::default());
        assert_eq!(out, "CLM*CLAIM1*150.00~");
    }

    #[test]
    fn six_digit_date_round_trips_at_original_width() {
        let mut tree = DocumentTree::new();
        let loop_id = tree.create_loop("loop_1000a", None);
        tree.append_segment(
            loop_id,
            OwnedSegment {
                name: "DTP".into(),
                fields: alloc::vec![OwnedFieldValue::Date(x12_schema::SimpleDate {
                    year: 2023,
                    month: 12,
                    day: 13,
                    source_width: 6,
                })],
                index: 1,
            },
        );
        let out = serialize(&tree, &BinderConfig::default());
        assert_eq!(out, "DTP*231213~");
    }
}
