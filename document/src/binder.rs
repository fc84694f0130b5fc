extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use segment::{Element, RawSegment, SegmentTokenizer};
use x12_schema::{DecodedSegment, FieldType, FieldValue, SchemaRegistry};

use crate::config::{BinderConfig, StrictMode};
use crate::cursor::{Cursor, HlContext, HlLevelCode};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::envelope;
use crate::error::{BindError, ParseError};
use crate::registry::RuleRegistry;
use crate::tree::{DocumentTree, OwnedFieldValue, OwnedSegment};

/// Result of a successful parse: the document tree plus any non-aborting diagnostics.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub tree: DocumentTree,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default)]
struct EnvelopeCounters {
    isa_control: String,
    group_count: i64,
    group_control: String,
    group_version: String,
    transaction_count_in_group: i64,
    transaction_control: String,
    segment_count_in_transaction: i64,
}

/// Parse a full interchange per §4.D, driving the tokenizer, schema decoder,
/// loop binder, and envelope validator together.
pub fn parse(
    data: &[u8],
    registry: &RuleRegistry,
    schemas: &SchemaRegistry,
    config: &BinderConfig,
) -> Result<ParseOutcome, ParseError> {
    let tokenizer = SegmentTokenizer::new(data)?;
    let mut tree = DocumentTree::new();
    tree.delimiters = tokenizer.delimiters();
    let mut cursor = Cursor::new();
    let mut diagnostics = Vec::new();
    let mut counters = EnvelopeCounters::default();

    for raw in tokenizer {
        let raw = raw?;
        let name = raw.id_str().unwrap_or("").to_string();
        let index = raw.index;

        counters.segment_count_in_transaction += 1;

        let decoded = match x12_schema::decode(&raw, schemas, config.century_pivot) {
            Ok(d) => Some(d),
            Err(e) => {
                if config.strict_mode == StrictMode::Fail {
                    return Err(ParseError::Decode(e));
                }
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::SchemaError,
                    segment_index: index,
                    segment_name: name.clone(),
                    message: e.to_string(),
                });
                None
            }
        };

        match name.as_str() {
            "ISA" => {
                if let Some(d) = &decoded {
                    counters.isa_control = field_text(d, 12);
                }
                tree.header.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            "GS" => {
                counters.group_control = decoded
                    .as_ref()
                    .map(|d| field_text(d, 5))
                    .unwrap_or_default();
                counters.transaction_count_in_group = 0;
                if let Some(d) = &decoded {
                    let gs08 = field_text(d, 7);
                    counters.group_version =
                        envelope::check_version(&gs08, None).map_err(ParseError::Envelope)?;
                }
                tree.header.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            "ST" => {
                cursor.reset_for_transaction();
                counters.segment_count_in_transaction = 1;
                counters.transaction_control = decoded
                    .as_ref()
                    .map(|d| field_text(d, 1))
                    .unwrap_or_default();
                counters.transaction_count_in_group += 1;
                if let Some(d) = &decoded {
                    let st03 = field_text(d, 2);
                    if !st03.is_empty() {
                        envelope::check_version(&counters.group_version, Some(&st03))
                            .map_err(ParseError::Envelope)?;
                    }
                }
                tree.header.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            "SE" => {
                if let Some(d) = &decoded {
                    let declared = d
                        .field(0)
                        .as_decimal()
                        .map(|v| v.mantissa())
                        .unwrap_or(-1);
                    envelope::check_count(
                        "SE",
                        declared,
                        counters.segment_count_in_transaction,
                    )
                    .map_err(ParseError::Envelope)?;
                    let se_control = field_text(d, 1);
                    envelope::check_control_numbers(
                        "ST/SE",
                        &counters.transaction_control,
                        &se_control,
                    )
                    .map_err(ParseError::Envelope)?;
                }
                tree.footer.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            "GE" => {
                if let Some(d) = &decoded {
                    let declared = d
                        .field(0)
                        .as_decimal()
                        .map(|v| v.mantissa())
                        .unwrap_or(-1);
                    envelope::check_count(
                        "GE",
                        declared,
                        counters.transaction_count_in_group,
                    )
                    .map_err(ParseError::Envelope)?;
                    let ge_control = field_text(d, 1);
                    envelope::check_control_numbers(
                        "GS/GE",
                        &counters.group_control,
                        &ge_control,
                    )
                    .map_err(ParseError::Envelope)?;
                }
                counters.group_count += 1;
                tree.footer.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            "IEA" => {
                if let Some(d) = &decoded {
                    let declared = d
                        .field(0)
                        .as_decimal()
                        .map(|v| v.mantissa())
                        .unwrap_or(-1);
                    envelope::check_count("IEA", declared, counters.group_count)
                        .map_err(ParseError::Envelope)?;
                    let iea_control = field_text(d, 1);
                    envelope::check_control_numbers(
                        "ISA/IEA",
                        &counters.isa_control,
                        &iea_control,
                    )
                    .map_err(ParseError::Envelope)?;
                }
                tree.footer.push(owned_segment(&raw, decoded.as_ref(), index));
                continue;
            }
            _ => {}
        }

        bind_business_segment(
            &raw,
            decoded.as_ref(),
            &name,
            index,
            registry,
            &mut tree,
            &mut cursor,
        )?;
    }

    Ok(ParseOutcome { tree, diagnostics })
}

fn bind_business_segment(
    raw: &RawSegment<'_>,
    decoded: Option<&DecodedSegment<'_>>,
    name: &str,
    index: usize,
    registry: &RuleRegistry,
    tree: &mut DocumentTree,
    cursor: &mut Cursor,
) -> Result<(), ParseError> {
    let current_loop_id = cursor
        .current_loop
        .map(|id| tree.node(id).loop_id)
        .unwrap_or("");

    let rule = decoded.and_then(|d| registry.first_match(d, current_loop_id));

    let target_loop = match rule {
        Some(rule) => {
            let parent = cursor.resolve(rule.attach_to);
            let new_loop = tree.create_loop(rule.opens, parent);
            cursor.current_loop = Some(new_loop);
            if let Some(d) = decoded {
                apply_shortcut_effects(name, d, new_loop, cursor);
            }
            new_loop
        }
        // Most segments (DTP, REF, N3/N4, the subscriber's own SBR, ...) are
        // ordinary members of whatever loop is currently open; only a
        // genuine loop-start trigger consults the rule table above.
        None => match cursor.current_loop {
            Some(loop_id) => loop_id,
            None => {
                return Err(ParseError::Bind(BindError::NoApplicableRule {
                    segment_index: index,
                    segment_name: name.to_string(),
                }))
            }
        },
    };

    tree.append_segment(target_loop, owned_segment(raw, decoded, index));
    Ok(())
}

fn apply_shortcut_effects(
    name: &str,
    decoded: &DecodedSegment<'_>,
    new_loop: crate::tree::LoopId,
    cursor: &mut Cursor,
) {
    match name {
        "HL" => {
            let level_code = field_text(decoded, 2);
            let child_code = field_text(decoded, 3);
            let level = match level_code.as_str() {
                "20" => HlLevelCode::BillingProvider,
                "22" => HlLevelCode::Subscriber,
                _ => HlLevelCode::Patient,
            };
            cursor.most_recent_hl = Some(HlContext {
                id_number: decoded
                    .field(0)
                    .as_text()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
                parent_id_number: decoded.field(1).as_text().and_then(|s| s.parse().ok()),
                level_code: level,
                has_child: child_code != "0",
            });

            match level_code.as_str() {
                "20" => cursor.billing_provider = Some(new_loop),
                "22" => {
                    cursor.subscriber = Some(new_loop);
                    cursor.patient = if child_code == "0" {
                        Some(new_loop)
                    } else {
                        None
                    };
                }
                "23" => cursor.patient = Some(new_loop),
                _ => {}
            }
        }
        "CLM" => {
            cursor.claim = Some(new_loop);
            cursor.service_line = None;
            cursor.other_subscriber = None;
        }
        "LX" => cursor.service_line = Some(new_loop),
        "SBR" => cursor.other_subscriber = Some(new_loop),
        _ => {}
    }
}

fn field_text(decoded: &DecodedSegment<'_>, index: usize) -> String {
    decoded
        .field(index)
        .as_text()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn owned_segment(
    raw: &RawSegment<'_>,
    decoded: Option<&DecodedSegment<'_>>,
    index: usize,
) -> OwnedSegment {
    let name = raw.id_str().unwrap_or("").to_string();

    let fields = match decoded {
        // The guide schemas only enumerate the fields a rule or downstream
        // consumer actually needs; a real segment can carry more elements
        // than that. Fields beyond the schema are retained verbatim as text
        // so serialize(parse(interchange)) never drops wire data.
        Some(d) => {
            let schema_len = d.schema().fields.len();
            let total = schema_len.max(raw.field_count());
            (0..total)
                .map(|i| {
                    if i < schema_len {
                        owned_field(d, i)
                    } else {
                        raw_field(raw, i)
                    }
                })
                .collect()
        }
        None => raw.fields().map(|f| raw_text(f)).collect(),
    };

    OwnedSegment { name, fields, index }
}

fn raw_field(raw: &RawSegment<'_>, index: usize) -> OwnedFieldValue {
    match raw.field(index) {
        Some(f) => raw_text(f),
        None => OwnedFieldValue::Null,
    }
}

fn raw_text(field: Element<'_>) -> OwnedFieldValue {
    match field.as_str() {
        Some(s) if !s.is_empty() => OwnedFieldValue::Text(s.to_string()),
        _ => OwnedFieldValue::Null,
    }
}

fn owned_field(decoded: &DecodedSegment<'_>, field_index: usize) -> OwnedFieldValue {
    let schema = decoded.schema().fields[field_index];
    if let FieldType::Composite(components) = schema.field_type {
        let parts = (0..components.len())
            .map(|i| {
                decoded
                    .component(field_index, i)
                    .map(to_owned_scalar)
                    .unwrap_or(OwnedFieldValue::Null)
            })
            .collect();
        return OwnedFieldValue::Composite(parts);
    }
    to_owned_scalar(decoded.field(field_index))
}

fn to_owned_scalar(value: FieldValue<'_>) -> OwnedFieldValue {
    match value {
        FieldValue::Null => OwnedFieldValue::Null,
        FieldValue::Text(s) => OwnedFieldValue::Text(s.to_string()),
        FieldValue::Decimal(d) => OwnedFieldValue::Decimal(d),
        FieldValue::Date(d) => OwnedFieldValue::Date(d),
        FieldValue::Time(s) => OwnedFieldValue::Time(s.to_string()),
        FieldValue::DateTime(d) => OwnedFieldValue::DateTime(d),
        FieldValue::Composite(_) => OwnedFieldValue::Null,
    }
}
