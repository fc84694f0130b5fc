//! Schema and loop-start rule table for the 005010X222A2 (professional claim, 837P)
//! implementation guide.
//!
//! The rule table below mirrors the concrete loop triggers a real implementation
//! guide module supplies: submitter/receiver, billing provider and its name/pay-to
//! loops, subscriber and patient driven by `HL`, the claim and its referring/
//! rendering/ambulance/other-subscriber/service-line sub-loops, and the `SE`-triggered
//! footer close.

use x12_schema::{FieldSchema, FieldType, SchemaRegistry, SegmentSchema};

use crate::cursor::AttachTo;
use crate::registry::RuleRegistry;
use crate::rule::{Qualifier, Rule};

const NM1_FIELDS: &[FieldSchema] = &[
    FieldSchema::id("entity_identifier_code", true, 2, 3),
    FieldSchema::enumerated("entity_type_qualifier", true, &["1", "2"]),
    FieldSchema::text("name_last_or_org_name", false, 0, 60),
    FieldSchema::text("name_first", false, 0, 35),
    FieldSchema::text("name_middle", false, 0, 25),
    FieldSchema::text("name_prefix", false, 0, 10),
    FieldSchema::text("name_suffix", false, 0, 10),
    FieldSchema::id("identification_code_qualifier", false, 1, 2),
    FieldSchema::text("identification_code", false, 2, 80),
];

const HL_FIELDS: &[FieldSchema] = &[
    FieldSchema::id("hierarchical_id_number", true, 1, 12),
    FieldSchema::id("hierarchical_parent_id_number", false, 1, 12),
    FieldSchema::enumerated("hierarchical_level_code", true, &["20", "22", "23"]),
    FieldSchema::enumerated("hierarchical_child_code", false, &["0", "1"]),
];

const CLM_FIELDS: &[FieldSchema] = &[
    FieldSchema::text("claim_submitter_identifier", true, 1, 38),
    FieldSchema::decimal("monetary_amount", true, 1, 18),
];

const SBR_FIELDS: &[FieldSchema] = &[
    FieldSchema::id("payer_responsibility_sequence_number_code", true, 1, 1),
    FieldSchema::id("individual_relationship_code", false, 2, 2),
];

const LX_FIELDS: &[FieldSchema] = &[FieldSchema::text("assigned_number", true, 1, 6)];

const SVD_FIELDS: &[FieldSchema] = &[
    FieldSchema::text("payer_identifier", true, 2, 80),
    FieldSchema::decimal("service_line_paid_amount", true, 1, 18),
];

const LIN_FIELDS: &[FieldSchema] = &[FieldSchema::id("assigned_identification", false, 1, 20)];

const LQ_FIELDS: &[FieldSchema] = &[FieldSchema::id("code_list_qualifier_code", true, 1, 3)];

const ISA_FIELDS: &[FieldSchema] = &[
    FieldSchema::text("authorization_qualifier", true, 2, 2),
    FieldSchema::text("authorization_information", true, 0, 10),
    FieldSchema::text("security_qualifier", true, 2, 2),
    FieldSchema::text("security_information", true, 0, 10),
    FieldSchema::text("sender_qualifier", true, 2, 2),
    FieldSchema::text("sender_id", true, 0, 15),
    FieldSchema::text("receiver_qualifier", true, 2, 2),
    FieldSchema::text("receiver_id", true, 0, 15),
    FieldSchema::date("interchange_date", true),
    FieldSchema::time("interchange_time", true),
    FieldSchema::text("repetition_separator", true, 1, 1),
    FieldSchema::text("control_version_number", true, 5, 5),
    FieldSchema::text("control_number", true, 9, 9),
    FieldSchema::enumerated("acknowledgment_requested", true, &["0", "1"]),
    FieldSchema::enumerated("usage_indicator", true, &["P", "T"]),
    FieldSchema::text("component_separator", true, 1, 1),
];

const GS_FIELDS: &[FieldSchema] = &[
    FieldSchema::id("functional_id_code", true, 2, 2),
    FieldSchema::text("sender_code", true, 2, 15),
    FieldSchema::text("receiver_code", true, 2, 15),
    FieldSchema::date("date", true),
    FieldSchema::time("time", true),
    FieldSchema::text("control_number", true, 1, 9),
    FieldSchema::id("responsible_agency_code", true, 1, 2),
    FieldSchema::text("version", true, 1, 12),
];

const ST_FIELDS: &[FieldSchema] = &[
    FieldSchema::id("transaction_set_id_code", true, 3, 3),
    FieldSchema::text("control_number", true, 4, 9),
    FieldSchema::text("implementation_version", false, 1, 35),
];

const SE_FIELDS: &[FieldSchema] = &[
    FieldSchema::decimal("segment_count", true, 1, 10),
    FieldSchema::text("control_number", true, 4, 9),
];

const GE_FIELDS: &[FieldSchema] = &[
    FieldSchema::decimal("transaction_set_count", true, 1, 6),
    FieldSchema::text("control_number", true, 1, 9),
];

const IEA_FIELDS: &[FieldSchema] = &[
    FieldSchema::decimal("functional_group_count", true, 1, 5),
    FieldSchema::text("control_number", true, 9, 9),
];

/// Segment schemas sufficient to decode a 005010X222A2 professional claim and
/// run its loop-start rules. Not an exhaustive transcription of the
/// implementation guide's segment library.
pub const SEGMENT_SCHEMAS: &[SegmentSchema] = &[
    SegmentSchema { name: "ISA", fields: ISA_FIELDS },
    SegmentSchema { name: "GS", fields: GS_FIELDS },
    SegmentSchema { name: "ST", fields: ST_FIELDS },
    SegmentSchema { name: "NM1", fields: NM1_FIELDS },
    SegmentSchema { name: "HL", fields: HL_FIELDS },
    SegmentSchema { name: "CLM", fields: CLM_FIELDS },
    SegmentSchema { name: "SBR", fields: SBR_FIELDS },
    SegmentSchema { name: "LX", fields: LX_FIELDS },
    SegmentSchema { name: "SVD", fields: SVD_FIELDS },
    SegmentSchema { name: "LIN", fields: LIN_FIELDS },
    SegmentSchema { name: "LQ", fields: LQ_FIELDS },
    SegmentSchema { name: "SE", fields: SE_FIELDS },
    SegmentSchema { name: "GE", fields: GE_FIELDS },
    SegmentSchema { name: "IEA", fields: IEA_FIELDS },
];

pub fn schema_registry() -> SchemaRegistry {
    SchemaRegistry::new(SEGMENT_SCHEMAS)
}

const NO_PARENT_RESTRICTION: &[&str] = &[""];
const CLAIM_PREFIXES: &[&str] = &["loop_2300", "loop_2310"];
const CLAIM_OR_SERVICE_LINE_PREFIXES: &[&str] = &["loop_23"];
const OTHER_SUBSCRIBER_PREFIXES: &[&str] = &["loop_2320", "loop_2330"];
const SERVICE_LINE_PREFIXES: &[&str] = &["loop_24"];

const RULES: &[Rule] = &[
    // 1000A / 1000B — submitter and receiver, at the document root.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["41"],
        },
        legal_parent_prefixes: NO_PARENT_RESTRICTION,
        opens: "loop_1000a",
        attach_to: AttachTo::Current,
        initial_segment_lists: &["nm1_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["40"],
        },
        legal_parent_prefixes: &["loop_1000a"],
        opens: "loop_1000b",
        attach_to: AttachTo::Current,
        initial_segment_lists: &["nm1_segment"],
    },
    // 2000A — billing provider, opened on HL level code 20.
    Rule {
        trigger_segment: "HL",
        when: Qualifier::FieldIn {
            field_index: 2,
            values: &["20"],
        },
        legal_parent_prefixes: NO_PARENT_RESTRICTION,
        opens: "loop_2000a",
        attach_to: AttachTo::Current,
        initial_segment_lists: &["hl_segment"],
    },
    // 2010AA / 2010AB — billing provider name and pay-to address.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["85"],
        },
        legal_parent_prefixes: &["loop_2000a"],
        opens: "loop_2010aa",
        attach_to: AttachTo::BillingProvider,
        initial_segment_lists: &["nm1_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["87"],
        },
        legal_parent_prefixes: &["loop_2000a"],
        opens: "loop_2010ab",
        attach_to: AttachTo::BillingProvider,
        initial_segment_lists: &["nm1_segment"],
    },
    // 2000B — subscriber, opened on HL level code 22.
    Rule {
        trigger_segment: "HL",
        when: Qualifier::FieldIn {
            field_index: 2,
            values: &["22"],
        },
        legal_parent_prefixes: NO_PARENT_RESTRICTION,
        opens: "loop_2000b",
        attach_to: AttachTo::BillingProvider,
        initial_segment_lists: &["hl_segment", "sbr_segment"],
    },
    // 2010BA / 2010BB — subscriber name and subscriber's payer name.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["IL"],
        },
        legal_parent_prefixes: &["loop_2000b"],
        opens: "loop_2010ba",
        attach_to: AttachTo::Subscriber,
        initial_segment_lists: &["nm1_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["PR"],
        },
        legal_parent_prefixes: &["loop_2010ba"],
        opens: "loop_2010bb",
        attach_to: AttachTo::Subscriber,
        initial_segment_lists: &["nm1_segment"],
    },
    // 2000C — dependent patient, opened on HL level code 23.
    Rule {
        trigger_segment: "HL",
        when: Qualifier::FieldIn {
            field_index: 2,
            values: &["23"],
        },
        legal_parent_prefixes: NO_PARENT_RESTRICTION,
        opens: "loop_2000c",
        attach_to: AttachTo::Subscriber,
        initial_segment_lists: &["hl_segment", "pat_segment"],
    },
    // 2010CA — patient name.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["QC"],
        },
        legal_parent_prefixes: &["loop_2000c"],
        opens: "loop_2010ca",
        attach_to: AttachTo::Patient,
        initial_segment_lists: &["nm1_segment"],
    },
    // 2300 — claim, attaches to the patient record regardless of cursor depth.
    Rule {
        trigger_segment: "CLM",
        when: Qualifier::Always,
        legal_parent_prefixes: NO_PARENT_RESTRICTION,
        opens: "loop_2300",
        attach_to: AttachTo::Patient,
        initial_segment_lists: &["clm_segment", "dtp_segment", "ref_segment"],
    },
    // 2310A-D — claim-level entity loops, qualifier-disambiguated.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DN", "P3"],
        },
        legal_parent_prefixes: CLAIM_PREFIXES,
        opens: "loop_2310a",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["nm1_segment", "ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["82"],
        },
        legal_parent_prefixes: CLAIM_PREFIXES,
        opens: "loop_2310b",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["77"],
        },
        legal_parent_prefixes: CLAIM_PREFIXES,
        opens: "loop_2310c",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DQ"],
        },
        legal_parent_prefixes: CLAIM_PREFIXES,
        opens: "loop_2310d",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["ref_segment"],
    },
    // 2310E / 2310F — claim-level ambulance pickup/dropoff.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["PW"],
        },
        legal_parent_prefixes: CLAIM_OR_SERVICE_LINE_PREFIXES,
        opens: "loop_2310e",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &[],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["45"],
        },
        legal_parent_prefixes: CLAIM_OR_SERVICE_LINE_PREFIXES,
        opens: "loop_2310f",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &[],
    },
    // 2320 — claim's other subscriber.
    Rule {
        trigger_segment: "SBR",
        when: Qualifier::Always,
        legal_parent_prefixes: CLAIM_OR_SERVICE_LINE_PREFIXES,
        opens: "loop_2320",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["cas_segment", "amt_segment"],
    },
    // 2330A-G — other subscriber's entities, qualifier-disambiguated.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["IL"],
        },
        legal_parent_prefixes: &["loop_2320"],
        opens: "loop_2330a",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["nm1_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["PR"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330b",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DN", "P3"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330c",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["82"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330d",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["77"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330e",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DQ"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330f",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["85"],
        },
        legal_parent_prefixes: OTHER_SUBSCRIBER_PREFIXES,
        opens: "loop_2330g",
        attach_to: AttachTo::OtherSubscriber,
        initial_segment_lists: &["ref_segment"],
    },
    // 2400 — service line, attaches to the claim regardless of cursor depth.
    Rule {
        trigger_segment: "LX",
        when: Qualifier::Always,
        legal_parent_prefixes: CLAIM_OR_SERVICE_LINE_PREFIXES,
        opens: "loop_2400",
        attach_to: AttachTo::Claim,
        initial_segment_lists: &["dtp_segment", "ref_segment", "amt_segment"],
    },
    // 2410 — drug identification.
    Rule {
        trigger_segment: "LIN",
        when: Qualifier::Always,
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2410",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &[],
    },
    // 2420A-F — service-line entity loops, qualifier-disambiguated. The DN/P3
    // referring-provider qualifier repeats here under a `loop_24*` parent
    // prefix rather than `loop_23*`, which is what disambiguates it from 2310A.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["82"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420a",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["QB"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420b",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["77"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420c",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DQ"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420d",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DK"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420e",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["DN", "P3"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420f",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["ref_segment"],
    },
    // 2420G / 2420H — service-line ambulance pickup/dropoff.
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["PW"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420g",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &[],
    },
    Rule {
        trigger_segment: "NM1",
        when: Qualifier::FieldIn {
            field_index: 0,
            values: &["45"],
        },
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2420h",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &[],
    },
    // 2430 — service line adjudication. A new instance per SVD; never
    // overwrites prior instances since loops are appended to the arena.
    Rule {
        trigger_segment: "SVD",
        when: Qualifier::Always,
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2430",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["cas_segment"],
    },
    // 2440 — form identification.
    Rule {
        trigger_segment: "LQ",
        when: Qualifier::Always,
        legal_parent_prefixes: SERVICE_LINE_PREFIXES,
        opens: "loop_2440",
        attach_to: AttachTo::ServiceLine,
        initial_segment_lists: &["frm_segment"],
    },
];

pub fn rule_registry() -> RuleRegistry {
    RuleRegistry::new(RULES)
}
