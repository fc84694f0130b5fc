//! Whole-pipeline scenarios: tokenize -> decode -> bind -> (re)serialize.

use x12_document::{guides::x222a2, parse, serialize, BinderConfig, CustomDelimiters, EnvelopeError, ParseError};

fn registries() -> (x12_document::RuleRegistry, x12_schema::SchemaRegistry) {
    (x222a2::rule_registry(), x222a2::schema_registry())
}

/// S1: a well-formed minimal 837P round-trips through the full pipeline with
/// one billing provider and a segment count the envelope validator accepts.
#[test]
fn s1_minimal_interchange_builds_a_single_billing_provider() {
    let (registry, schemas) = registries();
    let data = b"ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*T*:~\
GS*HC*SENDER*RECEIVER*20240101*1200*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
SE*4*0001~\
GE*1*1~\
IEA*1*000000001~"
        .to_vec();

    let outcome = parse(&data, &registry, &schemas, &BinderConfig::default()).unwrap();
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.tree.top_level.len(), 1);
    assert_eq!(outcome.tree.node(outcome.tree.top_level[0]).loop_id, "loop_2000a");
}

/// S4: the same `NM1*DN` qualifier opens different loops depending on the
/// currently open loop — `loop_2310a` under a claim, `loop_2420f` under a
/// service line — because the rule registry checks legal-parent prefixes,
/// not just the trigger/qualifier pair.
#[test]
fn s4_qualifier_disambiguated_by_current_loop() {
    let (registry, schemas) = registries();
    let data = b"ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*T*:~\
GS*HC*SENDER*RECEIVER*20240101*1200*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
HL*2*1*22*0~\
SBR*P*18*******CI~\
NM1*IL*1*DOE*JANE~\
CLM*CLAIM0001*150***11:B:1*Y*A*Y*Y~\
NM1*DN*1*REFERRING*DOC~\
LX*1~\
NM1*DN*1*LINEREFERRING*DOC~\
SE*11*0001~\
GE*1*1~\
IEA*1*000000001~"
        .to_vec();

    let outcome = parse(&data, &registry, &schemas, &BinderConfig::default()).unwrap();
    assert!(outcome.diagnostics.is_empty());

    let billing_provider = outcome.tree.top_level[0];
    let subscriber = *outcome
        .tree
        .children(billing_provider)
        .iter()
        .find(|id| outcome.tree.node(**id).loop_id == "loop_2000b")
        .unwrap();
    let claim = *outcome
        .tree
        .children(subscriber)
        .iter()
        .find(|id| outcome.tree.node(**id).loop_id == "loop_2300")
        .unwrap();

    let claim_referring = outcome
        .tree
        .children(claim)
        .iter()
        .find(|id| outcome.tree.node(**id).loop_id == "loop_2310a");
    assert!(claim_referring.is_some(), "NM1*DN under the claim should open loop_2310a");

    let service_line = *outcome
        .tree
        .children(claim)
        .iter()
        .find(|id| outcome.tree.node(**id).loop_id == "loop_2400")
        .unwrap();
    let line_referring = outcome
        .tree
        .children(service_line)
        .iter()
        .find(|id| outcome.tree.node(**id).loop_id == "loop_2420f");
    assert!(
        line_referring.is_some(),
        "NM1*DN under the service line should open loop_2420f, not loop_2310a again"
    );
}

/// S5: a declared SE01 segment count that does not match the segments
/// actually seen since ST aborts the parse; no partial tree is returned.
#[test]
fn s5_envelope_count_mismatch_aborts_the_parse() {
    let (registry, schemas) = registries();
    let data = b"ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*T*:~\
GS*HC*SENDER*RECEIVER*20240101*1200*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
SE*99*0001~\
GE*1*1~\
IEA*1*000000001~"
        .to_vec();

    let err = parse(&data, &registry, &schemas, &BinderConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Envelope(EnvelopeError::CountMismatch { envelope: "SE", .. })
    ));
}

/// S6: non-default delimiters (declared in the ISA header) are discovered
/// and the interchange round-trips through serialize with the same bytes.
#[test]
fn s6_non_default_delimiters_round_trip() {
    let (registry, schemas) = registries();
    let body = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*T*:~\
GS*HC*SENDER*RECEIVER*20240101*1200*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
SE*4*0001~\
GE*1*1~\
IEA*1*000000001~"
        .replace('*', "|")
        .replace(':', ">")
        .replace('~', "#");
    let data = body.into_bytes();

    let outcome = parse(&data, &registry, &schemas, &BinderConfig::default()).unwrap();
    assert!(outcome.diagnostics.is_empty());

    let config = BinderConfig {
        custom_delimiters: Some(CustomDelimiters {
            element: b'|',
            component: b'>',
            repetition: b'^',
            segment: b'#',
        }),
        ..BinderConfig::default()
    };
    let out = serialize(&outcome.tree, &config);
    assert!(out.starts_with("ISA|00|"));
    assert!(out.contains("NM1|85|2|ACME CLINIC#"));
}

/// Testable Property 1 (serialize(parse(I)) == I): a claim whose CLM segment
/// carries more wire fields than the guide's CLM schema enumerates, under
/// non-default delimiters, re-serializes back to the exact original bytes
/// without the caller re-supplying `custom_delimiters`.
#[test]
fn s7_full_round_trip_preserves_exact_bytes() {
    let (registry, schemas) = registries();
    let original = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240101*1200*^*00501*000000001*0*T*:~\
GS*HC*SENDER*RECEIVER*20240101*1200*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
HL*2*1*22*0~\
SBR*P*18*******CI~\
NM1*IL*1*DOE*JANE~\
CLM*CLAIM0001*150***11:B:1*Y*A*Y*Y~\
NM1*DN*1*REFERRING*DOC~\
LX*1~\
NM1*DN*1*LINEREFERRING*DOC~\
SE*11*0001~\
GE*1*1~\
IEA*1*000000001~"
        .replace('*', "|")
        .replace(':', ">")
        .replace('~', "#");
    let data = original.clone().into_bytes();

    let outcome = parse(&data, &registry, &schemas, &BinderConfig::default()).unwrap();
    assert!(outcome.diagnostics.is_empty());

    let out = serialize(&outcome.tree, &BinderConfig::default());
    assert_eq!(out, original);

    let reparsed = parse(out.as_bytes(), &registry, &schemas, &BinderConfig::default()).unwrap();
    assert_eq!(reparsed.tree.top_level.len(), outcome.tree.top_level.len());
}
