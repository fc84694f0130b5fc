#![no_std]

//! Hierarchical loop binding over decoded X12 segments.
//!
//! [`segment`] tokenizes an interchange into raw segments; [`x12_schema`]
//! validates and decodes them against a schema. This crate owns the result:
//! it copies decoded fields into a [`tree::DocumentTree`] arena shaped by a
//! declarative [`rule::Rule`] table, tracking the HL-driven billing
//! provider/subscriber/patient/claim/service-line hierarchy as it goes.

extern crate alloc;

mod binder;
mod config;
mod cursor;
mod diagnostic;
mod envelope;
mod error;
pub mod guides;
mod registry;
mod rule;
mod serializer;
mod tree;
mod version;

pub use binder::{parse, ParseOutcome};
pub use config::{BinderConfig, CustomDelimiters, StrictMode};
pub use cursor::{AttachTo, Cursor, HlContext, HlLevelCode};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{BindError, EnvelopeError, ParseError};
pub use registry::RuleRegistry;
pub use rule::{Qualifier, Rule};
pub use serializer::serialize;
pub use tree::{DocumentTree, LoopId, LoopNodeData, OwnedFieldValue, OwnedSegment, PreorderIter};
pub use version::{canonicalize as canonicalize_version, major_version};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn child_with_id(tree: &DocumentTree, parent: LoopId, loop_id: &str) -> LoopId {
        *tree
            .children(parent)
            .iter()
            .find(|id| tree.node(**id).loop_id == loop_id)
            .unwrap_or_else(|| panic!("no child {loop_id} under {:?}", tree.node(parent).loop_id))
    }

    fn sample_837p() -> alloc::vec::Vec<u8> {
        let body = alloc::string::String::from(
            "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *231213*1430*^*00501*000000001*0*P*:~\
GS*HC*SENDER*RECEIVER*20231213*1430*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC*****XX*1234567890~\
HL*2*1*22*1~\
SBR*P*18*******CI~\
NM1*IL*1*DOE*JANE****MI*123456789~\
HL*3*2*23*0~\
NM1*QC*1*DOE*JOHN~\
CLM*CLAIM0001*150***11:B:1*Y*A*Y*Y~\
LX*1~\
SVD*PAYERID*50*HC:99213**1~\
SVD*PAYERID*75*HC:99214**1~\
SE*13*0001~\
GE*1*1~\
IEA*1*000000001~",
        );
        body.into_bytes()
    }

    #[test]
    fn parses_minimal_837p_and_builds_hierarchy() {
        let data = sample_837p();
        let outcome = parse(
            &data,
            &guides::x222a2::rule_registry(),
            &guides::x222a2::schema_registry(),
            &BinderConfig::default(),
        )
        .unwrap();

        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.tree.top_level.len(), 1);

        let billing_provider = outcome.tree.top_level[0];
        assert_eq!(outcome.tree.node(billing_provider).loop_id, "loop_2000a");

        let subscriber = child_with_id(&outcome.tree, billing_provider, "loop_2000b");
        let patient = child_with_id(&outcome.tree, subscriber, "loop_2000c");
        let claim = child_with_id(&outcome.tree, patient, "loop_2300");
        assert_eq!(outcome.tree.node(claim).loop_id, "loop_2300");
    }

    /// Regression test for the multi-SVD accumulation bug: every `SVD`
    /// segment under a service line must create its own retained loop_2430
    /// child rather than overwriting a shared slot.
    #[test]
    fn multiple_svd_segments_each_get_their_own_loop_2430() {
        let data = sample_837p();
        let outcome = parse(
            &data,
            &guides::x222a2::rule_registry(),
            &guides::x222a2::schema_registry(),
            &BinderConfig::default(),
        )
        .unwrap();

        let billing_provider = outcome.tree.top_level[0];
        let subscriber = child_with_id(&outcome.tree, billing_provider, "loop_2000b");
        let patient = child_with_id(&outcome.tree, subscriber, "loop_2000c");
        let claim = child_with_id(&outcome.tree, patient, "loop_2300");
        let service_line = child_with_id(&outcome.tree, claim, "loop_2400");
        assert_eq!(outcome.tree.node(service_line).loop_id, "loop_2400");

        let adjudications: Vec<_> = outcome
            .tree
            .children(service_line)
            .iter()
            .filter(|id| outcome.tree.node(**id).loop_id == "loop_2430")
            .collect();
        assert_eq!(adjudications.len(), 2);
        assert_ne!(adjudications[0], adjudications[1]);
    }

    /// Regression test for the payer-name mislabeling bug: the subscriber's
    /// payer-name loop must open as `loop_2010bb` attached under the actual
    /// subscriber loop the cursor just created, not a stale or mislabeled one.
    #[test]
    fn subscriber_payer_name_attaches_to_the_correct_subscriber_loop() {
        let data = alloc::string::String::from(
            "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *231213*1430*^*00501*000000001*0*P*:~\
GS*HC*SENDER*RECEIVER*20231213*1430*1*X*005010X222A2~\
ST*837*0001*005010X222A2~\
HL*1**20*1~\
NM1*85*2*ACME CLINIC~\
HL*2*1*22*0~\
SBR*P*18*******CI~\
NM1*IL*1*DOE*JANE~\
NM1*PR*2*ACME PAYER~\
SE*8*0001~\
GE*1*1~\
IEA*1*000000001~",
        )
        .into_bytes();

        let outcome = parse(
            &data,
            &guides::x222a2::rule_registry(),
            &guides::x222a2::schema_registry(),
            &BinderConfig::default(),
        )
        .unwrap();

        let billing_provider = outcome.tree.top_level[0];
        let subscriber = child_with_id(&outcome.tree, billing_provider, "loop_2000b");
        let subscriber_children: Vec<_> = outcome
            .tree
            .children(subscriber)
            .iter()
            .map(|id| outcome.tree.node(*id).loop_id)
            .collect();
        assert_eq!(subscriber_children, alloc::vec!["loop_2010ba", "loop_2010bb"]);

        let payer_name_loop = child_with_id(&outcome.tree, subscriber, "loop_2010bb");
        assert_eq!(outcome.tree.parent(payer_name_loop), Some(subscriber));
    }
}
