use crate::tree::LoopId;

/// Which named shortcut an `attach_to` selector resolves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTo {
    /// Attach under the cursor's current loop.
    Current,
    BillingProvider,
    Subscriber,
    Patient,
    Claim,
    OtherSubscriber,
    ServiceLine,
}

/// Cached `HL` fields needed to disambiguate subscriber-is-patient from
/// subscriber-has-dependents via `hierarchical_child_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HlContext {
    pub id_number: u32,
    pub parent_id_number: Option<u32>,
    pub level_code: HlLevelCode,
    pub has_child: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlLevelCode {
    BillingProvider,
    Subscriber,
    Patient,
}

/// Mutable binding state threaded through a single transaction set (§3).
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub current_loop: Option<LoopId>,
    pub billing_provider: Option<LoopId>,
    pub subscriber: Option<LoopId>,
    pub patient: Option<LoopId>,
    pub claim: Option<LoopId>,
    pub other_subscriber: Option<LoopId>,
    pub service_line: Option<LoopId>,
    pub most_recent_hl: Option<HlContext>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-transaction-set state (on `ST`), keeping nothing from a prior
    /// transaction in the same functional group.
    pub fn reset_for_transaction(&mut self) {
        *self = Self::default();
    }

    pub fn resolve(&self, attach_to: AttachTo) -> Option<LoopId> {
        match attach_to {
            AttachTo::Current => self.current_loop,
            AttachTo::BillingProvider => self.billing_provider,
            AttachTo::Subscriber => self.subscriber,
            AttachTo::Patient => self.patient,
            AttachTo::Claim => self.claim,
            AttachTo::OtherSubscriber => self.other_subscriber,
            AttachTo::ServiceLine => self.service_line,
        }
    }
}
