//! Dispatch report module.
//!
//! Contains the `DispatchReport` type, a breakdown of what one dispatch
//! did: which rules applied and in what order, which were held back by the
//! application guard, and which failed.

use crate::entity::EventKind;
use crate::id::RuleId;
use serde::{Deserialize, Serialize};

/// One rule application in a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedRule {
    pub rule: RuleId,
    /// The transform's description at the time it applied.
    pub description: String,
}

/// Breakdown of a single dispatch.
///
/// # Examples
///
/// ```rust
/// use ascension::{DispatchReport, EventKind, RuleId};
///
/// let mut report = DispatchReport::new(EventKind::GetCardPrice);
/// report.add_applied(RuleId::new("card_price_up"), "price ×1.10");
///
/// assert_eq!(report.applied.len(), 1);
/// assert!(report.failed.is_empty());
/// assert!(report.changed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Event kind that was dispatched.
    pub event: EventKind,

    /// Rules applied, in application order.
    pub applied: Vec<AppliedRule>,

    /// Rules suppressed because they already ran against this entity.
    pub suppressed: Vec<RuleId>,

    /// Rules whose predicate or transform failed, with the error message.
    pub failed: Vec<(RuleId, String)>,
}

impl DispatchReport {
    /// Create an empty report for `event`.
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            applied: Vec::new(),
            suppressed: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record a rule that applied.
    pub fn add_applied(&mut self, rule: RuleId, description: impl Into<String>) {
        self.applied.push(AppliedRule {
            rule,
            description: description.into(),
        });
    }

    /// Record a rule held back by the application guard.
    pub fn add_suppressed(&mut self, rule: RuleId) {
        self.suppressed.push(rule);
    }

    /// Record a rule whose predicate or transform failed.
    pub fn add_failed(&mut self, rule: RuleId, error: impl Into<String>) {
        self.failed.push((rule, error.into()));
    }

    /// Whether any rule applied.
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Ids of the applied rules, in order.
    pub fn applied_ids(&self) -> Vec<&str> {
        self.applied.iter().map(|a| a.rule.as_str()).collect()
    }
}
