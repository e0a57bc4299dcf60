//! The rule registry.
//!
//! Rules are data: an ordered table of `(id, kind, layer)` descriptors the
//! validator executes in sequence. Layer order is the tie-break for
//! diagnostics on the same input line, so the table order is significant.

use serde::Serialize;

/// Which check family a rule dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    /// L1: mandatory fields non-empty post-decode.
    MandatoryFields,
    /// L2: coded fields are members of their lookup table.
    LookupMembership,
    /// L3: ownership and collection shares total 100.000%.
    ShareTotals,
    /// L3: territory and publisher records reference known parties.
    ReferentialLinkage,
    /// L3: record and transaction sequencing.
    Sequencing,
    /// L3: transaction types carry their required record types.
    TransactionShape,
    /// L4: declared counts match observed counts; group bookkeeping.
    StructuralCounts,
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub id: &'static str,
    pub kind: RuleKind,
    /// Evaluation layer (1-4); parser findings sort as layer 0.
    pub layer: u8,
}

/// The default rule set, in evaluation order.
pub static DEFAULT_RULES: &[Rule] = &[
    Rule {
        id: "mandatory-fields",
        kind: RuleKind::MandatoryFields,
        layer: 1,
    },
    Rule {
        id: "lookup-membership",
        kind: RuleKind::LookupMembership,
        layer: 2,
    },
    Rule {
        id: "share-totals",
        kind: RuleKind::ShareTotals,
        layer: 3,
    },
    Rule {
        id: "referential-linkage",
        kind: RuleKind::ReferentialLinkage,
        layer: 3,
    },
    Rule {
        id: "sequencing",
        kind: RuleKind::Sequencing,
        layer: 3,
    },
    Rule {
        id: "transaction-shape",
        kind: RuleKind::TransactionShape,
        layer: 3,
    },
    Rule {
        id: "structural-counts",
        kind: RuleKind::StructuralCounts,
        layer: 4,
    },
];
