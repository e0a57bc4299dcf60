//! The validator: executes the rule table over a parsed file and merges
//! the findings with the parser's own diagnostics.

use cwr_model::{CwrFile, Severity};
use cwr_standards::{LookupManager, SchemaRegistry};
use tracing::debug;

use crate::checks;
use crate::rules::{self, RuleKind};

/// Validation policy knobs; defaults follow CISAC practice, the
/// alternatives cover conventions seen in the wild.
#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Whether GRH and GRT themselves count toward the group's declared
    /// record count (the TRL convention). Flip for details-only counting.
    pub group_count_includes_bounds: bool,
    /// Severity of transaction-sequence findings. `Transaction` matches
    /// historical behavior; `Record` confines the damage to one record.
    pub sequence_severity: Severity,
    /// Expected sequence of the first detail record in a transaction;
    /// the header itself always carries 0.
    pub detail_sequence_base: u64,
    /// Allowed deviation of a share total from 100.000%, in thousandths.
    pub share_tolerance: u64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            group_count_includes_bounds: true,
            sequence_severity: Severity::Transaction,
            detail_sequence_base: 1,
            share_tolerance: 3,
        }
    }
}

/// Validation context borrowing the shared registries.
///
/// The registries are immutable; the validator itself holds no mutable
/// state, so one instance can serve many files.
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
    lookups: Option<&'a LookupManager>,
    options: ValidateOptions,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            lookups: None,
            options: ValidateOptions::default(),
        }
    }

    /// Enable lookup-membership checks against the given manager.
    #[must_use]
    pub fn with_lookups(mut self, lookups: &'a LookupManager) -> Self {
        self.lookups = Some(lookups);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    /// Run all rules and fold the findings into the file's diagnostics.
    ///
    /// The resulting list is ordered by input line, tie-broken by layer
    /// (parse findings, then L1 through L4). Call once per parsed file.
    pub fn validate(&self, file: &mut CwrFile) {
        let mut entries: Vec<(u8, cwr_model::Diagnostic)> =
            file.diagnostics.drain(..).map(|d| (0, d)).collect();

        for rule in rules::DEFAULT_RULES {
            let found = match rule.kind {
                RuleKind::MandatoryFields => checks::mandatory::check(file, self.registry),
                RuleKind::LookupMembership => match self.lookups {
                    Some(lookups) => checks::lookup::check(file, self.registry, lookups),
                    None => Vec::new(),
                },
                RuleKind::ShareTotals => checks::shares::check(file, &self.options),
                RuleKind::ReferentialLinkage => checks::linkage::check(file),
                RuleKind::Sequencing => checks::sequence::check(file, &self.options),
                RuleKind::TransactionShape => checks::shape::check(file),
                RuleKind::StructuralCounts => checks::counts::check(file, &self.options),
            };
            if !found.is_empty() {
                debug!(rule = rule.id, findings = found.len(), "rule findings");
            }
            entries.extend(found.into_iter().map(|d| (rule.layer, d)));
        }

        entries.sort_by_key(|(layer, d)| (d.line.unwrap_or(usize::MAX), *layer));
        file.diagnostics = entries.into_iter().map(|(_, d)| d).collect();
    }
}
