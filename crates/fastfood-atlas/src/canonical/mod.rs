mod matcher;
mod normalizer;
mod rules;

use crate::dataset::Record;
use serde::Serialize;
use tracing::{info, warn};

pub use matcher::BrandMatcher;
pub use rules::{
    compile_rules, rules_from_path, rules_from_reader, standard_rule_specs, CanonicalizationRule,
    RuleError, RuleSpec,
};

/// Decides which rule names a record when its name satisfies more than one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The matching rule that comes last in the rule order sets the name.
    #[default]
    LastMatchWins,
    /// The matching rule that comes first in the rule order sets the name.
    FirstMatchWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebsiteBackfill {
    /// Every record carrying the canonical name now shares the source website.
    Applied { records: usize },
    /// The source row was never loaded or was dropped during validation.
    SourceMissing { row: usize },
    /// No record carries the canonical name.
    Unused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub canonical_name: String,
    pub matched: usize,
    pub website: WebsiteBackfill,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalizationReport {
    pub rules: Vec<RuleOutcome>,
}

impl CanonicalizationReport {
    pub fn total_matched(&self) -> usize {
        self.rules.iter().map(|rule| rule.matched).sum()
    }

    pub fn skipped_backfills(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.rules
            .iter()
            .filter(|rule| matches!(rule.website, WebsiteBackfill::SourceMissing { .. }))
    }
}

/// Rewrites messy chain names to canonical ones using an ordered rule table.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    rules: Vec<CanonicalizationRule>,
    policy: ConflictPolicy,
}

impl Canonicalizer {
    /// Rejects tables where a canonical name would be renamed by another rule,
    /// so a second pass over canonicalized records changes nothing.
    pub fn new(
        rules: Vec<CanonicalizationRule>,
        policy: ConflictPolicy,
    ) -> Result<Self, RuleError> {
        let canonicalizer = Self { rules, policy };

        for (index, rule) in canonicalizer.rules.iter().enumerate() {
            match canonicalizer.rule_for(rule.canonical_name()) {
                Some(owner) if owner == index => {}
                Some(owner)
                    if canonicalizer.rules[owner].canonical_name() == rule.canonical_name() => {}
                resolved => {
                    return Err(RuleError::UnstableCanonicalName {
                        canonical_name: rule.canonical_name().to_string(),
                        resolves_to: resolved
                            .map(|owner| canonicalizer.rules[owner].canonical_name().to_string()),
                    });
                }
            }
        }

        Ok(canonicalizer)
    }

    pub fn standard() -> Result<Self, RuleError> {
        Self::new(
            compile_rules(&standard_rule_specs())?,
            ConflictPolicy::default(),
        )
    }

    pub fn rules(&self) -> &[CanonicalizationRule] {
        &self.rules
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Index of the rule that owns `name`, if any.
    pub fn rule_for(&self, name: &str) -> Option<usize> {
        let normalized = normalizer::normalize_name(name);
        let mut matching = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches_normalized(&normalized))
            .map(|(index, _)| index);

        match self.policy {
            ConflictPolicy::FirstMatchWins => matching.next(),
            ConflictPolicy::LastMatchWins => matching.last(),
        }
    }

    /// Renames matching records and then aligns each canonical chain's website
    /// with its source record. Source websites are read before any record is
    /// renamed.
    pub fn canonicalize(&self, records: &mut [Record]) -> CanonicalizationReport {
        let sources: Vec<Option<Option<String>>> = self
            .rules
            .iter()
            .map(|rule| {
                records
                    .iter()
                    .find(|record| record.row == rule.source_row())
                    .map(|record| record.website.clone())
            })
            .collect();

        let mut matched = vec![0usize; self.rules.len()];
        for record in records.iter_mut() {
            if let Some(index) = self.rule_for(&record.name) {
                record.name = self.rules[index].canonical_name().to_string();
                matched[index] += 1;
            }
        }

        let mut outcomes = Vec::with_capacity(self.rules.len());
        for ((rule, source), matched) in self.rules.iter().zip(sources).zip(matched) {
            let website = match source {
                None => {
                    warn!(
                        chain = rule.canonical_name(),
                        row = rule.source_row(),
                        "website source row not in dataset; keeping per-location websites"
                    );
                    WebsiteBackfill::SourceMissing {
                        row: rule.source_row(),
                    }
                }
                Some(website) => backfill_website(records, rule.canonical_name(), website),
            };

            outcomes.push(RuleOutcome {
                canonical_name: rule.canonical_name().to_string(),
                matched,
                website,
            });
        }

        let report = CanonicalizationReport { rules: outcomes };
        info!(
            rules = report.rules.len(),
            renamed = report.total_matched(),
            skipped_backfills = report.skipped_backfills().count(),
            "canonicalized chain names"
        );
        report
    }
}

fn backfill_website(
    records: &mut [Record],
    canonical_name: &str,
    website: Option<String>,
) -> WebsiteBackfill {
    let mut updated = 0;
    for record in records
        .iter_mut()
        .filter(|record| record.name == canonical_name)
    {
        record.website = website.clone();
        updated += 1;
    }

    if updated == 0 {
        WebsiteBackfill::Unused
    } else {
        WebsiteBackfill::Applied { records: updated }
    }
}
