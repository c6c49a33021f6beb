use super::matcher::BrandMatcher;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Serialized shape of one rule, as stored in a JSON rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub canonical_name: String,
    pub tokens: Vec<String>,
    pub source_row: usize,
}

impl RuleSpec {
    pub fn new(canonical_name: &str, tokens: &[&str], source_row: usize) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            source_row,
        }
    }
}

/// A compiled rule: names matching `matcher` become `canonical_name`, and the
/// record at `source_row` supplies the chain's website.
#[derive(Debug, Clone)]
pub struct CanonicalizationRule {
    canonical_name: String,
    matcher: BrandMatcher,
    source_row: usize,
}

impl CanonicalizationRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, RuleError> {
        let canonical_name = spec.canonical_name.trim();
        if canonical_name.is_empty() {
            return Err(RuleError::EmptyCanonicalName);
        }

        let matcher =
            BrandMatcher::new(&spec.tokens).map_err(|source| RuleError::InvalidPattern {
                canonical_name: canonical_name.to_string(),
                source,
            })?;
        if matcher.is_empty() {
            return Err(RuleError::EmptyTokens(canonical_name.to_string()));
        }

        Ok(Self {
            canonical_name: canonical_name.to_string(),
            matcher,
            source_row: spec.source_row,
        })
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn source_row(&self) -> usize {
        self.source_row
    }

    pub(crate) fn matches_normalized(&self, normalized: &str) -> bool {
        self.matcher.is_match(normalized)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("failed to read rule table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rule table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rule is missing a canonical name")]
    EmptyCanonicalName,
    #[error("rule '{0}' has no brand tokens")]
    EmptyTokens(String),
    #[error("rule '{canonical_name}' does not compile: {source}")]
    InvalidPattern {
        canonical_name: String,
        source: regex::Error,
    },
    #[error("rule '{canonical_name}' is not stable: its own name resolves to {resolves_to:?}")]
    UnstableCanonicalName {
        canonical_name: String,
        resolves_to: Option<String>,
    },
}

/// The chains this tool knows how to clean up, in evaluation order.
pub fn standard_rule_specs() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new("McDonald's", &["mc", "donald"], 38),
        RuleSpec::new("Wendy's", &["wendy"], 58),
        RuleSpec::new("Dunkin' Donuts", &["dunkin"], 560),
    ]
}

pub fn compile_rules(specs: &[RuleSpec]) -> Result<Vec<CanonicalizationRule>, RuleError> {
    specs.iter().map(CanonicalizationRule::compile).collect()
}

pub fn rules_from_reader<R: Read>(reader: R) -> Result<Vec<CanonicalizationRule>, RuleError> {
    let specs: Vec<RuleSpec> = serde_json::from_reader(reader)?;
    compile_rules(&specs)
}

pub fn rules_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CanonicalizationRule>, RuleError> {
    let file = std::fs::File::open(path)?;
    rules_from_reader(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_rules_compile_in_order() {
        let rules = compile_rules(&standard_rule_specs()).expect("standard rules compile");
        let names: Vec<&str> = rules.iter().map(|rule| rule.canonical_name()).collect();
        assert_eq!(names, vec!["McDonald's", "Wendy's", "Dunkin' Donuts"]);
        assert_eq!(rules[0].source_row(), 38);
        assert_eq!(rules[1].source_row(), 58);
        assert_eq!(rules[2].source_row(), 560);
    }

    #[test]
    fn canonical_names_match_their_own_rule() {
        let rules = compile_rules(&standard_rule_specs()).expect("standard rules compile");
        for rule in &rules {
            let normalized = crate::canonical::normalizer::normalize_name(rule.canonical_name());
            assert!(
                rule.matches_normalized(&normalized),
                "{} must be stable under its own rule",
                rule.canonical_name()
            );
        }
    }

    #[test]
    fn rule_table_loads_from_json() {
        let json = r#"[
            {"canonical_name": "Arby's", "tokens": ["arby"], "source_row": 3},
            {"canonical_name": "A&W", "tokens": ["a", "w"], "source_row": 9}
        ]"#;

        let rules = rules_from_reader(Cursor::new(json)).expect("rules load");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].canonical_name(), "A&W");
        assert!(rules[1].matches_normalized("a&wrestaurant"));
    }

    #[test]
    fn rules_without_tokens_are_rejected() {
        let spec = RuleSpec {
            canonical_name: "KFC".to_string(),
            tokens: vec!["  ".to_string()],
            source_row: 1,
        };

        let error = CanonicalizationRule::compile(&spec).expect_err("tokens required");
        assert!(matches!(error, RuleError::EmptyTokens(name) if name == "KFC"));
    }

    #[test]
    fn rules_without_a_name_are_rejected() {
        let spec = RuleSpec::new(" ", &["kfc"], 1);
        let error = CanonicalizationRule::compile(&spec).expect_err("name required");
        assert!(matches!(error, RuleError::EmptyCanonicalName));
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = rules_from_reader(Cursor::new("{not json")).expect_err("json must parse");
        assert!(matches!(error, RuleError::Json(_)));
    }
}
