use regex::Regex;

/// Characters tolerated between brand tokens: apostrophe look-alikes plus the
/// punctuation people type inside chain names.
const SEPARATOR_CLASS: &str = r"['’‘´`.&-]*";

/// Matches normalized names that start with a sequence of brand tokens,
/// ignoring punctuation between tokens and anything after the last one.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    tokens: Vec<String>,
    pattern: Regex,
}

impl BrandMatcher {
    pub fn new<I, S>(tokens: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens
            .into_iter()
            .map(|token| super::normalizer::normalize_name(token.as_ref()))
            .filter(|token| !token.is_empty())
            .collect();

        let body = tokens
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join(SEPARATOR_CLASS);
        let pattern = Regex::new(&format!("^{body}"))?;

        Ok(Self { tokens, pattern })
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `normalized` must already be lower-cased with whitespace removed.
    pub fn is_match(&self, normalized: &str) -> bool {
        !self.tokens.is_empty() && self.pattern.is_match(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::normalizer::normalize_name;

    fn matches(tokens: &[&str], name: &str) -> bool {
        BrandMatcher::new(tokens)
            .expect("pattern compiles")
            .is_match(&normalize_name(name))
    }

    #[test]
    fn tolerates_apostrophe_variants_and_suffixes() {
        for name in [
            "McDonald's",
            "Mc Donald's",
            "mcdonalds",
            "McDonald´s",
            "McDonald’s Restaurant",
            "Mc-Donalds",
            "MCDONALD`S",
        ] {
            assert!(matches(&["mc", "donald"], name), "{name} should match");
        }
    }

    #[test]
    fn requires_brand_prefix() {
        assert!(!matches(&["mc", "donald"], "Old McDonald's Farm Stand"));
        assert!(!matches(&["wendy"], "Wen's Diner"));
        assert!(!matches(&["dunkin"], "Baskin Robbins"));
    }

    #[test]
    fn tokens_are_normalized() {
        let matcher = BrandMatcher::new(["Mc ", " Donald"]).expect("pattern compiles");
        assert!(!matcher.is_empty());
        assert!(matcher.is_match("mcdonald's"));
    }

    #[test]
    fn empty_token_list_matches_nothing() {
        let matcher = BrandMatcher::new(Vec::<String>::new()).expect("pattern compiles");
        assert!(matcher.is_empty());
        assert!(!matcher.is_match("anything"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches(&["a&w"], "A&W Restaurant"));
        assert!(!matches(&["a.w"], "abw"));
    }
}
