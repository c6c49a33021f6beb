use serde::Serialize;

pub const NO_WEBSITE: &str = "No Website";
pub const VISIT_WEBSITE: &str = "Visit Website";

/// Null markers that spreadsheet exports leave behind in text cells.
const NULL_MARKERS: [&str; 4] = ["nan", "null", "none", "n/a"];

pub(crate) fn clean_website(raw: Option<String>) -> Option<String> {
    let value = raw?;
    let trimmed = value.trim();
    if trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }
    Some(trimmed.to_string())
}

/// The link column of the location table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum WebsiteLink {
    Visit(String),
    NoWebsite,
}

impl WebsiteLink {
    /// Cells may hold several comma-separated URLs; the first usable one wins.
    pub fn from_website(website: Option<&str>) -> Self {
        website
            .into_iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .find(|candidate| looks_like_url(candidate))
            .map(|url| Self::Visit(url.to_string()))
            .unwrap_or(Self::NoWebsite)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Visit(_) => VISIT_WEBSITE,
            Self::NoWebsite => NO_WEBSITE,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Visit(url) => Some(url),
            Self::NoWebsite => None,
        }
    }
}

fn looks_like_url(candidate: &str) -> bool {
    !candidate.is_empty()
        && !candidate.contains(char::is_whitespace)
        && candidate.contains('.')
        && !NULL_MARKERS
            .iter()
            .any(|marker| candidate.eq_ignore_ascii_case(marker))
}
