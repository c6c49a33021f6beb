/// Lower-cases a business name and strips every whitespace character,
/// including the zero-width characters spreadsheet exports leave behind.
pub(crate) fn normalize_name(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '\u{feff}' | '\u{200b}'))
        .collect()
}
