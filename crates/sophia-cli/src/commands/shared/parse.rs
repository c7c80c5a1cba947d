use sophia_core::enums::Language;

/// Parse a language by stored name or display label (`cpp` or `C++`).
pub fn parse_language(raw: &str) -> anyhow::Result<Language> {
    raw.parse::<Language>().map_err(|error| {
        let known = Language::ALL.map(Language::as_str).join(", ");
        anyhow::anyhow!("{error} (expected one of: {known})")
    })
}

/// Parse an optional language flag.
pub fn parse_optional_language(raw: Option<&str>) -> anyhow::Result<Option<Language>> {
    raw.map(parse_language).transpose()
}
