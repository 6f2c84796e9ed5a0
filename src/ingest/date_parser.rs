use chrono::NaiveDate;

/// Formats accepted by the loose calendar-date parser, tried in order.
/// Ambiguous day/month inputs resolve to the earlier format in this list.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Loose parse of a calendar date in any of the common export formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let cleaned = clean_str(s);
    if cleaned.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
}
