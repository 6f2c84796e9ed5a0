use crate::ingest::date_parser;
use crate::table::ColumnTag;

/// Substrings in a column name that mark it as a guest-profile column.
const PROFILE_NAME_MARKERS: &[&str] = &["client", "profile"];

/// Assign the one surfaced tag for a column.
///
/// The name-based profile tag wins ties with date detection. Date detection
/// samples the first `sample_size` non-empty values in row order and
/// requires every sampled value to parse; partial failures keep the column
/// plain. A column of all-numeric strings that happen to parse as dates is
/// tagged `Date`. Heuristic, not a guarantee.
pub fn classify_column<'a, I>(name: &str, values: I, sample_size: usize) -> ColumnTag
where
    I: Iterator<Item = &'a str>,
{
    let lowered = name.trim().to_lowercase();
    if PROFILE_NAME_MARKERS.iter().any(|m| lowered.contains(m)) {
        return ColumnTag::CategoricalProfile;
    }

    let mut sampled = 0;
    for value in values
        .map(date_parser::clean_str)
        .filter(|v| !v.is_empty())
        .take(sample_size)
    {
        if date_parser::parse_date(value).is_none() {
            return ColumnTag::Plain;
        }
        sampled += 1;
    }
    if sampled > 0 {
        ColumnTag::Date
    } else {
        // All-empty columns carry no evidence either way.
        ColumnTag::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(name: &str, values: &[&str]) -> ColumnTag {
        classify_column(name, values.iter().copied(), 10)
    }

    #[test]
    fn uniformly_parseable_sample_is_a_date_column() {
        let tag = classify("DATE", &["2024-01-05", "2024-01-06", "01/07/2024"]);
        assert_eq!(tag, ColumnTag::Date);
    }

    #[test]
    fn one_bad_sample_value_keeps_the_column_plain() {
        let tag = classify("DATE", &["2024-01-05", "WEEK 2", "2024-01-07"]);
        assert_eq!(tag, ColumnTag::Plain);
    }

    #[test]
    fn empty_values_are_skipped_not_sampled() {
        let tag = classify("DATE", &["", "  ", "2024-01-05", ""]);
        assert_eq!(tag, ColumnTag::Date);
    }

    #[test]
    fn bad_value_past_the_sample_window_is_ignored() {
        let mut values = vec!["2024-01-05"; 10];
        values.push("not a date");
        let tag = classify_column("DATE", values.iter().copied(), 10);
        assert_eq!(tag, ColumnTag::Date);
    }

    #[test]
    fn profile_name_wins_over_date_content() {
        let tag = classify("Client Since", &["2024-01-05", "2024-01-06"]);
        assert_eq!(tag, ColumnTag::CategoricalProfile);
        assert_eq!(classify(" GUEST PROFILE ", &["vip", "repeat"]), ColumnTag::CategoricalProfile);
    }

    #[test]
    fn all_empty_column_is_plain() {
        assert_eq!(classify("NOTES", &["", "", ""]), ColumnTag::Plain);
        assert_eq!(classify("NOTES", &[]), ColumnTag::Plain);
    }

    #[test]
    fn ordinary_text_is_plain() {
        assert_eq!(classify("VILLA", &["A1", "B2"]), ColumnTag::Plain);
    }
}
