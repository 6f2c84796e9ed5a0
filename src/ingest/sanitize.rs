use regex::{Regex, RegexBuilder};
use tracing::{debug, instrument, warn};

use crate::config::IngestConfig;
use crate::error::TableError;
use crate::ingest::{classify, date_parser};
use crate::table::{CellValue, CleanedTable, Column, ColumnTag, RawTable};

/// Which rows and columns were dropped during sanitization, and why.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizeReport {
    /// Columns outside the configured known-column list.
    pub columns_dropped_unknown: Vec<String>,
    /// Rows where every cell was empty.
    pub rows_dropped_empty: usize,
    /// Rows whose key-column value matched a junk token.
    pub rows_dropped_junk: usize,
    /// Rows missing both required identifying columns.
    pub rows_dropped_unidentified: usize,
    /// Columns dropped for having too few non-missing values.
    pub columns_dropped_sparse: Vec<String>,
    /// Date cells downgraded to the missing marker.
    pub date_cells_unparsed: usize,
}

/// Applies the cleaning rules to a parsed table, in a fixed order:
/// known-column projection, all-empty rows, junk-token rows, rows missing
/// both required columns, sparse columns, then per-cell date coercion.
///
/// Pure function of (table, config): deterministic, no I/O.
pub struct Sanitizer {
    config: IngestConfig,
    junk_re: Option<Regex>,
}

impl Sanitizer {
    pub fn new(config: IngestConfig) -> Result<Self, TableError> {
        let junk_re = if config.junk_tokens.is_empty() {
            None
        } else {
            let pattern = config
                .junk_tokens
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
        };
        Ok(Self { config, junk_re })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    #[instrument(level = "debug", skip(self, raw), fields(rows = raw.rows.len()))]
    pub fn sanitize(&self, raw: &RawTable) -> Result<(CleanedTable, SanitizeReport), TableError> {
        let mut report = SanitizeReport::default();

        // Projection: variants that configure a known-column list keep only
        // those columns, in list order. A header sharing none of them is not
        // a reservation export at all. An empty list keeps every column.
        let cols: Vec<(usize, &str)> = if self.config.known_columns.is_empty() {
            raw.headers
                .iter()
                .enumerate()
                .map(|(i, h)| (i, h.as_str()))
                .collect()
        } else {
            self.config
                .known_columns
                .iter()
                .filter_map(|k| find_column(&raw.headers, k).map(|i| (i, raw.headers[i].as_str())))
                .collect()
        };
        if !self.config.known_columns.is_empty() {
            if cols.is_empty() {
                return Err(TableError::NoMatchingSchema {
                    required: self.config.known_columns.clone(),
                });
            }
            report.columns_dropped_unknown = raw
                .headers
                .iter()
                .filter(|h| !cols.iter().any(|(_, name)| name == &h.as_str()))
                .cloned()
                .collect();
        }

        let required_idx: Vec<Option<usize>> = self
            .config
            .required_columns
            .iter()
            .map(|name| find_projected(&cols, name))
            .collect();
        if required_idx.iter().all(Option::is_none) {
            return Err(TableError::NoMatchingSchema {
                required: self.config.required_columns.to_vec(),
            });
        }
        let key_idx = find_projected(&cols, &self.config.key_column);

        // Row rules, applied in order within one pass. Only projected cells
        // count toward the all-empty check.
        let mut kept_rows: Vec<&Vec<String>> = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            if cols.iter().all(|&(i, _)| row[i].trim().is_empty()) {
                report.rows_dropped_empty += 1;
                continue;
            }
            if let (Some(idx), Some(re)) = (key_idx, self.junk_re.as_ref()) {
                if re.is_match(row[idx].trim()) {
                    report.rows_dropped_junk += 1;
                    continue;
                }
            }
            let all_required_missing = required_idx
                .iter()
                .all(|idx| idx.map_or(true, |i| row[i].trim().is_empty()));
            if all_required_missing {
                report.rows_dropped_unidentified += 1;
                continue;
            }
            kept_rows.push(row);
        }

        // Classification sees only the surviving rows, so junk artifacts in
        // a date column cannot poison its sample.
        let tags: Vec<ColumnTag> = cols
            .iter()
            .map(|&(i, name)| {
                classify::classify_column(
                    name,
                    kept_rows.iter().map(|row| row[i].as_str()),
                    self.config.date_sample_size,
                )
            })
            .collect();

        // Sparse columns are judged over the surviving rows only. With no
        // surviving rows there is nothing to judge, so every column stays.
        let mut keep_col = vec![true; cols.len()];
        if !kept_rows.is_empty() {
            for (c, &(i, name)) in cols.iter().enumerate() {
                let present = kept_rows
                    .iter()
                    .filter(|row| !row[i].trim().is_empty())
                    .count();
                let fraction = present as f64 / kept_rows.len() as f64;
                if fraction < self.config.min_present_fraction {
                    keep_col[c] = false;
                    report.columns_dropped_sparse.push(name.to_string());
                    warn!(column = %name, fraction, "dropping sparse column");
                }
            }
        }

        let mut columns = Vec::new();
        for (c, &(i, name)) in cols.iter().enumerate() {
            if !keep_col[c] {
                continue;
            }
            let values = kept_rows
                .iter()
                .map(|row| self.coerce_cell(&row[i], tags[c], &mut report))
                .collect();
            columns.push(Column {
                name: name.to_string(),
                tag: tags[c],
                values,
            });
        }

        debug!(
            kept = kept_rows.len(),
            dropped_empty = report.rows_dropped_empty,
            dropped_junk = report.rows_dropped_junk,
            dropped_unidentified = report.rows_dropped_unidentified,
            unparsed_dates = report.date_cells_unparsed,
            "sanitized table"
        );
        Ok((CleanedTable { columns }, report))
    }

    fn coerce_cell(&self, raw: &str, tag: ColumnTag, report: &mut SanitizeReport) -> CellValue {
        let cleaned = date_parser::clean_str(raw);
        if cleaned.is_empty() {
            return CellValue::Missing;
        }
        match tag {
            ColumnTag::Date => match date_parser::parse_date(cleaned) {
                Some(date) => CellValue::Date(date),
                None => {
                    report.date_cells_unparsed += 1;
                    CellValue::Missing
                }
            },
            _ => CellValue::Text(cleaned.to_string()),
        }
    }
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers.iter().position(|h| h.eq_ignore_ascii_case(wanted))
}

/// Look up a column by name among the projected (raw index, header) pairs,
/// returning the raw index.
fn find_projected(cols: &[(usize, &str)], name: &str) -> Option<usize> {
    let wanted = name.trim();
    cols.iter()
        .find(|(_, h)| h.eq_ignore_ascii_case(wanted))
        .map(|&(i, _)| i)
}
