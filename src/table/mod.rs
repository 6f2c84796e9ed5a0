use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Parsed, untyped tabular data immediately after delimited-text parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names, trimmed, unique.
    pub headers: Vec<String>,
    /// Each data row, one String per header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate one column's raw values in row order.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[idx].as_str())
    }
}

/// Classification assigned to each column once at load time and held
/// immutably for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTag {
    Date,
    CategoricalProfile,
    Plain,
}

/// One typed cell of a cleaned table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Render the cell the way it appears in a delimited export.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(t) => t.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Missing => serializer.serialize_none(),
            CellValue::Text(t) => serializer.serialize_str(t),
            CellValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// A named, tagged, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub tag: ColumnTag,
    pub values: Vec<CellValue>,
}

/// A raw table after junk-row removal, sparse-column removal, and date
/// coercion. Invariant: all columns hold the same number of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedTable {
    pub columns: Vec<Column>,
}

impl CleanedTable {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name, ignoring ASCII case.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// One row as cell references, in column order.
    pub fn row(&self, idx: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[idx]).collect()
    }

    pub(crate) fn push_row(&mut self, cells: Vec<CellValue>) {
        for (col, cell) in self.columns.iter_mut().zip(cells) {
            col.values.push(cell);
        }
    }

    pub(crate) fn remove_row(&mut self, idx: usize) {
        for col in &mut self.columns {
            col.values.remove(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_col_table() -> CleanedTable {
        CleanedTable {
            columns: vec![
                Column {
                    name: "DATE".into(),
                    tag: ColumnTag::Date,
                    values: vec![
                        CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
                        CellValue::Missing,
                    ],
                },
                Column {
                    name: "VILLA".into(),
                    tag: ColumnTag::Plain,
                    values: vec![CellValue::Text("A1".into()), CellValue::Text("B2".into())],
                },
            ],
        }
    }

    #[test]
    fn row_access_and_counts() {
        let table = two_col_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names(), vec!["DATE", "VILLA"]);
        assert_eq!(table.row(1), vec![&CellValue::Missing, &CellValue::Text("B2".into())]);
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let table = two_col_table();
        assert!(table.column("villa").is_some());
        assert!(table.column("pax").is_none());
    }

    #[test]
    fn cell_rendering() {
        assert_eq!(CellValue::Missing.to_field(), "");
        assert_eq!(CellValue::Text("A1".into()).to_field(), "A1");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).to_field(),
            "2024-01-05"
        );
    }

    #[test]
    fn push_and_remove_keep_columns_aligned() {
        let mut table = two_col_table();
        table.push_row(vec![CellValue::Missing, CellValue::Text("C3".into())]);
        assert_eq!(table.row_count(), 3);
        table.remove_row(0);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[1].values[1], CellValue::Text("C3".into()));
    }
}
