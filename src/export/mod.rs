use serde_json::{Map, Value};

use crate::error::TableError;
use crate::table::CleanedTable;

pub mod webhook;

/// Render the table as delimited text: one header line, one line per row,
/// column order as held, dates in ISO-8601, missing cells empty.
pub fn to_csv(table: &CleanedTable) -> Result<String, TableError> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
        for i in 0..table.row_count() {
            wtr.write_record(table.columns.iter().map(|c| c.values[i].to_field()))?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Rows as JSON objects keyed by column name, in row order.
pub fn row_objects(table: &CleanedTable) -> Result<Vec<Map<String, Value>>, TableError> {
    let mut rows = Vec::with_capacity(table.row_count());
    for i in 0..table.row_count() {
        let mut obj = Map::new();
        for col in &table.columns {
            obj.insert(col.name.clone(), serde_json::to_value(&col.values[i])?);
        }
        rows.push(obj);
    }
    Ok(rows)
}

/// Render the table as a JSON array of row objects with ISO-8601 date
/// strings and `null` for missing cells.
pub fn to_json(table: &CleanedTable) -> Result<String, TableError> {
    Ok(serde_json::to_string(&row_objects(table)?)?)
}
