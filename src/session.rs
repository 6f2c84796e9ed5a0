use tracing::{debug, info};

use crate::error::TableError;
use crate::table::{CellValue, CleanedTable};

/// The live, session-owned, user-editable copy of a cleaned table.
///
/// Owned by exactly one session: one mutation completes before the next
/// begins, so no locking is involved. Insertion order is the only ordering
/// guarantee the set makes.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    table: CleanedTable,
}

impl WorkingSet {
    pub fn new(table: CleanedTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CleanedTable {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Overwrite the working set wholesale, e.g. after bulk grid edits.
    pub fn replace(&mut self, table: CleanedTable) {
        info!(rows = table.row_count(), "replacing working set");
        self.table = table;
    }

    /// Remove the first row whose every cell equals `target`, returning the
    /// number of rows removed (0 or 1).
    ///
    /// Rows carry no synthetic identifier, so textually identical duplicates
    /// are indistinguishable and this removes an arbitrary one of them.
    /// Known limitation of full-row matching.
    pub fn delete_matching(&mut self, target: &[CellValue]) -> usize {
        if target.len() != self.table.column_count() {
            return 0;
        }
        let found = (0..self.table.row_count()).find(|&i| {
            self.table
                .columns
                .iter()
                .zip(target)
                .all(|(col, want)| &col.values[i] == want)
        });
        match found {
            Some(idx) => {
                self.table.remove_row(idx);
                debug!(row = idx, "deleted matching row");
                1
            }
            None => 0,
        }
    }

    /// Append one row built from named intake fields.
    ///
    /// Columns not named in `entry` get the missing marker. A name the table
    /// does not have fails with `UnknownColumn` and leaves the set untouched.
    pub fn append(&mut self, entry: &[(String, CellValue)]) -> Result<(), TableError> {
        for (name, _) in entry {
            if self.table.column(name).is_none() {
                return Err(TableError::UnknownColumn(name.clone()));
            }
        }
        let cells: Vec<CellValue> = self
            .table
            .columns
            .iter()
            .map(|col| {
                entry
                    .iter()
                    .find(|(name, _)| col.name.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value.clone())
                    .unwrap_or(CellValue::Missing)
            })
            .collect();
        self.table.push_row(cells);
        debug!(rows = self.table.row_count(), "appended reservation");
        Ok(())
    }
}
