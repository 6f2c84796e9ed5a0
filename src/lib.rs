//! Reservation-table toolkit. Ingests delimited exports into a typed,
//! tagged-column table and holds the cleaned result as a session-scoped
//! editable working set, with CSV/JSON export and an optional webhook
//! forward.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod ingest;
pub mod session;
pub mod table;

pub use config::IngestConfig;
pub use error::TableError;
pub use ingest::{Loader, SanitizeReport, Sanitizer};
pub use session::WorkingSet;
pub use table::{CellValue, CleanedTable, Column, ColumnTag, RawTable};
