use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::TableError;
use crate::fetch::http_client;
use crate::table::CleanedTable;

/// JSON envelope POSTed to a user-supplied webhook URL on export.
#[derive(Debug, Serialize)]
pub struct ExportEnvelope {
    pub csv_data: String,
    pub reservations: Vec<Map<String, Value>>,
    pub timestamp: String,
    pub total_reservations: usize,
}

impl ExportEnvelope {
    pub fn build(table: &CleanedTable, on: NaiveDate) -> Result<Self, TableError> {
        Ok(Self {
            csv_data: super::to_csv(table)?,
            reservations: super::row_objects(table)?,
            timestamp: on.format("%Y-%m-%d").to_string(),
            total_reservations: table.row_count(),
        })
    }
}

/// Forward the current working set to a webhook.
///
/// A non-success status or transport failure comes back as an error for the
/// caller to report; the in-memory table is never touched, so the local
/// export proceeds regardless.
#[instrument(level = "info", skip(table, timeout))]
pub fn post_export(
    webhook_url: &str,
    table: &CleanedTable,
    on: NaiveDate,
    timeout: Duration,
) -> Result<(), TableError> {
    let url = Url::parse(webhook_url)?;
    let envelope = ExportEnvelope::build(table, on)?;
    let resp = http_client()
        .post(url.as_str())
        .timeout(timeout)
        .json(&envelope)
        .send()?;
    if !resp.status().is_success() {
        warn!(status = %resp.status(), "webhook rejected export");
        return Err(TableError::WebhookStatus(resp.status()));
    }
    info!(rows = envelope.total_reservations, "webhook delivered");
    Ok(())
}
