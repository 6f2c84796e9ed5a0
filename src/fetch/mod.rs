use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use tracing::{info, instrument};
use url::Url;

use crate::error::TableError;

static HTTP: Lazy<Client> = Lazy::new(Client::new);

pub(crate) fn http_client() -> &'static Client {
    &HTTP
}

/// Fetch a remote delimited-text source with a bounded blocking call.
///
/// Any transport failure, expired timeout, or non-success status surfaces as
/// an error; retry is manual and the current working set is untouched.
#[instrument(level = "info", skip(timeout))]
pub fn fetch_csv(url_str: &str, timeout: Duration) -> Result<Vec<u8>, TableError> {
    let url = Url::parse(url_str)?;
    let resp = HTTP
        .get(url.as_str())
        .timeout(timeout)
        .send()?
        .error_for_status()?;
    let bytes = resp.bytes()?;
    info!(len = bytes.len(), "fetched remote source");
    Ok(bytes.to_vec())
}


#[cfg(test)]
mod tests {
    use super::testserver::serve_once;
    use super::*;
    use anyhow::Result;

    #[test]
    fn fetches_the_remote_bytes() -> Result<()> {
        let body = "DATE,VILLA\n2024-01-05,A1\n";
        let base = serve_once("200 OK", body);
        let bytes = fetch_csv(&format!("{}/reservations.csv", base), Duration::from_secs(5))?;
        assert_eq!(bytes, body.as_bytes());
        Ok(())
    }

    #[test]
    fn http_error_status_is_a_transport_failure() {
        let base = serve_once("404 Not Found", "");
        let err = fetch_csv(&format!("{}/missing.csv", base), Duration::from_secs(5));
        assert!(matches!(err, Err(TableError::Transport(_))));
    }

    #[test]
    fn unreachable_host_is_a_transport_failure() {
        // Bind then drop so the port is very likely unoccupied.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = fetch_csv(&format!("http://{}/x.csv", addr), Duration::from_secs(5));
        assert!(matches!(err, Err(TableError::Transport(_))));
    }

    #[test]
    fn unparseable_url_is_rejected() {
        let err = fetch_csv("not a url", Duration::from_secs(5));
        assert!(matches!(err, Err(TableError::InvalidUrl(_))));
    }
}
