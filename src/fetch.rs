//! Paged retrieval of the command's log stream.
//!
//! Pages are fetched oldest-first in fixed-size chunks through the
//! [`LogPages`] seam. The loop terminates when the store echoes the same
//! continuation token twice - the CloudWatch end-of-stream convention - which
//! also guarantees termination if the store ever repeats a token.
//!
//! Page errors are the one non-fatal failure class in the tool: by the time
//! logs are streaming, the command itself is known to have succeeded, so a
//! failed page is logged and the loop stops, keeping whatever was already
//! emitted.

use crate::model::{AppError, LogLocation};
use async_trait::async_trait;
use tracing::warn;

/// Events requested per page.
pub const PAGE_SIZE: i32 = 5;

/// One retrieved log event, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// The raw log line. May or may not be structured JSON.
    pub message: String,
    /// Ingestion timestamp in epoch milliseconds, when the store provides it.
    pub timestamp: Option<i64>,
}

/// One page of log events plus the continuation token for the next page.
#[derive(Debug, Clone)]
pub struct LogPage {
    /// Events in chronological order.
    pub events: Vec<LogEvent>,
    /// Token for the next page; `None` or a repeat of the previous token
    /// ends the stream.
    pub next_token: Option<String>,
}

/// A paginated, chronologically ordered log store.
#[async_trait]
pub trait LogPages {
    /// Fetch the next page at `location`, starting from `token`
    /// (`None` for the first page).
    async fn next_page(
        &self,
        location: &LogLocation,
        token: Option<&str>,
    ) -> Result<LogPage, AppError>;
}

/// Stream every event at `location` into `sink`, oldest first.
///
/// Never fails: a page-fetch error is logged and truncates the stream.
pub async fn stream_events<P, F>(pages: &P, location: &LogLocation, mut sink: F)
where
    P: LogPages + Sync,
    F: FnMut(&LogEvent),
{
    let mut token: Option<String> = None;
    loop {
        let page = match pages.next_page(location, token.as_deref()).await {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "log page fetch failed, stopping early");
                break;
            }
        };

        for event in &page.events {
            sink(event);
        }

        match page.next_token {
            Some(next) if token.as_deref() != Some(next.as_str()) => token = Some(next),
            // Repeated or absent token: end of stream.
            _ => break,
        }
    }
}
