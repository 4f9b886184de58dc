//! End-to-end wiring: resolve, invoke, fetch, format.
//!
//! Strictly sequential: the invocation blocks until the remote command fully
//! completes, and only then are its logs paged back and printed. Printed
//! lines are permanent - a later page failure never rolls anything back.

use crate::config::Config;
use crate::discover::{resolve_target, InstanceDirectory};
use crate::fetch::{stream_events, LogPages};
use crate::format::format_event;
use crate::invoke::{run_command, CommandRunner};
use crate::model::AppError;
use std::io::Write;
use tracing::debug;

/// Run the whole pipeline against one backend.
///
/// `out` receives the formatted log lines; errors writing to it are ignored
/// (a closed stdout mid-stream is not worth aborting a finished command
/// over).
pub async fn run<B, W>(backend: &B, config: &Config, out: &mut W) -> Result<(), AppError>
where
    B: InstanceDirectory + CommandRunner + LogPages + Sync,
    W: Write,
{
    let target = resolve_target(backend, config).await?;
    debug!(target = %target, "resolved command function");

    let location = run_command(backend, &target, &config.command).await?;
    debug!(
        group = %location.log_group_name,
        stream = %location.log_stream_name,
        "command completed, fetching logs"
    );

    stream_events(backend, &location, |event| {
        let _ = writeln!(out, "{}", format_event(&event.message));
    })
    .await;

    Ok(())
}
