//! Logging setup and helpers
//!
//! Output is one timestamped line per event on stdout. Field-level diffs are
//! emitted at DEBUG on the [`DIFF_TARGET`] target and only show up when the
//! verbose channel is enabled through the `DEBUG` flag or `RUST_LOG`.

use std::time::Instant;

use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::entities::RowId;
use crate::privacy::FieldChange;

/// Target of the old → new field diffs
pub const DIFF_TARGET: &str = "anonymize::diff";

/// Whether a flag value such as `DEBUG=1` turns the verbose channel on
pub fn flag_enabled(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
    }
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info,snapshot_anonymizer_lib=debug,anonymize=debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false),
        )
        .init();
}

/// Log every replaced column of one row at DEBUG.
pub fn log_changes(table: &str, id: RowId, changes: &[FieldChange]) {
    for change in changes {
        debug!(
            target: DIFF_TARGET,
            table,
            id,
            field = change.field,
            "{:?} => {:?}",
            change.old,
            change.new
        );
    }
}

/// Operation logger for timing and logging one anonymization step
pub struct OperationLogger {
    /// Name of the operation
    pub name: &'static str,
    /// Start time of the operation
    pub start_time: Instant,
}

impl OperationLogger {
    /// Start the operation and log it
    pub fn start(name: &'static str) -> Self {
        info!("{}", name);
        Self {
            name,
            start_time: Instant::now(),
        }
    }

    /// Log the outcome with the elapsed time
    pub fn finish(self, rows_seen: u64, rows_updated: u64) {
        info!(
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "{}: {} rows read, {} rows updated", self.name, rows_seen, rows_updated
        );
    }
}
