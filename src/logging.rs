//! Structured logging utilities for earthcmap.
//!
//! Log events carry named fields (operation, category, counts, durations) so
//! they stay machine-readable when piped into a collector.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so command output
/// on stdout stays clean.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log what a catalog load produced
pub fn log_catalog_load_stats(
    dir: &str,
    category_count: usize,
    colormap_count: usize,
    elapsed: Duration,
) {
    info!(
        operation = "catalog_load",
        dir = dir,
        category_count = category_count,
        colormap_count = colormap_count,
        duration_ms = elapsed.as_secs_f64() * 1000.0,
        "Catalog loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::EarthCmapError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_operation_id() {
        let id1 = generate_operation_id();
        let id2 = generate_operation_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing("debug");
        init_tracing("info");
        log_operation_start("noop", None);
        log_operation_end("noop", Instant::now(), true);
    }
}
