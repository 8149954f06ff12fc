//! Diagnostic logging setup and per-run summaries.

use crate::aggregate::AggregateResult;
use crate::display::{format_count, format_span, format_wall_time};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr. `RUST_LOG` takes
/// precedence over `verbosity`. Calling this twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log what was loaded for each run directory.
pub fn log_run_summaries(result: &AggregateResult) {
    for (dir, log) in result.runs() {
        if log.is_empty() {
            warn!(run = %dir, "no scalar metrics");
            continue;
        }
        let samples = format_count(log.sample_count());
        match log.time_span() {
            Some((start, end)) => info!(
                run = %dir,
                metrics = log.len(),
                samples = %samples,
                "{} to {} ({})",
                format_wall_time(start),
                format_wall_time(end),
                format_span(end - start),
            ),
            None => info!(run = %dir, metrics = log.len(), samples = %samples, "loaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_default_level() {
        assert_eq!(default_directive(0), "info");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(2), "trace");
        assert_eq!(default_directive(9), "trace");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(0);
        init(2);
    }
}
