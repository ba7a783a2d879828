use log::{debug, error, info, LevelFilter};
use std::sync::Once;
use std::time::Instant;

static INIT: Once = Once::new();

/// Install `env_logger` for headless runs and tests. Safe to call repeatedly.
///
/// Crate logs default to debug, noisy HTTP and runtime crates to warn.
/// `RUST_LOG` is applied last and overrides both.
pub fn init_logger() {
    INIT.call_once(|| {
        let installed = env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .filter_module("pazar_lib", LevelFilter::Debug)
            .filter_module("reqwest", LevelFilter::Warn)
            .filter_module("hyper", LevelFilter::Warn)
            .filter_module("tokio", LevelFilter::Warn)
            .parse_env("RUST_LOG")
            .format_timestamp_millis()
            .format_module_path(false)
            .try_init();

        // Another logger (e.g. the desktop log plugin) may already own the facade
        if installed.is_ok() {
            debug!("env_logger installed");
        }
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

/// Fixed-shape log lines for the events the dashboard cares about
pub struct LogContext;

impl LogContext {
    /// Log market API calls
    pub fn api_call(endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("API: {} {} in {}ms", endpoint, status, duration),
            None => debug!("API: Starting {}", endpoint),
        }
    }

    /// Log a dashboard refresh outcome
    pub fn refresh(sequence: u64, filter: Option<&str>, outcome: &str) {
        match filter {
            Some(f) => info!("Refresh #{} for '{}': {}", sequence, f, outcome),
            None => info!("Refresh #{} (all items): {}", sequence, outcome),
        }
    }

    /// Log how many bonuses of a listing batch were max rolls
    pub fn classification_summary(listings: usize, bonuses: usize, max_rolls: usize) {
        debug!(
            "Classified {} bonuses across {} listings, {} max rolls",
            bonuses, listings, max_rolls
        );
    }

    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    pub fn performance_metric(operation: &str, duration_ms: u64, detail: Option<&str>) {
        match detail {
            Some(detail) => debug!("{} took {}ms ({})", operation, duration_ms, detail),
            None => debug!("{} took {}ms", operation, duration_ms),
        }
    }
}

/// Wall-clock timer whose result is reported through `LogContext::performance_metric`
pub struct TimedOperation {
    label: String,
    started: Instant,
}

impl TimedOperation {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("Starting: {}", label);
        Self {
            label,
            started: Instant::now(),
        }
    }

    /// Elapsed milliseconds, logged without extra context
    pub fn finish(self) -> u64 {
        self.report(None)
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        self.report(Some(info))
    }

    fn report(self, info: Option<&str>) -> u64 {
        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        LogContext::performance_metric(&self.label, elapsed_ms, info);
        elapsed_ms
    }
}
