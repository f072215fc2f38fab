//! Tracing setup for hosts embedding `trace-timeline`.
//!
//! The engine itself only emits `tracing` events: frame stats at `debug`,
//! per-gesture and per-action detail at `trace`, rejected input at `warn`.
//! Hosts call one of the helpers below or install their own subscriber.

/// Filter used when `RUST_LOG` is unset: engine debug output, everything
/// else at `info`.
pub const DEFAULT_FILTER_DIRECTIVES: &str = "info,trace_timeline=debug";

/// Initializes a compact `fmt` subscriber honoring `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER_DIRECTIVES`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER_DIRECTIVES));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Same as [`init_default_tracing`] with explicit directives, e.g.
/// `"trace_timeline::api=trace"` while debugging a gesture.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return tracing_subscriber::EnvFilter::try_new(directives).is_ok_and(install);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
