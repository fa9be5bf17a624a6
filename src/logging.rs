//! Process-wide tracing setup.

/// Installs the global tracing subscriber. Honors `RUST_LOG` when set and
/// falls back to `smudge=info`. Later calls keep the first subscriber, so
/// embedding shells and tests can both call this freely.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "smudge=info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
