use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber. Uses `EnvFilter` (RUST_LOG)
/// with an `info` default so production is not forced into TRACE.
pub fn init_observability() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Default `SystemTime` formatter prints RFC3339 in UTC (`...Z`).
    // Use local time so `TZ=Asia/Seoul` shows `+09:00` in logs.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
