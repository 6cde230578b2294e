//! Opt-in tracing setup.
//!
//! The library only emits `tracing` events; it never installs a subscriber
//! on its own. Hosts that want output without wiring their own subscriber
//! can enable the `telemetry` feature and call [`init_default_tracing`].

/// Installs a compact stderr subscriber honoring `RUST_LOG`, with the
/// pipeline's debug events silenced unless asked for.
///
/// Returns `false` when the feature is disabled or another subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vizspec=info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
