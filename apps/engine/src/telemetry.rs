use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a console subscriber honoring `RUST_LOG`. Opt-in: call it
/// once from the embedding application; embedders with their own
/// subscriber skip it.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
