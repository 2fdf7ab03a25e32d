use std::sync::Once;

/// Install the global tracing subscriber once, honoring `RUST_LOG`, so test
/// runs can show the lifecycle transition events.
pub fn init_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stdout);
        let _ = subscriber.try_init();
    });
}
