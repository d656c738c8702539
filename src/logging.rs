use tracing_subscriber::EnvFilter;

/// Initialise logging at `info`, or `debug` when enabled in the settings
/// file. `RUST_LOG` is honoured only with debug logging on, so a stray
/// variable in the user's environment cannot make the poll loop noisy.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        eprintln!("Logging disabled: {e}");
    }
}
