use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Logs go to stderr so JSON output on
/// stdout stays machine-readable. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "piggy=debug" } else { "piggy=info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;
    Ok(())
}
