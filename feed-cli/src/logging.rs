use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// `level` уже выбран в настройках: `LOG_LEVEL`, затем `RUST_LOG`.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Логи идут в stderr, чтобы не смешиваться с выводом на stdout.
pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = log_filter(default_level);

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
