use connect_probe::config::{LogFormat, ProbeConfig};
use connect_probe::{ConnectionProbe, TracingLogger};

use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load config first to get log level
    let config = ProbeConfig::from_env().await?;
    let log_level = config.get_tracing_level()?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("connect_probe={}", log_level.as_str().to_lowercase()).parse()?);
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    let (host, port) = config.target()?;
    let probe = ConnectionProbe::new(host, port, TracingLogger)
        .with_policy(config.retry_policy());

    info!(
        "waiting for {}:{} ({} attempts, {:?} apart)",
        probe.host(),
        probe.port(),
        probe.policy().max_attempts,
        probe.policy().retry_delay
    );

    match probe.try_connect().await {
        Ok(()) => {
            info!("{}:{} is accepting connections", probe.host(), probe.port());
            Ok(())
        }
        Err(e) => {
            error!("{}:{} unreachable: {:?}", probe.host(), probe.port(), e);
            Err(e.into())
        }
    }
}
