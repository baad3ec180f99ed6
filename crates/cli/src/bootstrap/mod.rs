use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tunrelay_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

pub fn print_config_summary(config: &Config) -> anyhow::Result<()> {
    let groups = config.multicast_groups()?;

    info!(
        listen = %config.server.listen_address(),
        upstream = %config.relay.upstream,
        timeout_secs = config.relay.query_timeout,
        "Configuration OK"
    );

    if groups.is_empty() {
        warn!("No multicast groups configured");
    }
    for group in &groups {
        let family = if group.is_ipv4() { "ipv4" } else { "ipv6" };
        println!("{} {}", family, group);
    }

    Ok(())
}
