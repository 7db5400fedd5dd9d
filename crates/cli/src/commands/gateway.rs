//! `gateway` — start the HTTP server.

use foliochat_config::AppConfig;

pub async fn run(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.gateway.port = port;
    }

    foliochat_gateway::serve(config)
        .await
        .map_err(|e| anyhow::anyhow!("gateway failed: {e}"))
}
