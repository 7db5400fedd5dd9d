//! `onboard` — write the default configuration file.

use anyhow::Context;
use foliochat_config::AppConfig;

pub async fn run() -> anyhow::Result<()> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("creating {}", config_dir.display()))?;
    std::fs::write(&config_path, AppConfig::default_toml())
        .with_context(|| format!("writing {}", config_path.display()))?;

    println!("Wrote default config to {}", config_path.display());
    println!("Set FOLIOCHAT_COMPLETION_API_KEY (or completion.api_key) to enable remote answers.");
    Ok(())
}
