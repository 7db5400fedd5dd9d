//! `doctor` — diagnose configuration and upstream health.

use foliochat_config::AppConfig;

pub async fn run() -> anyhow::Result<()> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("Foliochat doctor\n");

    if config_path.exists() {
        println!("  [ok] config file: {}", config_path.display());
    } else {
        println!("  [--] no config file (defaults in effect) — run `foliochat onboard`");
    }

    let config = AppConfig::load()?;

    if config.has_completion_key() {
        println!("  [ok] completion API key configured ({})", config.completion.model);
    } else {
        println!("  [--] no completion API key — assistant runs in local-only mode");
    }

    match &config.profile_store.api_url {
        Some(url) => {
            println!("  [ok] profile store configured: {url}");
            let store = foliochat_profile::build_from_config(&config);
            match store.fetch_profile().await {
                Ok(profile) => println!("  [ok] profile store reachable (profile: {})", profile.name),
                Err(e) => println!("  [!!] profile store unreachable: {e}"),
            }
        }
        None => println!("  [--] no profile store configured — serving the bundled sample profile"),
    }

    if config.translation.enabled {
        println!("  [ok] translation enabled: {}", config.translation.api_url);
    } else {
        println!("  [--] translation disabled");
    }

    println!(
        "\n  budget: {} chars (retry ladder: {:?}), {} chars/token, {} tokens/item, margin {}",
        config.composer.max_prompt_chars,
        config.composer.retry_prompt_chars,
        config.composer.chars_per_token,
        config.composer.tokens_per_item,
        config.composer.safety_margin_tokens,
    );

    Ok(())
}
