//! `compose` — print the composed context for a message.
//!
//! Budget debugging: shows exactly what the completion API would receive,
//! section by section, with token accounting.

use foliochat_composer::{ComposerLimits, ContextComposer};
use foliochat_config::AppConfig;
use foliochat_core::ProfileBundle;

pub async fn run(message: &str, budget: Option<usize>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let budget = budget.unwrap_or(config.composer.max_prompt_chars);

    let store = foliochat_profile::build_from_config(&config);
    let bundle = match store.fetch_bundle().await {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("profile store unavailable ({e}), using placeholder profile");
            ProfileBundle::placeholder()
        }
    };

    let composer = ContextComposer::new(ComposerLimits::from(&config.composer));
    let context = composer.compose_for_message(&bundle, message, budget);

    println!("── sections ──────────────────────────────────");
    for section in &context.sections {
        println!("  {:<12} {:>5} tokens", section.key, section.tokens);
    }
    if !context.stats.skipped.is_empty() {
        let skipped: Vec<String> = context
            .stats
            .skipped
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("  skipped (budget exhausted): {}", skipped.join(", "));
    }
    println!(
        "  total: {}/{} tokens (budget {} chars)",
        context.stats.used_tokens, context.stats.budget_tokens, context.stats.budget_chars
    );

    println!("\n── system prompt ─────────────────────────────");
    println!("{}", context.system_prompt());
    Ok(())
}
