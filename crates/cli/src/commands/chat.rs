//! `chat` — talk to the assistant from the terminal.

use std::io::{BufRead, Write};

use foliochat_config::AppConfig;
use foliochat_core::Language;

pub async fn run(message: Option<String>, language: Option<String>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let language = Language::from_tag(
        language
            .as_deref()
            .unwrap_or(&config.default_language),
    );
    let engine = super::build_engine(&config);

    if !engine.has_backend() {
        println!("(no completion API key configured — answering locally)\n");
    }

    if let Some(message) = message {
        let reply = engine.process_message(&message, language).await?;
        print_reply(&reply);
        return Ok(());
    }

    // Interactive loop
    println!("Foliochat — type a question, or 'exit' to quit.\n");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        match engine.process_message(line, language).await {
            Ok(reply) => print_reply(&reply),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    Ok(())
}

fn print_reply(reply: &foliochat_core::AssistantReply) {
    println!("{}\n", reply.text);
    if !reply.suggestions.is_empty() {
        println!("  suggestions: {}", reply.suggestions.join(" | "));
    }
    println!("  [source: {} | confidence: {:.2}]\n", reply.source, reply.confidence);
}
