//! Chat with the configured provider.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use quizmaster_core::error::CHAT_FAILURE_MESSAGE;
use quizmaster_core::traits::{ChatProvider, ChatRequest, DEFAULT_SYSTEM_PROMPT};
use quizmaster_providers::{create_provider, load_config_from};

pub async fn execute(message: Vec<String>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let provider_config = config.providers.get(&config.default_provider).ok_or_else(|| {
        anyhow::anyhow!(
            "no '{}' provider configured; run `quizmaster init` and add an API key",
            config.default_provider
        )
    })?;
    let provider = create_provider(provider_config);
    tracing::info!(provider = provider.name(), model = %config.default_model, "chat ready");

    let ask = |message: String| ChatRequest {
        model: config.default_model.clone(),
        message,
        system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        max_tokens: config.max_tokens,
        temperature: config.default_temperature,
    };

    if !message.is_empty() {
        let request = ask(message.join(" "));
        reply(provider.complete(&request).await);
        return Ok(());
    }

    // Interactive loop until EOF or an empty line.
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() || line == "quit" {
            break;
        }
        reply(provider.complete(&ask(line)).await);
    }
    Ok(())
}

/// Print the reply, or the fixed apology the quiz UI always shows on chat
/// failure. The underlying error only reaches the log.
fn reply(result: anyhow::Result<quizmaster_core::traits::ChatResponse>) {
    match result {
        Ok(response) => {
            tracing::debug!(model = %response.model, latency_ms = response.latency_ms, "chat reply");
            println!("{}", response.content);
        }
        Err(e) => {
            tracing::warn!("chat request failed: {e:#}");
            println!("{CHAT_FAILURE_MESSAGE}");
        }
    }
}
