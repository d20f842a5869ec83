//! maeum terminal chat entry point.
//!
//! Startup order:
//! 1. Load [`Config`] from `MAEUM_*` environment variables.
//! 2. Initialize `tracing` (text or JSON, filter from `MAEUM_LOG`).
//! 3. Build the classifier and generator adapters and the turn pipeline.
//! 4. Run the read-eval loop until `:quit` or end of input.
//!
//! In-chat commands:
//! - `:history` prints the session transcript so far.
//! - `:clear` ends the session and starts a fresh one.
//! - `:quit` ends the session.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use maeum_core::{
    ChatMessage, ChatRole, Config, CounselPipeline, HfClassifier, OpenAiGenerator,
    PromptComposer, SessionHistory,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|e| {
            eprintln!("invalid log filter ({e}), falling back to info");
            EnvFilter::new("info")
        });
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if cfg.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    init_tracing(&cfg);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        classifier = %cfg.classifier_model,
        generator = %cfg.generator_model,
        "starting maeum chat"
    );
    if cfg.generator_api_key.is_none() {
        warn!("no generator API key set; replies will fail until MAEUM_OPENAI_API_KEY is provided");
    }

    let classifier = Arc::new(
        HfClassifier::new(
            &cfg.classifier_endpoint,
            &cfg.classifier_model,
            cfg.classifier_token.clone(),
            cfg.http_timeout(),
        )
        .context("building classifier client")?,
    );
    let generator = Arc::new(
        OpenAiGenerator::new(
            &cfg.generator_base_url,
            cfg.generator_api_key.clone().unwrap_or_default(),
            cfg.generator_model.clone(),
            cfg.http_timeout(),
        )
        .context("building generator client")?,
    );
    let pipeline = CounselPipeline::new(
        classifier,
        generator,
        PromptComposer::new(cfg.persona.clone(), cfg.confidence_threshold, cfg.temperature),
    )
    .with_max_retries(cfg.max_retries);

    let mut history = SessionHistory::with_greeting(cfg.greeting.clone());
    println!("마음> {}", cfg.greeting);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("나> ");
        std::io::stdout().flush().context("flushing prompt")?;
        let Some(line) = lines.next_line().await.context("reading input")? else {
            break;
        };
        match line.trim() {
            ":quit" => break,
            ":history" => {
                for message in history.all() {
                    match message.role {
                        ChatRole::User => println!("나> {}", message.content),
                        ChatRole::Bot => println!("마음> {}", message.content),
                    }
                }
            }
            ":clear" => {
                info!(messages = history.len(), "session cleared");
                history.clear();
                history.append(ChatMessage::bot(cfg.greeting.clone()));
                println!("마음> {}", cfg.greeting);
            }
            _ => match pipeline.handle_message(&mut history, &line).await {
                Ok(outcome) => println!("마음> {}", outcome.reply),
                Err(e) => println!("안내> {}", e.user_notice()),
            },
        }
    }

    info!(messages = history.len(), "session ended");
    println!("마음> 오늘 이야기 나눠 주셔서 고마워요. 언제든 다시 찾아 주세요.");
    Ok(())
}
