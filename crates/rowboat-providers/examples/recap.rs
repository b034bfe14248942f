//! Produce a recap card for a hardcoded conversation.
//!
//! Configure a provider first, e.g.:
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run -p rowboat-providers --example recap
//! ```
//!
//! Without any provider configured the run still succeeds through the
//! rule-based fallback.

use std::sync::Arc;

use rowboat_core::{ConversationMessage, Generator, RecapPipeline};
use rowboat_providers::ProviderRouter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rowboat_core=debug,rowboat_providers=debug".into()),
        )
        .init();

    let generator: Option<Arc<dyn Generator>> = match ProviderRouter::from_env() {
        Ok(router) => {
            tracing::info!(providers = ?router.provider_names(), "router ready");
            Some(Arc::new(router))
        }
        Err(err) => {
            tracing::warn!(error = %err, "running fallback-only");
            None
        }
    };

    let messages = vec![
        ConversationMessage::assistant("How has the week been treating you?"),
        ConversationMessage::user("Honestly, too many deadlines. I can't fit it all in."),
        ConversationMessage::assistant("Which one is weighing the most?"),
        ConversationMessage::user("The launch. I keep putting it off."),
    ];

    let pipeline = RecapPipeline::new(generator);
    let result = pipeline.run(&messages).await;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize result: {err}"),
    }
}
