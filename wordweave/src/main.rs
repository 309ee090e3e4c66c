//! CLI entrypoint: reads one request as JSON from stdin, runs it through
//! the full pipeline, and prints the outcome.
//!
//! There is no Lambda (or other FaaS) runtime anywhere in this workspace's
//! dependency tree, so this binary is a plain process rather than a
//! handler shim — `wordweave::pipeline::process_one` is the reusable
//! entrypoint a real deployment would wrap in whatever transport it needs.

use std::io::Read;
use std::sync::Arc;

use wordweave::config::Config;
use wordweave::intake;
use wordweave::observer::DynObserver;
use wordweave::pipeline::{self, Outcome};
use wordweave::wiring::{self, ToolDeps};

use wordweave_llm::Provider;
use wordweave_llm_anthropic::Anthropic;
use wordweave_llm_ollama::Ollama;
use wordweave_llm_openai::OpenAi;
use wordweave_media::Blobs;
use wordweave_notify::{ConnectionRegistry, Notifier};
use wordweave_store::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "request processing failed");
        eprintln!("wordweave error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;
    let request = intake::parse_and_validate(body.trim())?;

    let store = Arc::new(Store::from_env(config.vocab_table_name.clone()).await);
    let blobs = Blobs::from_env(config.media_bucket_name.clone()).await;
    let registry = ConnectionRegistry::from_env(config.connections_table_name.clone()).await;
    let api_gateway = Notifier::api_gateway_client(&config.websocket_api_endpoint).await;
    let notifier = Notifier::new(
        registry,
        api_gateway,
        request.user_id.clone(),
        request.request_id.clone(),
    );

    let deps = ToolDeps {
        store: Arc::clone(&store),
        blobs,
        pexels_api_key: config.pexels_api_key.clone(),
        tts_api_key: config.tts_api_key.clone(),
    };
    let observer = DynObserver::from_flag(config.tracing_enabled);
    let supervisor_config = config.supervisor_config();
    let deadline = config.processing_timeout();

    let outcome = match config.llm_provider {
        wordweave::config::LlmProviderKind::Anthropic => {
            let provider = Anthropic::new(
                config.llm_api_key.clone(),
                config.llm_executor_model.clone(),
                config.llm_supervisor_model.clone(),
            );
            run_with_provider(provider, observer, supervisor_config, deadline, &deps, &store, &notifier, request).await
        }
        wordweave::config::LlmProviderKind::OpenAi => {
            let provider = OpenAi::new(
                config.llm_api_key.clone(),
                config.llm_executor_model.clone(),
                config.llm_supervisor_model.clone(),
            );
            run_with_provider(provider, observer, supervisor_config, deadline, &deps, &store, &notifier, request).await
        }
        wordweave::config::LlmProviderKind::Ollama => {
            let provider = Ollama::new(config.llm_executor_model.clone(), config.llm_supervisor_model.clone());
            run_with_provider(provider, observer, supervisor_config, deadline, &deps, &store, &notifier, request).await
        }
    };

    match outcome {
        Outcome::Completed(item) => {
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(())
        }
        Outcome::CacheHit(item) => {
            println!("{}", serde_json::to_string_pretty(&item)?);
            Ok(())
        }
        Outcome::Failed { message, redeliverable } => {
            eprintln!("processing failed (redeliverable={redeliverable}): {message}");
            std::process::exit(if redeliverable { 2 } else { 1 });
        }
    }
}

async fn run_with_provider<P>(
    provider: P,
    observer: DynObserver,
    supervisor_config: wordweave_supervisor::SupervisorConfig,
    deadline: std::time::Duration,
    deps: &ToolDeps,
    store: &Store,
    notifier: &Notifier,
    request: intake::IntakeRequest,
) -> Outcome
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let graph = wiring::build_graph(provider, observer, supervisor_config, deadline, deps);
    pipeline::process_one(&graph, store, notifier, request).await
}
