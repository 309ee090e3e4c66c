//! Wiring: builds the tool registry, supervisor, and graph for a single
//! concrete LLM provider type. Generic over `P` rather than `dyn Provider`
//! — `wordweave_llm::Provider` uses `impl Future` return-position impl
//! trait in its method signature, which is not `dyn`-compatible, so the
//! binary picks one concrete provider type at startup (see
//! [`crate::config::LlmProviderKind`]) and calls this generic helper.

use std::sync::Arc;

use wordweave_audio::{PronunciationTool, Synthesizer};
use wordweave_graph::Graph;
use wordweave_llm::{Gateway, Provider};
use wordweave_media::{Blobs, MediaTool};
use wordweave_store::Store;
use wordweave_supervisor::{Supervisor, SupervisorConfig};
use wordweave_tools::ToolRegistry;
use wordweave_tools_llm::{
    ClassificationTool, ConjugationTool, ExamplesTool, SynonymsTool, SyllablesTool, TranslationTool,
    ValidationTool,
};

use crate::observer::DynObserver;

/// Everything needed to construct the tool registry, beyond the provider
/// and observer: the shared store, blob client, and third-party API keys.
pub struct ToolDeps {
    /// Shared persistence/dedup client.
    pub store: Arc<Store>,
    /// Shared S3 blob client.
    pub blobs: Blobs,
    /// Pexels API key for the media tool's photo search.
    pub pexels_api_key: String,
    /// ElevenLabs API key for the pronunciation tool's synthesis.
    pub tts_api_key: String,
}

/// Build the nine-tool registry around one provider, cloned once per tool
/// (providers and [`DynObserver`] are both cheap to clone — an `Arc`-backed
/// HTTP client and a couple of `String`s).
pub fn build_tool_registry<P>(provider: &P, observer: &DynObserver, deps: &ToolDeps) -> ToolRegistry
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let gateway = || Gateway::with_observer(provider.clone(), observer.clone());

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ValidationTool::new(gateway())));
    registry.register(Arc::new(ClassificationTool::new(gateway(), Arc::clone(&deps.store))));
    registry.register(Arc::new(TranslationTool::new(gateway())));
    registry.register(Arc::new(SynonymsTool::new(gateway())));
    registry.register(Arc::new(ExamplesTool::new(gateway())));
    registry.register(Arc::new(SyllablesTool::new(gateway())));
    registry.register(Arc::new(ConjugationTool::new(gateway())));
    registry.register(Arc::new(MediaTool::new(
        gateway(),
        Arc::clone(&deps.store),
        deps.blobs.clone(),
        deps.pexels_api_key.clone(),
    )));
    registry.register(Arc::new(PronunciationTool::new(
        Synthesizer::new(deps.tts_api_key.clone()),
        deps.blobs.clone(),
    )));
    registry
}

/// Build the supervisor and graph around one provider.
pub fn build_graph<P>(
    provider: P,
    observer: DynObserver,
    supervisor_config: SupervisorConfig,
    deadline: std::time::Duration,
    deps: &ToolDeps,
) -> Graph<P, DynObserver>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let tools = Arc::new(build_tool_registry(&provider, &observer, deps));
    let supervisor = Arc::new(Supervisor::with_gateway(
        Gateway::with_observer(provider, observer),
        supervisor_config,
    ));
    Graph::new(supervisor, tools).with_deadline(deadline)
}
