//! Runs one intake request through the graph, then persists and notifies,
//! per SPEC_FULL §4.10's "emit `processing_started`; run the graph; emit
//! `processing_completed`/`cache_hit`/`processing_failed`" contract.

use wordweave_graph::{Graph, GraphError};
use wordweave_llm::{Provider, UsageObserver};
use wordweave_notify::Notifier;
use wordweave_store::Store;
use wordweave_types::{VocabState, WordWeaveError};

use crate::intake::IntakeRequest;

/// Outcome of processing one request, for the caller to log/print.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The graph ran to completion and the result was persisted.
    Completed(serde_json::Value),
    /// Classification found this pair already stored; the pipeline did
    /// not re-run translation/enrichment.
    CacheHit(serde_json::Value),
    /// The request failed; `redeliverable` mirrors
    /// [`WordWeaveError::is_redeliverable`] for the caller's queue logic.
    Failed {
        /// Human-readable failure reason.
        message: String,
        /// Whether the upstream queue should redeliver this record.
        redeliverable: bool,
    },
}

/// Run `request` through `graph`, persisting success via `store` and
/// broadcasting progress via `notifier`.
///
/// A `word_exists` short-circuit from classification and a validation
/// failure are both legitimate terminal [`GraphError`]s, not faults — they
/// are reported as `CacheHit`/`Failed` respectively, never propagated as a
/// `Result::Err` from this function. Only a persistence fault after a
/// successful graph run surfaces as `Err`.
pub async fn process_one<P, O>(
    graph: &Graph<P, O>,
    store: &Store,
    notifier: &Notifier,
    request: IntakeRequest,
) -> Outcome
where
    P: Provider + Send + Sync + 'static,
    O: UsageObserver + Send + Sync + 'static,
{
    let IntakeRequest {
        source_word,
        target_language,
        source_language,
        user_id,
        request_id: _,
    } = request;

    notifier.processing_started(&source_word, target_language).await;

    let mut state = VocabState::new(source_word.clone(), target_language);
    state.source_language = source_language;

    match graph.run(state).await {
        Ok(state) => persist_and_complete(store, notifier, &source_word, target_language, state, user_id.as_deref()).await,
        Err(GraphError::WordExists { existing_item }) => {
            let cached = existing_item.unwrap_or(serde_json::Value::Null);
            notifier.cache_hit(&source_word, target_language, cached.clone()).await;
            Outcome::CacheHit(cached)
        }
        Err(GraphError::ValidationFailed { issue, suggestions }) => {
            let message = if suggestions.is_empty() {
                issue
            } else {
                let words: Vec<&str> = suggestions.iter().map(|s| s.word.as_str()).collect();
                format!("{issue} (suggestions: {})", words.join(", "))
            };
            notifier.processing_failed(&source_word, target_language, &message).await;
            Outcome::Failed {
                message,
                redeliverable: false,
            }
        }
        Err(err) => {
            let wordweave_err: WordWeaveError = err.into();
            let redeliverable = wordweave_err.is_redeliverable();
            let message = wordweave_err.to_string();
            notifier.processing_failed(&source_word, target_language, &message).await;
            Outcome::Failed { message, redeliverable }
        }
    }
}

async fn persist_and_complete(
    store: &Store,
    notifier: &Notifier,
    source_word: &str,
    target_language: wordweave_types::Language,
    state: VocabState,
    user_id: Option<&str>,
) -> Outcome {
    let search_query = state.search_query.clone().unwrap_or_default();
    let media_freshly_fetched = state.media_reused == Some(false);

    let item = match wordweave_store::build_item(&state, user_id) {
        Some(item) => item,
        None => {
            let message = "graph completed but state is missing mandatory fields".to_string();
            notifier.processing_failed(source_word, target_language, &message).await;
            return Outcome::Failed {
                message,
                redeliverable: true,
            };
        }
    };

    match store
        .store_result(&item, &search_query, media_freshly_fetched)
        .await
    {
        Ok(()) => {
            notifier
                .processing_completed(source_word, target_language, item.clone())
                .await;
            Outcome::Completed(item)
        }
        Err(err) => {
            let message = format!("persistence fault: {err}");
            notifier.processing_failed(source_word, target_language, &message).await;
            Outcome::Failed {
                message,
                redeliverable: true,
            }
        }
    }
}
