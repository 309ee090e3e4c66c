//! The fixed DAG: validate → classify → translate → sequential quality
//! gate → parallel fan-out → join → final quality check.
//!
//! There is exactly one shape this graph ever takes — no branch is
//! data-driven beyond "is the target word a verb" (which decides whether
//! `conjugation` joins the parallel fan-out) and "did this step pass its
//! quality gate" (which decides whether the graph continues at all).

use std::sync::Arc;
use std::time::Duration;

use wordweave_llm::{NoopObserver, Provider, UsageObserver};
use wordweave_supervisor::Supervisor;
use wordweave_tools::schema::{
    ClassificationOutput, ConjugationOutput, ExamplesOutput, MediaOutput, PronunciationOutput,
    SyllablesOutput, SynonymsOutput, TranslationOutput, ValidationOutput,
};
use wordweave_tools::ToolRegistry;
use wordweave_types::{Language, QualityField, QualityOutcome, VocabState};

use crate::executor::{GateOutcome, QualityGatedExecutor};
use crate::join::Join;
use crate::GraphError;

/// Default wall-clock budget for one full graph run, past which the run is
/// abandoned rather than left to run unbounded.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);

fn quality_outcome(outcome: &GateOutcome) -> QualityOutcome {
    QualityOutcome {
        approved: outcome.approved,
        score: outcome.score,
        retry_count: outcome.retry_count,
    }
}

/// One parallel branch's contribution to [`VocabState`], carried back from
/// its spawned task so the caller can apply it without sharing `&mut
/// VocabState` across threads.
enum ParallelResult {
    Media(MediaOutput, QualityOutcome),
    Examples(ExamplesOutput, QualityOutcome),
    Synonyms(SynonymsOutput, QualityOutcome),
    SyllablesAndPronunciation(SyllablesOutput, QualityOutcome, PronunciationOutput),
    Conjugation(ConjugationOutput, QualityOutcome),
}

/// Drives a [`VocabState`] through the fixed pipeline DAG.
pub struct Graph<P, O = NoopObserver> {
    executor: QualityGatedExecutor<P, O>,
    supervisor: Arc<Supervisor<P, O>>,
    deadline: Duration,
}

impl<P, O> Clone for Graph<P, O> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            supervisor: Arc::clone(&self.supervisor),
            deadline: self.deadline,
        }
    }
}

impl<P: Provider + Send + Sync + 'static, O: UsageObserver + Send + Sync + 'static> Graph<P, O> {
    /// Build a graph around a shared supervisor and tool registry.
    pub fn new(supervisor: Arc<Supervisor<P, O>>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            executor: QualityGatedExecutor::new(Arc::clone(&supervisor), tools),
            supervisor,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the default wall-clock deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Run the full pipeline to completion, or to whichever terminal
    /// [`GraphError`] the state reaches first.
    pub async fn run(&self, state: VocabState) -> Result<VocabState, GraphError> {
        match tokio::time::timeout(self.deadline, self.run_inner(state)).await {
            Ok(result) => result,
            Err(_) => Err(GraphError::DeadlineExceeded),
        }
    }

    async fn run_inner(&self, mut state: VocabState) -> Result<VocabState, GraphError> {
        self.node_validate_source_word(&mut state).await?;
        self.node_get_classification(&mut state).await?;
        self.node_get_translation(&mut state).await?;
        self.check_sequential_quality(&mut state)?;
        self.coordinate_parallel_tasks(&mut state).await?;
        self.final_quality_check(&mut state);
        Ok(state)
    }

    async fn node_validate_source_word(&self, state: &mut VocabState) -> Result<(), GraphError> {
        let inputs = serde_json::json!({
            "source_word": state.source_word,
            "source_language": state.source_language,
        });
        let outcome = self
            .executor
            .execute_with_quality_gate("validation", inputs)
            .await?;
        state.set_quality(QualityField::Validation, quality_outcome(&outcome));

        let output: ValidationOutput = serde_json::from_value(outcome.value).unwrap_or_else(|_| {
            ValidationOutput::fallback(state.source_language.unwrap_or(Language::English))
        });

        if !output.is_valid {
            state.validation_passed = Some(false);
            state.validation_issue = output.issue_message.clone();
            state.validation_suggestions = output.issue_suggestions.clone();
            return Err(GraphError::ValidationFailed {
                issue: output
                    .issue_message
                    .unwrap_or_else(|| "word failed validation".to_string()),
                suggestions: output.issue_suggestions,
            });
        }

        state.validation_passed = Some(true);
        state.source_language = Some(output.source_language);
        Ok(())
    }

    async fn node_get_classification(&self, state: &mut VocabState) -> Result<(), GraphError> {
        let inputs = serde_json::json!({
            "source_word": state.source_word,
            "source_language": state.source_language,
            "target_language": state.target_language,
        });
        let outcome = self
            .executor
            .execute_with_quality_gate("classification", inputs)
            .await?;
        state.set_quality(QualityField::Classification, quality_outcome(&outcome));

        let output: ClassificationOutput = serde_json::from_value(outcome.value)
            .unwrap_or_else(|_| ClassificationOutput::fallback(&state.source_word));

        state.source_word = output.source_word;
        state.source_definition = Some(output.source_definition);
        state.source_part_of_speech = Some(output.source_part_of_speech);
        state.source_article = output.source_article;
        state.source_additional_info = output.source_additional_info;
        state.word_exists = output.word_exists;
        state.existing_item = output.existing_item.clone();

        if output.word_exists == Some(true) {
            return Err(GraphError::WordExists {
                existing_item: output.existing_item,
            });
        }
        Ok(())
    }

    async fn node_get_translation(&self, state: &mut VocabState) -> Result<(), GraphError> {
        let inputs = serde_json::json!({
            "source_word": state.source_word,
            "source_language": state.source_language,
            "target_language": state.target_language,
            "source_part_of_speech": state.source_part_of_speech,
        });
        let outcome = self
            .executor
            .execute_with_quality_gate("translation", inputs)
            .await?;
        state.set_quality(QualityField::Translation, quality_outcome(&outcome));

        let output: TranslationOutput =
            serde_json::from_value(outcome.value).unwrap_or_else(|_| TranslationOutput::fallback());

        state.target_word = Some(output.target_word);
        state.target_part_of_speech = Some(output.target_part_of_speech);
        state.target_article = output.target_article;
        state.target_additional_info = output.target_additional_info;
        state.target_plural_form = output.target_plural_form;
        state.english_word = Some(output.english_word);
        Ok(())
    }

    /// Mirrors `supervisor_check_sequential_quality`: the three sequential
    /// tools must all have been approved (outright or on final retry)
    /// before the graph commits to the expensive parallel fan-out.
    fn check_sequential_quality(&self, state: &mut VocabState) -> Result<(), GraphError> {
        let required = [
            QualityField::Validation,
            QualityField::Classification,
            QualityField::Translation,
        ];
        let failed: Vec<String> = required
            .iter()
            .filter(|field| {
                !state
                    .quality_outcome(**field)
                    .map(|outcome| outcome.approved)
                    .unwrap_or(false)
            })
            .map(|field| field.tool_name().to_string())
            .collect();

        if failed.is_empty() {
            state.sequential_quality_passed = Some(true);
            Ok(())
        } else {
            state.sequential_quality_passed = Some(false);
            state.failed_quality_steps = failed.clone();
            Err(GraphError::SequentialQualityGateFailed(failed))
        }
    }

    /// Fan out `media`, `examples`, `synonyms`, `syllables` (chained into
    /// `pronunciation`), and `conjugation` (verbs only) concurrently, then
    /// merge every branch's contribution back into `state` once the join
    /// observes completeness.
    async fn coordinate_parallel_tasks(&self, state: &mut VocabState) -> Result<(), GraphError> {
        let target_part_of_speech = state
            .target_part_of_speech
            .expect("node_get_translation sets target_part_of_speech before this runs");
        let tasks = self.supervisor.coordinate_parallel_tasks(target_part_of_speech);
        state.parallel_tasks_to_execute = Some(tasks.clone());

        let join = Arc::new(Join::new(tasks.clone()));
        let is_verb = tasks.iter().any(|t| t == "conjugation");

        let mut handles = Vec::new();

        handles.push(tokio::spawn(Self::run_media(
            self.executor.clone(),
            Arc::clone(&join),
            media_inputs(state),
        )));
        handles.push(tokio::spawn(Self::run_examples(
            self.executor.clone(),
            Arc::clone(&join),
            examples_inputs(state),
        )));
        handles.push(tokio::spawn(Self::run_synonyms(
            self.executor.clone(),
            Arc::clone(&join),
            synonyms_inputs(state),
        )));
        handles.push(tokio::spawn(Self::run_syllables_then_pronunciation(
            self.executor.clone(),
            Arc::clone(&join),
            syllables_inputs(state),
            state.target_word.clone(),
            state.target_language,
        )));
        if is_verb {
            handles.push(tokio::spawn(Self::run_conjugation(
                self.executor.clone(),
                Arc::clone(&join),
                conjugation_inputs(state),
            )));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.expect("parallel branch task panicked")?);
        }

        for result in results {
            match result {
                ParallelResult::Media(output, quality) => {
                    state.set_quality(QualityField::Media, quality);
                    state.media = Some(output.media);
                    state.search_query = Some(output.search_query);
                    state.media_reused = Some(output.media_reused);
                }
                ParallelResult::Examples(output, quality) => {
                    state.set_quality(QualityField::Examples, quality);
                    state.examples = Some(output.examples);
                }
                ParallelResult::Synonyms(output, quality) => {
                    state.set_quality(QualityField::Synonyms, quality);
                    state.synonyms = Some(output.synonyms);
                }
                ParallelResult::SyllablesAndPronunciation(syllables, quality, pronunciation) => {
                    state.set_quality(QualityField::Syllables, quality);
                    state.target_syllables = Some(syllables.syllables);
                    state.target_phonetic_guide = Some(syllables.phonetic_guide);
                    state.pronunciations = Some(pronunciation.pronunciations);
                }
                ParallelResult::Conjugation(output, quality) => {
                    state.set_quality(QualityField::Conjugation, quality);
                    state.conjugation = match output {
                        ConjugationOutput::Table(table) => Some(table),
                        ConjugationOutput::NotAVerb(_) => None,
                    };
                }
            }
        }

        state.mark_parallel_tasks_completed(join.completed().await);
        Ok(())
    }

    async fn run_media(
        executor: QualityGatedExecutor<P, O>,
        join: Arc<Join>,
        inputs: serde_json::Value,
    ) -> Result<ParallelResult, GraphError> {
        let outcome = executor.execute_with_quality_gate("media", inputs).await?;
        let quality = quality_outcome(&outcome);
        let output: MediaOutput =
            serde_json::from_value(outcome.value).unwrap_or_else(|_| MediaOutput::fallback(Vec::new()));
        join.complete("media").await;
        Ok(ParallelResult::Media(output, quality))
    }

    async fn run_examples(
        executor: QualityGatedExecutor<P, O>,
        join: Arc<Join>,
        inputs: serde_json::Value,
    ) -> Result<ParallelResult, GraphError> {
        let outcome = executor.execute_with_quality_gate("examples", inputs).await?;
        let quality = quality_outcome(&outcome);
        let output: ExamplesOutput =
            serde_json::from_value(outcome.value).unwrap_or_else(|_| ExamplesOutput::fallback());
        join.complete("examples").await;
        Ok(ParallelResult::Examples(output, quality))
    }

    async fn run_synonyms(
        executor: QualityGatedExecutor<P, O>,
        join: Arc<Join>,
        inputs: serde_json::Value,
    ) -> Result<ParallelResult, GraphError> {
        let outcome = executor.execute_with_quality_gate("synonyms", inputs).await?;
        let quality = quality_outcome(&outcome);
        let output: SynonymsOutput =
            serde_json::from_value(outcome.value).unwrap_or_else(|_| SynonymsOutput::fallback());
        join.complete("synonyms").await;
        Ok(ParallelResult::Synonyms(output, quality))
    }

    async fn run_conjugation(
        executor: QualityGatedExecutor<P, O>,
        join: Arc<Join>,
        inputs: serde_json::Value,
    ) -> Result<ParallelResult, GraphError> {
        let outcome = executor
            .execute_with_quality_gate("conjugation", inputs)
            .await?;
        let quality = quality_outcome(&outcome);
        let output: ConjugationOutput =
            serde_json::from_value(outcome.value).unwrap_or_else(|_| ConjugationOutput::fallback());
        join.complete("conjugation").await;
        Ok(ParallelResult::Conjugation(output, quality))
    }

    /// Syllables and pronunciation run as one branch of the fan-out:
    /// pronunciation consumes the syllable list, so it must follow
    /// syllables' own quality gate rather than run concurrently with it.
    /// Pronunciation itself is never quality-gated.
    async fn run_syllables_then_pronunciation(
        executor: QualityGatedExecutor<P, O>,
        join: Arc<Join>,
        inputs: serde_json::Value,
        target_word: Option<String>,
        target_language: Language,
    ) -> Result<ParallelResult, GraphError> {
        let outcome = executor.execute_with_quality_gate("syllables", inputs).await?;
        let quality = quality_outcome(&outcome);
        let syllables: SyllablesOutput = serde_json::from_value(outcome.value)
            .unwrap_or_else(|_| SyllablesOutput::fallback(""));
        join.complete("syllables").await;

        let pronunciation_inputs = serde_json::json!({
            "target_word": target_word,
            "target_language": target_language,
            "target_syllables": syllables.syllables,
            "target_phonetic_guide": syllables.phonetic_guide,
        });
        let pronunciation_outcome = executor
            .execute_without_quality_gate("pronunciation", pronunciation_inputs)
            .await?;
        let pronunciation: PronunciationOutput = serde_json::from_value(pronunciation_outcome.value)
            .unwrap_or_else(|_| PronunciationOutput::fallback());
        join.complete("pronunciation").await;

        Ok(ParallelResult::SyllablesAndPronunciation(
            syllables,
            quality,
            pronunciation,
        ))
    }

    /// Mirrors `supervisor_final_quality_check`: aggregate every quality
    /// outcome into a mean score and mark the run complete. This never
    /// fails the graph — by the time it runs, the sequential gate has
    /// already rejected a request that couldn't proceed.
    fn final_quality_check(&self, state: &mut VocabState) {
        let scores: Vec<f64> = state.quality.values().map(|outcome| outcome.score).collect();
        let passed = state.quality.values().filter(|o| o.approved).count();
        let failed = scores.len().saturating_sub(passed);

        state.overall_quality_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };
        state.quality_checks_passed = Some(passed);
        state.quality_checks_failed = Some(failed);
        state.processing_complete = Some(true);
    }
}

fn media_inputs(state: &VocabState) -> serde_json::Value {
    serde_json::json!({
        "source_word": state.source_word,
        "target_word": state.target_word,
        "english_word": state.english_word,
        "source_language": state.source_language,
        "target_language": state.target_language,
        "source_definition": state.source_definition,
        "target_additional_info": state.target_additional_info,
    })
}

fn examples_inputs(state: &VocabState) -> serde_json::Value {
    serde_json::json!({
        "source_word": state.source_word,
        "target_word": state.target_word,
        "source_language": state.source_language,
        "target_language": state.target_language,
        "target_part_of_speech": state.target_part_of_speech,
    })
}

fn synonyms_inputs(state: &VocabState) -> serde_json::Value {
    serde_json::json!({
        "target_word": state.target_word,
        "target_language": state.target_language,
        "target_part_of_speech": state.target_part_of_speech,
    })
}

fn syllables_inputs(state: &VocabState) -> serde_json::Value {
    serde_json::json!({
        "target_word": state.target_word,
        "target_language": state.target_language,
    })
}

fn conjugation_inputs(state: &VocabState) -> serde_json::Value {
    serde_json::json!({
        "target_word": state.target_word,
        "target_language": state.target_language,
    })
}
