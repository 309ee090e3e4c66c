//! The mutable state record threaded through the graph engine.
//!
//! Nodes never mutate [`VocabState`] directly — they return a [`StatePatch`]
//! that [`VocabState::merge`] folds in. Scalars are last-writer-wins;
//! `completed_parallel_tasks` is set-union, per the associative merge
//! contract the graph engine relies on for out-of-order branch completion.

use crate::language::Language;
use crate::part_of_speech::PartOfSpeech;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A suggested alternative word from the validation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedWord {
    /// The suggested word.
    pub word: String,
    /// The language the suggestion is in.
    pub language: Language,
}

/// A synonym with a short explanation of how it differs in nuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synonym {
    /// The synonym itself.
    pub synonym: String,
    /// Explanation of nuance or usage difference.
    pub explanation: String,
}

/// One example sentence pairing source and target language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSentence {
    /// The sentence in the source language.
    pub original: String,
    /// The sentence translated into the target language.
    pub translation: String,
    /// Optional usage context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// The stored image variants for a piece of media, keyed by size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoSrc {
    /// 2x-density large variant URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large2x: Option<String>,
    /// Large variant URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    /// Medium variant URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

/// A representative image for a word, with learner-facing framing text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Canonical source URL for the image.
    pub url: String,
    /// Alt text, in the source language.
    pub alt: String,
    /// Stored variants.
    pub src: PhotoSrc,
    /// Why this image was chosen, in the source language.
    pub explanation: String,
    /// A mnemonic tip tying the image to the word, in the source language.
    pub memory_tip: String,
}

/// Pronunciation audio URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pronunciations {
    /// URL (or `ERROR: ...` marker) for the whole-word pronunciation.
    pub audio: String,
    /// URL for the syllable-by-syllable pronunciation, if more than one syllable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllables: Option<String>,
}

/// Which per-tool quality gate a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityField {
    /// The validation tool.
    Validation,
    /// The classification tool.
    Classification,
    /// The translation tool.
    Translation,
    /// The synonyms tool.
    Synonyms,
    /// The examples tool.
    Examples,
    /// The syllables tool.
    Syllables,
    /// The conjugation tool.
    Conjugation,
    /// The media tool.
    Media,
}

impl QualityField {
    /// The tool name as used in prompts, logs, and state field names.
    pub fn tool_name(self) -> &'static str {
        match self {
            QualityField::Validation => "validation",
            QualityField::Classification => "classification",
            QualityField::Translation => "translation",
            QualityField::Synonyms => "synonyms",
            QualityField::Examples => "examples",
            QualityField::Syllables => "syllables",
            QualityField::Conjugation => "conjugation",
            QualityField::Media => "media",
        }
    }

    /// All eight quality-gated tools, in a stable order.
    pub fn all() -> [QualityField; 8] {
        [
            QualityField::Validation,
            QualityField::Classification,
            QualityField::Translation,
            QualityField::Synonyms,
            QualityField::Examples,
            QualityField::Syllables,
            QualityField::Conjugation,
            QualityField::Media,
        ]
    }
}

/// Outcome of a single quality-gate evaluation for one tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityOutcome {
    /// Whether the supervisor approved this tool's output.
    pub approved: bool,
    /// The score the supervisor assigned, in `[0, 10]`.
    pub score: f64,
    /// How many times this tool has been retried.
    pub retry_count: u32,
}

/// The shared state record driven through the graph, one per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabState {
    // Inputs
    /// The word as given by the caller.
    pub source_word: String,
    /// The language to translate into.
    pub target_language: Language,
    /// The language of `source_word`, if known up front.
    pub source_language: Option<Language>,

    // Validation
    /// Whether the source word passed validation.
    pub validation_passed: Option<bool>,
    /// Explanation of a validation failure.
    pub validation_issue: Option<String>,
    /// Suggested alternatives when validation fails.
    pub validation_suggestions: Vec<SuggestedWord>,

    // Classification
    /// Definitions of the source word, in its own language.
    pub source_definition: Option<Vec<String>>,
    /// Part of speech of the source word.
    pub source_part_of_speech: Option<PartOfSpeech>,
    /// Grammatical article of the source word, if it is a noun.
    pub source_article: Option<String>,
    /// Free-text notes surfaced by classification.
    pub source_additional_info: Option<String>,
    /// Whether this (word, language pair) already exists in storage.
    pub word_exists: Option<bool>,
    /// The previously stored artifact, if `word_exists`.
    pub existing_item: Option<serde_json::Value>,

    // Translation
    /// The translated word, base form.
    pub target_word: Option<String>,
    /// Part of speech of the translated word.
    pub target_part_of_speech: Option<PartOfSpeech>,
    /// Grammatical article of the translated word, if it is a noun.
    pub target_article: Option<String>,
    /// Free-text notes surfaced by translation.
    pub target_additional_info: Option<String>,
    /// Plural form of the translated word, if applicable.
    pub target_plural_form: Option<String>,
    /// English rendering of the target word, used as the media lookup key.
    pub english_word: Option<String>,

    // Enrichment
    /// Syllable breakdown of the target word.
    pub target_syllables: Option<Vec<String>>,
    /// ASCII phonetic guide for the target word.
    pub target_phonetic_guide: Option<String>,
    /// Synonyms of the target word.
    pub synonyms: Option<Vec<Synonym>>,
    /// Example sentences using the target word.
    pub examples: Option<Vec<ExampleSentence>>,
    /// Conjugation table, present iff the target is a verb.
    pub conjugation: Option<serde_json::Value>,
    /// Pronunciation audio URLs.
    pub pronunciations: Option<Pronunciations>,
    /// Representative image for the word.
    pub media: Option<Media>,
    /// English search terms used to find `media`.
    pub search_query: Option<Vec<String>>,
    /// Whether `media` was reused from an existing entry rather than freshly fetched.
    pub media_reused: Option<bool>,

    // Quality gates
    /// Per-tool quality gate outcomes, keyed by tool.
    pub quality: std::collections::HashMap<QualityField, QualityOutcome>,

    // Orchestration
    /// Whether the sequential prefix (validation/classification/translation) passed its gates.
    pub sequential_quality_passed: Option<bool>,
    /// Which sequential steps failed their quality gate, if any.
    pub failed_quality_steps: Vec<String>,
    /// The parallel tasks the supervisor decided to run.
    pub parallel_tasks_to_execute: Option<Vec<String>>,
    /// Parallel tasks that have reported completion so far.
    pub completed_parallel_tasks: BTreeSet<String>,
    /// Whether every task in `parallel_tasks_to_execute` has completed.
    pub parallel_tasks_complete: Option<bool>,
    /// Mean quality score across approved tools.
    pub overall_quality_score: Option<f64>,
    /// Count of quality gates that passed.
    pub quality_checks_passed: Option<usize>,
    /// Count of quality gates that failed.
    pub quality_checks_failed: Option<usize>,
    /// Whether the whole pipeline has reached its terminal state.
    pub processing_complete: Option<bool>,
}

impl VocabState {
    /// Create a fresh state for a new request.
    pub fn new(source_word: impl Into<String>, target_language: Language) -> Self {
        Self {
            source_word: source_word.into(),
            target_language,
            source_language: None,
            validation_passed: None,
            validation_issue: None,
            validation_suggestions: Vec::new(),
            source_definition: None,
            source_part_of_speech: None,
            source_article: None,
            source_additional_info: None,
            word_exists: None,
            existing_item: None,
            target_word: None,
            target_part_of_speech: None,
            target_article: None,
            target_additional_info: None,
            target_plural_form: None,
            english_word: None,
            target_syllables: None,
            target_phonetic_guide: None,
            synonyms: None,
            examples: None,
            conjugation: None,
            pronunciations: None,
            media: None,
            search_query: None,
            media_reused: None,
            quality: std::collections::HashMap::new(),
            sequential_quality_passed: None,
            failed_quality_steps: Vec::new(),
            parallel_tasks_to_execute: None,
            completed_parallel_tasks: BTreeSet::new(),
            parallel_tasks_complete: None,
            overall_quality_score: None,
            quality_checks_passed: None,
            quality_checks_failed: None,
            processing_complete: None,
        }
    }

    /// The retry count recorded so far for the given tool.
    pub fn retry_count(&self, field: QualityField) -> u32 {
        self.quality.get(&field).map(|o| o.retry_count).unwrap_or(0)
    }

    /// The quality outcome recorded for the given tool, if any.
    pub fn quality_outcome(&self, field: QualityField) -> Option<QualityOutcome> {
        self.quality.get(&field).copied()
    }

    /// Record a quality outcome for the given tool, overwriting any prior one.
    pub fn set_quality(&mut self, field: QualityField, outcome: QualityOutcome) {
        self.quality.insert(field, outcome);
    }

    /// Union `newly_completed` into `completed_parallel_tasks` and refresh
    /// `parallel_tasks_complete` against `parallel_tasks_to_execute`.
    ///
    /// Associative and commutative: applying the same completion twice, or
    /// applying two completions in either order, reaches the same state.
    pub fn mark_parallel_tasks_completed<I>(&mut self, newly_completed: I)
    where
        I: IntoIterator<Item = String>,
    {
        for task in newly_completed {
            self.completed_parallel_tasks.insert(task);
        }
        if let Some(expected) = &self.parallel_tasks_to_execute {
            let expected: BTreeSet<String> = expected.iter().cloned().collect();
            self.parallel_tasks_complete = Some(self.completed_parallel_tasks.is_superset(&expected));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> VocabState {
        VocabState::new("construir", Language::Spanish)
    }

    #[test]
    fn new_state_has_no_quality_outcomes() {
        let state = fresh();
        assert!(state.quality_outcome(QualityField::Validation).is_none());
        assert_eq!(state.retry_count(QualityField::Translation), 0);
    }

    #[test]
    fn parallel_completion_is_commutative() {
        let mut a = fresh();
        a.parallel_tasks_to_execute = Some(vec!["media".into(), "examples".into()]);
        a.mark_parallel_tasks_completed(["media".to_string()]);
        a.mark_parallel_tasks_completed(["examples".to_string()]);

        let mut b = fresh();
        b.parallel_tasks_to_execute = Some(vec!["media".into(), "examples".into()]);
        b.mark_parallel_tasks_completed(["examples".to_string()]);
        b.mark_parallel_tasks_completed(["media".to_string()]);

        assert_eq!(a.completed_parallel_tasks, b.completed_parallel_tasks);
        assert_eq!(a.parallel_tasks_complete, Some(true));
        assert_eq!(b.parallel_tasks_complete, Some(true));
    }

    #[test]
    fn completion_is_idempotent() {
        let mut state = fresh();
        state.parallel_tasks_to_execute = Some(vec!["media".into()]);
        state.mark_parallel_tasks_completed(["media".to_string()]);
        state.mark_parallel_tasks_completed(["media".to_string()]);
        assert_eq!(state.completed_parallel_tasks.len(), 1);
        assert_eq!(state.parallel_tasks_complete, Some(true));
    }

    #[test]
    fn incomplete_until_superset() {
        let mut state = fresh();
        state.parallel_tasks_to_execute =
            Some(vec!["media".into(), "examples".into(), "synonyms".into()]);
        state.mark_parallel_tasks_completed(["media".to_string()]);
        assert_eq!(state.parallel_tasks_complete, Some(false));
    }
}
