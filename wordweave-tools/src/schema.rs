//! Typed input/output contracts for each of the nine pipeline tools.
//!
//! Each type pairs with a fixed fallback constructor, grounded in the
//! reference tool modules: a fallback is always structurally valid, with
//! an `ERROR: ...` marker string standing in for the field a caller would
//! otherwise read as the tool's primary output.

use serde::{Deserialize, Serialize};
use wordweave_types::{ExampleSentence, Language, Media, PartOfSpeech, Pronunciations, SuggestedWord, Synonym};

/// Input to the validation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationInput {
    /// The word as given by the caller.
    pub source_word: String,
    /// The source language, if known.
    pub source_language: Option<Language>,
}

/// Output of the validation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    /// Whether the word is a real, well-formed word.
    pub is_valid: bool,
    /// The detected source language.
    pub source_language: Language,
    /// Explanation of why the word failed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_message: Option<String>,
    /// Up to three suggested alternative words.
    #[serde(default)]
    pub issue_suggestions: Vec<SuggestedWord>,
}

impl ValidationOutput {
    /// Fixed fallback: treats the word as invalid with an error marker,
    /// so the graph terminates early rather than persisting garbage.
    pub fn fallback(source_language: Language) -> Self {
        Self {
            is_valid: false,
            source_language,
            issue_message: Some("ERROR: validation tool failed".to_string()),
            issue_suggestions: Vec::new(),
        }
    }
}

/// Output of the classification tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationOutput {
    /// The source word's base (dictionary) form.
    pub source_word: String,
    /// One to three definitions, in the source language.
    pub source_definition: Vec<String>,
    /// Part of speech of the source word.
    pub source_part_of_speech: PartOfSpeech,
    /// Grammatical article, if the source word is a noun.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_article: Option<String>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_additional_info: Option<String>,
    /// Populated after the existence check runs against storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_exists: Option<bool>,
    /// The previously stored artifact, if `word_exists`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_item: Option<serde_json::Value>,
}

impl ClassificationOutput {
    /// Fixed fallback carrying an error marker in `source_definition`.
    pub fn fallback(source_word: &str) -> Self {
        Self {
            source_word: source_word.to_string(),
            source_definition: vec!["ERROR: classification tool failed".to_string()],
            source_part_of_speech: PartOfSpeech::MasculineNoun,
            source_article: None,
            source_additional_info: None,
            word_exists: None,
            existing_item: None,
        }
    }
}

/// Output of the translation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOutput {
    /// The translated word's base (dictionary) form.
    pub target_word: String,
    /// Part of speech of the translated word.
    pub target_part_of_speech: PartOfSpeech,
    /// Grammatical article, if the target word is a noun.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_article: Option<String>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_additional_info: Option<String>,
    /// Plural form, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_plural_form: Option<String>,
    /// English rendering of the target word, used as the media search key.
    pub english_word: String,
}

impl TranslationOutput {
    /// Fixed fallback carrying an error marker in `english_word`.
    pub fn fallback() -> Self {
        Self {
            target_word: "ERROR".to_string(),
            target_part_of_speech: PartOfSpeech::MasculineNoun,
            target_article: None,
            target_additional_info: None,
            target_plural_form: None,
            english_word: "ERROR: translation tool failed".to_string(),
        }
    }
}

/// Output of the synonyms tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynonymsOutput {
    /// Note explaining why there are few or no synonyms, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Zero to three synonyms.
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
}

impl SynonymsOutput {
    /// Fixed fallback: no synonyms, with an explanatory note.
    pub fn fallback() -> Self {
        Self {
            note: Some("ERROR: synonyms tool failed".to_string()),
            synonyms: Vec::new(),
        }
    }
}

/// Output of the examples tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesOutput {
    /// Two to three example sentences, each at least 20 characters.
    pub examples: Vec<ExampleSentence>,
}

impl ExamplesOutput {
    /// Fixed fallback: a single placeholder example carrying the error marker.
    pub fn fallback() -> Self {
        Self {
            examples: vec![ExampleSentence {
                original: "ERROR: examples tool failed".to_string(),
                translation: "ERROR: examples tool failed".to_string(),
                context: None,
            }],
        }
    }
}

/// Output of the syllables tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllablesOutput {
    /// The word broken into syllables.
    pub syllables: Vec<String>,
    /// ASCII phonetic guide (no IPA).
    pub phonetic_guide: String,
}

impl SyllablesOutput {
    /// Fixed fallback: the whole word as a single syllable.
    pub fn fallback(target_word: &str) -> Self {
        Self {
            syllables: vec![target_word.to_string()],
            phonetic_guide: "ERROR: syllables tool failed".to_string(),
        }
    }
}

/// Output of the conjugation tool. Verbs only; present as an opaque,
/// language-specific table since each language's tense/mood axes differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConjugationOutput {
    /// A conjugation table, keyed by tense/mood as the source language defines.
    Table(serde_json::Value),
    /// Sentinel for non-verbs: always scored 10 by the quality gate.
    NotAVerb(String),
}

impl ConjugationOutput {
    /// Fixed sentinel for words that are not verbs.
    pub fn not_a_verb() -> Self {
        ConjugationOutput::NotAVerb("not a verb".to_string())
    }

    /// Fixed fallback carrying an error marker.
    pub fn fallback() -> Self {
        ConjugationOutput::NotAVerb("ERROR: conjugation tool failed".to_string())
    }
}

/// First phase of the media tool: English search terms to query Pexels (or
/// the GSI reuse index) with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSearchQuery {
    /// English search terms, broadest first.
    pub search_query: Vec<String>,
}

/// Second phase of the media tool: the chosen image plus learner framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaOutput {
    /// The chosen image and its stored variants.
    pub media: Media,
    /// The search terms that found it.
    pub search_query: Vec<String>,
    /// Whether `media` was reused from an existing entry.
    pub media_reused: bool,
}

impl MediaOutput {
    /// Fixed fallback: a marker image with empty variant URLs.
    pub fn fallback(search_query: Vec<String>) -> Self {
        Self {
            media: Media {
                url: "ERROR: media tool failed".to_string(),
                alt: String::new(),
                src: Default::default(),
                explanation: String::new(),
                memory_tip: String::new(),
            },
            search_query,
            media_reused: false,
        }
    }
}

/// Output of the pronunciation tool. Not quality-gated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronunciationOutput {
    /// Pronunciation audio URLs.
    #[serde(flatten)]
    pub pronunciations: Pronunciations,
}

impl PronunciationOutput {
    /// Fixed fallback: error markers in place of audio URLs.
    pub fn fallback() -> Self {
        Self {
            pronunciations: Pronunciations {
                audio: "ERROR: pronunciation tool failed".to_string(),
                syllables: None,
            },
        }
    }
}
