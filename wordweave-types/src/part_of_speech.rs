//! Parts of speech with the metadata the pipeline's tools rely on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical category a [`PartOfSpeech`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Noun (any gender).
    Noun,
    /// Verb.
    Verb,
    /// Adjective.
    Adjective,
    /// Adverb.
    Adverb,
    /// Preposition.
    Preposition,
    /// Conjunction.
    Conjunction,
    /// Pronoun.
    Pronoun,
    /// Article.
    Article,
    /// Interjection.
    Interjection,
}

/// Part of speech, closed to the set the source corpus classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    /// Feminine noun.
    #[serde(rename = "feminine noun")]
    FeminineNoun,
    /// Masculine noun.
    #[serde(rename = "masculine noun")]
    MasculineNoun,
    /// Neuter noun.
    #[serde(rename = "neuter noun")]
    NeuterNoun,
    /// Verb.
    Verb,
    /// Adjective.
    Adjective,
    /// Adverb.
    Adverb,
    /// Preposition.
    Preposition,
    /// Conjunction.
    Conjunction,
    /// Pronoun.
    Pronoun,
    /// Article.
    Article,
    /// Interjection.
    Interjection,
}

impl PartOfSpeech {
    /// General grammatical category.
    pub fn category(self) -> Category {
        match self {
            PartOfSpeech::FeminineNoun | PartOfSpeech::MasculineNoun | PartOfSpeech::NeuterNoun => {
                Category::Noun
            }
            PartOfSpeech::Verb => Category::Verb,
            PartOfSpeech::Adjective => Category::Adjective,
            PartOfSpeech::Adverb => Category::Adverb,
            PartOfSpeech::Preposition => Category::Preposition,
            PartOfSpeech::Conjunction => Category::Conjunction,
            PartOfSpeech::Pronoun => Category::Pronoun,
            PartOfSpeech::Article => Category::Article,
            PartOfSpeech::Interjection => Category::Interjection,
        }
    }

    /// Whether this part of speech carries grammatical gender.
    pub fn has_gender(self) -> bool {
        matches!(
            self,
            PartOfSpeech::FeminineNoun
                | PartOfSpeech::MasculineNoun
                | PartOfSpeech::NeuterNoun
                | PartOfSpeech::Adjective
                | PartOfSpeech::Article
        )
    }

    /// Whether this part of speech can be conjugated. True only for verbs.
    pub fn is_conjugatable(self) -> bool {
        matches!(self, PartOfSpeech::Verb)
    }

    /// Whether this part of speech can be declined.
    pub fn is_declinable(self) -> bool {
        matches!(
            self.category(),
            Category::Noun | Category::Adjective | Category::Pronoun | Category::Article
        )
    }

    /// The noun-collapsed form used for persistence sort keys: gendered
    /// nouns collapse to the single category name `"noun"`.
    pub fn sk_component(self) -> &'static str {
        match self.category() {
            Category::Noun => "noun",
            Category::Verb => "verb",
            Category::Adjective => "adjective",
            Category::Adverb => "adverb",
            Category::Preposition => "preposition",
            Category::Conjunction => "conjunction",
            Category::Pronoun => "pronoun",
            Category::Article => "article",
            Category::Interjection => "interjection",
        }
    }

    /// Canonical lower-case string, matching the reference corpus's enum values.
    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::FeminineNoun => "feminine noun",
            PartOfSpeech::MasculineNoun => "masculine noun",
            PartOfSpeech::NeuterNoun => "neuter noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Article => "article",
            PartOfSpeech::Interjection => "interjection",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
