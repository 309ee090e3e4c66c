//! Primary-key construction and item assembly for a completed [`VocabState`].

use wordweave_types::{normalize_word, Language, PartOfSpeech, VocabState};

/// `SRC#{src_lang}#{norm(source_word)}` — the partition key every row for a
/// source word shares, regardless of target language or part of speech.
pub fn source_partition_key(source_language: Language, source_word: &str) -> String {
    format!("SRC#{}#{}", source_language.code(), normalize_word(source_word))
}

/// `TGT#{tgt_lang}#POS#{pos}` — the sort key, with noun genders collapsed
/// to the bare `noun` category (via [`PartOfSpeech::sk_component`]) so
/// `das Haus`/`el perro` share one entry shape regardless of grammatical
/// gender.
pub fn target_sort_key(target_language: Language, source_pos: PartOfSpeech) -> String {
    format!("TGT#{}#POS#{}", target_language.code(), source_pos.sk_component())
}

/// `LKP#{tgt_lang}#{norm(target_word)}` — reverse-lookup key (GSI-1).
pub fn reverse_lookup_key(target_language: Language, target_word: &str) -> String {
    format!("LKP#{}#{}", target_language.code(), normalize_word(target_word))
}

/// Build the primary item for a completed, quality-approved state.
///
/// Returns `None` if any of the mandatory fields the reference's
/// `store_result` requires (`source_language`, `target_word`,
/// `source_part_of_speech`) are missing — that indicates the graph did not
/// actually reach completion, a caller bug rather than a runtime condition
/// worth a typed error.
pub fn build_item(state: &VocabState, user_id: Option<&str>) -> Option<serde_json::Value> {
    let source_language = state.source_language?;
    let target_word = state.target_word.as_ref()?;
    let source_pos = state.source_part_of_speech?;

    let pk = source_partition_key(source_language, &state.source_word);
    let sk = target_sort_key(state.target_language, source_pos);

    Some(serde_json::json!({
        "PK": pk,
        "SK": sk,
        "source_word": state.source_word,
        "source_language": source_language.code(),
        "source_article": state.source_article,
        "source_pos": source_pos.as_str(),
        "source_definition": state.source_definition,
        "target_word": target_word,
        "target_language": state.target_language.code(),
        "target_pos": state.target_part_of_speech.map(|p| p.as_str()),
        "target_article": state.target_article,
        "source_additional_info": state.source_additional_info,
        "target_additional_info": state.target_additional_info,
        "target_syllables": state.target_syllables,
        "target_phonetic_guide": state.target_phonetic_guide,
        "synonyms": state.synonyms,
        "examples": state.examples,
        "conjugation_table": state.conjugation,
        "pronunciations": state.pronunciations,
        "media": state.media,
        "LKP": reverse_lookup_key(state.target_language, target_word),
        "SRC_LANG": format!("SRC#{}", source_language.code()),
        "english_word": state.english_word.as_deref().map(normalize_word).unwrap_or_default(),
        "schema_version": 1,
        "created_by": user_id.unwrap_or("anonymous"),
    }))
}

/// Normalized search terms a freshly-fetched media result should be
/// indexed under for future reuse.
pub fn normalized_search_words(search_query: &[String]) -> Vec<String> {
    search_query
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .map(normalize_word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noun_gender_collapses_to_bare_noun() {
        assert_eq!(
            target_sort_key(Language::Spanish, PartOfSpeech::MasculineNoun),
            "TGT#es#POS#noun"
        );
    }

    #[test]
    fn verb_pos_is_kept_verbatim() {
        assert_eq!(
            target_sort_key(Language::Spanish, PartOfSpeech::Verb),
            "TGT#es#POS#verb"
        );
    }

    #[test]
    fn source_partition_key_normalizes_the_word() {
        assert_eq!(
            source_partition_key(Language::German, "Haus"),
            "SRC#de#haus"
        );
    }

    #[test]
    fn build_item_is_none_without_mandatory_fields() {
        let state = VocabState::new("haus", Language::English);
        assert!(build_item(&state, None).is_none());
    }

    #[test]
    fn normalized_search_words_drops_blank_entries() {
        let words = vec!["house".to_string(), "  ".to_string(), "Home".to_string()];
        assert_eq!(normalized_search_words(&words), vec!["house", "home"]);
    }
}
