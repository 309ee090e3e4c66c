//! Blob storage key construction, grounded on `s3_utils.py`.

/// Reduce a word to an alphanumeric-only string, capped at `max_length`,
/// safe for use as a path segment.
pub fn safe_word_key(word: &str, max_length: usize) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).take(max_length).collect()
}

/// Paths for the audio artifacts of `(target_language, target_word)`.
pub struct VocabAudioPaths {
    /// `vocabs/{lang}/{safe_word}/audio/pronunciation.mp3`.
    pub pronunciation_key: String,
    /// `vocabs/{lang}/{safe_word}/audio/syllables.mp3`.
    pub syllables_key: String,
}

/// Build the audio key pair for a target word, per §6's blob storage layout.
pub fn vocab_audio_paths(lang_code: &str, target_word: &str) -> VocabAudioPaths {
    let safe_word = safe_word_key(target_word, 20);
    let base = format!("vocabs/{lang_code}/{safe_word}/audio");
    VocabAudioPaths {
        pronunciation_key: format!("{base}/pronunciation.mp3"),
        syllables_key: format!("{base}/syllables.mp3"),
    }
}

/// Image variant keys for an English-normalized word, shared across every
/// vocabulary word that translates to it (the media-reuse optimization).
pub struct EnglishImagePaths {
    /// `vocabs/en/{english_word}/images`.
    pub image_prefix: String,
    /// `.../images/large2x.jpg`.
    pub large2x_key: String,
    /// `.../images/large.jpg`.
    pub large_key: String,
    /// `.../images/medium.jpg`.
    pub medium_key: String,
}

/// Build the image key set for `english_word`, already normalized by the caller.
pub fn english_image_paths(english_word: &str) -> EnglishImagePaths {
    let image_prefix = format!("vocabs/en/{english_word}/images");
    EnglishImagePaths {
        large2x_key: format!("{image_prefix}/large2x.jpg"),
        large_key: format!("{image_prefix}/large.jpg"),
        medium_key: format!("{image_prefix}/medium.jpg"),
        image_prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_word_key_strips_punctuation_and_truncates() {
        assert_eq!(safe_word_key("to build!", 20), "tobuild");
        assert_eq!(safe_word_key("a-very-long-word-indeed", 10), "averylongw");
    }

    #[test]
    fn vocab_audio_paths_match_layout() {
        let paths = vocab_audio_paths("es", "construir");
        assert_eq!(paths.pronunciation_key, "vocabs/es/construir/audio/pronunciation.mp3");
        assert_eq!(paths.syllables_key, "vocabs/es/construir/audio/syllables.mp3");
    }

    #[test]
    fn english_image_paths_match_layout() {
        let paths = english_image_paths("house");
        assert_eq!(paths.image_prefix, "vocabs/en/house/images");
        assert_eq!(paths.large2x_key, "vocabs/en/house/images/large2x.jpg");
        assert_eq!(paths.large_key, "vocabs/en/house/images/large.jpg");
        assert_eq!(paths.medium_key, "vocabs/en/house/images/medium.jpg");
    }
}
