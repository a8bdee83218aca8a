//! Reduced-capability backends: stopword list (light tier) and bare
//! tokenizer (minimal tier).

use super::annotator::{split_words, Annotator, Tier};
use super::lexicon::LexiconError;
use std::collections::HashSet;
use std::path::Path;

/// Tokenizes and flags stopwords from a word list. No lemmas, no tags.
pub struct StopwordAnnotator {
    name: String,
    stopwords: HashSet<String>,
}

impl StopwordAnnotator {
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// One word per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let words: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        if words.is_empty() {
            return Err(LexiconError::Empty);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "stopwords".to_string());
        Ok(Self::new(name, words))
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }
}

impl Annotator for StopwordAnnotator {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> Tier {
        Tier::Light
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        split_words(text)
    }

    fn is_stopword(&self, word: &str) -> Option<bool> {
        Some(self.stopwords.contains(&word.to_lowercase()))
    }
}

/// Always-available fallback: word segmentation and nothing else.
#[derive(Debug, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub const NAME: &'static str = "blank_pt";
}

impl Annotator for SentenceSplitter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tier(&self) -> Tier {
        Tier::Minimal
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        split_words(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::annotator::annotate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stopwords_are_case_insensitive() {
        let annotator = StopwordAnnotator::new("pt", ["o", "é", "de"]);
        let annotations = annotate(&annotator, "O lixo de casa");
        let stops: Vec<_> = annotations.iter().map(|a| a.is_stop).collect();
        assert_eq!(stops, vec![Some(true), Some(false), Some(true), Some(false)]);
        assert!(annotations.iter().all(|a| a.lemma.is_none() && a.pos.is_none()));
    }

    #[test]
    fn stopword_file_skips_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pt_stopwords.txt");
        fs::write(&path, "# artigos\no\na\n\nde\n").unwrap();

        let annotator = StopwordAnnotator::from_file(&path).unwrap();
        assert_eq!(annotator.name(), "pt_stopwords");
        assert_eq!(annotator.len(), 3);
    }

    #[test]
    fn empty_stopword_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "# nada\n").unwrap();
        assert!(matches!(
            StopwordAnnotator::from_file(&path),
            Err(LexiconError::Empty)
        ));
    }

    #[test]
    fn splitter_offers_no_optional_capabilities() {
        let splitter = SentenceSplitter;
        assert_eq!(splitter.tier(), Tier::Minimal);
        assert!(splitter.lemmatize("lixo").is_none());
        assert!(splitter.is_stopword("o").is_none());
        assert!(splitter.pos_tag(&["lixo".to_string()]).is_none());
    }
}
