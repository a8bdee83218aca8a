//! Text Normalizer
//! Turns free-text responses into the token sequence that feeds the
//! frequency ranker and the word cloud.

use super::annotator::{annotate, Annotation, Annotator};
use std::collections::HashSet;
use std::sync::Arc;

/// Literal strings removed from the final token sequence.
///
/// Matching is exact and case-sensitive; tokens are already lowercase, so
/// entries with capitals or spaces never match.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    words: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| !self.contains(t)).collect()
    }
}

/// Annotates, filters and normalizes response texts with a shared backend.
pub struct TextNormalizer {
    annotator: Arc<dyn Annotator>,
    exclusions: ExclusionSet,
}

impl TextNormalizer {
    pub fn new(annotator: Arc<dyn Annotator>, exclusions: ExclusionSet) -> Self {
        Self {
            annotator,
            exclusions,
        }
    }

    pub fn annotator(&self) -> &dyn Annotator {
        self.annotator.as_ref()
    }

    /// Single pass over all texts joined by a space, followed by the
    /// exclusion filter.
    pub fn process_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let joined = texts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");

        let tokens: Vec<String> = annotate(self.annotator.as_ref(), &joined)
            .iter()
            .filter_map(Self::normalize)
            .collect();

        self.exclusions.filter(tokens)
    }

    /// Normalized form of one annotation, or `None` when it is filtered out.
    fn normalize(annotation: &Annotation) -> Option<String> {
        if !annotation.is_alpha() {
            return None;
        }
        if annotation.is_stop == Some(true) {
            return None;
        }

        let form = match &annotation.lemma {
            Some(lemma) => lemma.to_lowercase(),
            None => annotation.text.to_lowercase(),
        };

        match annotation.pos {
            Some(pos) => pos.is_content().then_some(form),
            None => (form.chars().count() > 2).then_some(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDE_WORDS;
    use crate::nlp::basic::{SentenceSplitter, StopwordAnnotator};
    use crate::nlp::lexicon::{Lexicon, LexiconAnnotator};

    fn default_exclusions() -> ExclusionSet {
        ExclusionSet::new(DEFAULT_EXCLUDE_WORDS)
    }

    fn minimal() -> TextNormalizer {
        TextNormalizer::new(Arc::new(SentenceSplitter), default_exclusions())
    }

    #[test]
    fn minimal_tier_keeps_long_alphabetic_words() {
        let tokens = minimal().process_texts(&["O lixo é ruim", "reciclagem é bom"]);
        assert_eq!(tokens, vec!["lixo", "reciclagem", "bom"]);
    }

    #[test]
    fn minimal_tier_drops_numbers_and_punctuation() {
        let tokens = minimal().process_texts(&["Lixo!!! 2024, pilhas; TV's"]);
        assert_eq!(tokens, vec!["lixo", "pilhas"]);
    }

    #[test]
    fn lowercase_exclusions_never_survive() {
        let tokens = minimal().process_texts(&["RUIM ruim Ruim sujeira cabos celular"]);
        assert!(!tokens.iter().any(|t| t == "ruim" || t == "sujeira" || t == "cabos"));
        assert_eq!(tokens, vec!["celular"]);
    }

    #[test]
    fn mixed_case_exclusions_do_not_match_lowercased_tokens() {
        let tokens = minimal().process_texts(&["Poluição perigo Acúmulo"]);
        assert_eq!(tokens, vec!["poluição", "perigo", "acúmulo"]);
    }

    #[test]
    fn light_tier_drops_stopwords() {
        let annotator = StopwordAnnotator::new("pt", ["para", "com", "muito"]);
        let normalizer = TextNormalizer::new(Arc::new(annotator), default_exclusions());
        let tokens = normalizer.process_texts(&["Muito lixo para descartar com cuidado"]);
        assert_eq!(tokens, vec!["lixo", "descartar", "cuidado"]);
    }

    #[test]
    fn full_tier_keeps_content_words_as_lemmas() {
        let lexicon = Lexicon::parse(
            "o\to\tDET\tstop\n\
             é\tser\tAUX\tstop\n\
             lixo\tlixo\tNOUN\n\
             ruim\truim\tADJ\n\
             bom\tbom\tADJ\n\
             muito\tmuito\tADV\n\
             descartamos\tdescartar\tVERB\n",
        )
        .unwrap();
        let normalizer = TextNormalizer::new(
            Arc::new(LexiconAnnotator::new("pt", lexicon)),
            default_exclusions(),
        );

        let tokens = normalizer.process_texts(&[
            "O lixo é ruim",
            "reciclagem é muito bom",
            "Descartamos baterias",
        ]);
        assert_eq!(
            tokens,
            vec!["lixo", "reciclagem", "bom", "descartar", "bateria"]
        );
    }

    #[test]
    fn empty_input_gives_no_tokens() {
        let empty: [&str; 0] = [];
        assert!(minimal().process_texts(&empty).is_empty());
        assert!(minimal().process_texts(&["", "  "]).is_empty());
    }
}
