//! Annotation backend contract.
//!
//! A backend always tokenizes. Lemmas, part-of-speech tags and stopword
//! flags are optional capabilities: a backend that lacks one returns `None`
//! and the normalizer adapts its filtering instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Adposition,
    CoordConj,
    SubordConj,
    Numeral,
    Other,
}

impl PartOfSpeech {
    pub fn tag(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Auxiliary => "AUX",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Determiner => "DET",
            PartOfSpeech::Pronoun => "PRON",
            PartOfSpeech::Adposition => "ADP",
            PartOfSpeech::CoordConj => "CCONJ",
            PartOfSpeech::SubordConj => "SCONJ",
            PartOfSpeech::Numeral => "NUM",
            PartOfSpeech::Other => "X",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let pos = match tag {
            "NOUN" => PartOfSpeech::Noun,
            "PROPN" => PartOfSpeech::ProperNoun,
            "VERB" => PartOfSpeech::Verb,
            "AUX" => PartOfSpeech::Auxiliary,
            "ADJ" => PartOfSpeech::Adjective,
            "ADV" => PartOfSpeech::Adverb,
            "DET" => PartOfSpeech::Determiner,
            "PRON" => PartOfSpeech::Pronoun,
            "ADP" => PartOfSpeech::Adposition,
            "CCONJ" => PartOfSpeech::CoordConj,
            "SCONJ" => PartOfSpeech::SubordConj,
            "NUM" => PartOfSpeech::Numeral,
            "X" => PartOfSpeech::Other,
            _ => return None,
        };
        Some(pos)
    }

    /// Categories that carry topic information: verbs, nouns, proper nouns
    /// and adjectives.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Verb
                | PartOfSpeech::Noun
                | PartOfSpeech::ProperNoun
                | PartOfSpeech::Adjective
        )
    }

    /// Function-word categories, treated as stopwords by the lexicon model.
    pub fn is_closed_class(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Determiner
                | PartOfSpeech::Pronoun
                | PartOfSpeech::Adposition
                | PartOfSpeech::CoordConj
                | PartOfSpeech::SubordConj
                | PartOfSpeech::Auxiliary
        )
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Capability level of a backend, from richest to poorest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Lemmas, part of speech and stopwords.
    Full,
    /// Stopwords only.
    Light,
    /// Tokenization only.
    Minimal,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Full => "full",
            Tier::Light => "light",
            Tier::Minimal => "minimal",
        };
        f.write_str(name)
    }
}

/// Linguistic annotation backend.
pub trait Annotator: Send + Sync {
    /// Model name shown to the user.
    fn name(&self) -> &str;

    fn tier(&self) -> Tier;

    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Dictionary form of `word`, if this backend lemmatizes.
    fn lemmatize(&self, _word: &str) -> Option<String> {
        None
    }

    /// One tag per word, if this backend tags parts of speech.
    fn pos_tag(&self, _words: &[String]) -> Option<Vec<PartOfSpeech>> {
        None
    }

    /// Whether `word` is a stopword, if this backend knows.
    fn is_stopword(&self, _word: &str) -> Option<bool> {
        None
    }
}

/// One annotated token. `None` fields mark capabilities the backend lacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub lemma: Option<String>,
    pub pos: Option<PartOfSpeech>,
    pub is_stop: Option<bool>,
}

impl Annotation {
    /// Non-empty and made only of alphabetic characters.
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }
}

/// Run every capability `annotator` offers over `text`.
pub fn annotate(annotator: &dyn Annotator, text: &str) -> Vec<Annotation> {
    let words = annotator.tokenize(text);
    let tags = annotator
        .pos_tag(&words)
        .filter(|tags| tags.len() == words.len());

    words
        .iter()
        .enumerate()
        .map(|(i, word)| Annotation {
            text: word.clone(),
            lemma: annotator.lemmatize(word),
            pos: tags.as_ref().map(|t| t[i]),
            is_stop: annotator.is_stopword(word),
        })
        .collect()
}

/// Unicode word-boundary segmentation with whitespace segments removed.
/// Punctuation and numbers stay as their own tokens.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| segment.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TokensOnly;

    impl Annotator for TokensOnly {
        fn name(&self) -> &str {
            "tokens-only"
        }

        fn tier(&self) -> Tier {
            Tier::Minimal
        }

        fn tokenize(&self, text: &str) -> Vec<String> {
            split_words(text)
        }
    }

    #[test]
    fn split_keeps_punctuation_and_accents() {
        let words = split_words("O lixo é ruim, né? 2024");
        assert_eq!(words, vec!["O", "lixo", "é", "ruim", ",", "né", "?", "2024"]);
    }

    #[test]
    fn missing_capabilities_stay_none() {
        let annotations = annotate(&TokensOnly, "Lixo eletrônico");
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.lemma.is_none()));
        assert!(annotations.iter().all(|a| a.pos.is_none()));
        assert!(annotations.iter().all(|a| a.is_stop.is_none()));
    }

    #[test]
    fn alphabetic_check_is_unicode_aware() {
        let token = |text: &str| Annotation {
            text: text.to_string(),
            lemma: None,
            pos: None,
            is_stop: None,
        };
        assert!(token("poluição").is_alpha());
        assert!(!token("2024").is_alpha());
        assert!(!token("d'água").is_alpha());
        assert!(!token("").is_alpha());
    }

    #[test]
    fn tags_round_trip_through_names() {
        for pos in [
            PartOfSpeech::Noun,
            PartOfSpeech::ProperNoun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Auxiliary,
        ] {
            assert_eq!(PartOfSpeech::from_tag(pos.tag()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_tag("SYM"), None);
        assert!(PartOfSpeech::ProperNoun.is_content());
        assert!(!PartOfSpeech::Adverb.is_content());
    }
}
