//! Lexicon-backed Portuguese annotator (full tier).
//!
//! The lexicon is a TSV file: `form<TAB>lemma<TAB>POS[<TAB>stop]`, one entry
//! per line, `#` starts a comment. Words missing from the lexicon get a lemma
//! from plural-suffix rules and a tag from suffix heuristics, so every token
//! is tagged.

use super::annotator::{split_words, Annotator, PartOfSpeech, Tier};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Line {line}: expected form, lemma and POS separated by tabs")]
    Malformed { line: usize },
    #[error("Line {line}: unknown part of speech '{tag}'")]
    UnknownTag { line: usize, tag: String },
    #[error("Lexicon has no entries")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub stop: bool,
}

/// Lowercase word form → entry.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

impl Lexicon {
    pub fn parse(content: &str) -> Result<Self, LexiconError> {
        let mut entries = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() < 3 || fields[0].is_empty() || fields[1].is_empty() {
                return Err(LexiconError::Malformed { line: idx + 1 });
            }

            let pos = PartOfSpeech::from_tag(fields[2]).ok_or_else(|| LexiconError::UnknownTag {
                line: idx + 1,
                tag: fields[2].to_string(),
            })?;
            let stop = fields.get(3).is_some_and(|flag| *flag == "stop");

            entries.insert(
                fields[0].to_lowercase(),
                LexiconEntry {
                    lemma: fields[1].to_lowercase(),
                    pos,
                    stop,
                },
            );
        }

        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

}

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "oso", "osa", "osos", "osas", "ável", "ível", "áveis", "íveis", "ivo", "iva", "ivos", "ivas",
    "ado", "ada", "ados", "adas", "ido", "ida", "idos", "idas",
];
const GERUND_SUFFIXES: &[&str] = &["ando", "endo", "indo"];
const INFINITIVE_SUFFIXES: &[&str] = &["ar", "er", "ir"];

/// Annotator backed by a [`Lexicon`] plus suffix rules.
pub struct LexiconAnnotator {
    name: String,
    lexicon: Lexicon,
}

impl LexiconAnnotator {
    pub fn new(name: impl Into<String>, lexicon: Lexicon) -> Self {
        Self {
            name: name.into(),
            lexicon,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.lexicon.len()
    }

    /// Load from a lexicon file; the model is named after the file stem.
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let lexicon = Lexicon::load(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "lexicon".to_string());
        Ok(Self::new(name, lexicon))
    }

    fn guess_pos(word: &str, sentence_start: bool) -> PartOfSpeech {
        if word.chars().all(|c| c.is_ascii_digit()) {
            return PartOfSpeech::Numeral;
        }
        if !word.chars().all(char::is_alphabetic) {
            return PartOfSpeech::Other;
        }
        if !sentence_start && word.chars().next().is_some_and(char::is_uppercase) {
            return PartOfSpeech::ProperNoun;
        }

        let lower = word.to_lowercase();
        if lower.chars().count() <= 3 {
            return PartOfSpeech::Noun;
        }
        if lower.ends_with("mente") {
            PartOfSpeech::Adverb
        } else if GERUND_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            PartOfSpeech::Verb
        } else if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            PartOfSpeech::Adjective
        } else if INFINITIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            PartOfSpeech::Verb
        } else {
            PartOfSpeech::Noun
        }
    }
}

/// Singular form of a Portuguese noun or adjective.
fn singularize(word: &str) -> String {
    const RULES: &[(&str, &str)] = &[
        ("ões", "ão"),
        ("ães", "ão"),
        ("ais", "al"),
        ("éis", "el"),
        ("óis", "ol"),
        ("ns", "m"),
    ];

    let len = word.chars().count();
    if len <= 3 {
        return word.to_string();
    }

    for (suffix, replacement) in RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }

    if len > 4 {
        for suffix in ["res", "zes", "ses"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
    }

    match word.strip_suffix('s') {
        Some(stem) if stem.ends_with(|c: char| "aeiouáéíóúâêôãõ".contains(c)) => stem.to_string(),
        _ => word.to_string(),
    }
}

impl Annotator for LexiconAnnotator {
    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> Tier {
        Tier::Full
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        split_words(text)
    }

    fn lemmatize(&self, word: &str) -> Option<String> {
        if let Some(entry) = self.lexicon.get(word) {
            return Some(entry.lemma.clone());
        }

        let lower = word.to_lowercase();
        match Self::guess_pos(word, true) {
            PartOfSpeech::Noun | PartOfSpeech::Adjective => Some(singularize(&lower)),
            _ => Some(lower),
        }
    }

    fn pos_tag(&self, words: &[String]) -> Option<Vec<PartOfSpeech>> {
        let mut sentence_start = true;
        let tags = words
            .iter()
            .map(|word| {
                let pos = match self.lexicon.get(word) {
                    Some(entry) => entry.pos,
                    None => Self::guess_pos(word, sentence_start),
                };
                sentence_start = matches!(word.as_str(), "." | "!" | "?" | "…");
                pos
            })
            .collect();
        Some(tags)
    }

    fn is_stopword(&self, word: &str) -> Option<bool> {
        let stop = self
            .lexicon
            .get(word)
            .is_some_and(|entry| entry.stop || entry.pos.is_closed_class());
        Some(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::annotator::annotate;

    const SAMPLE: &str = "# form\tlemma\tpos\n\
                          o\to\tDET\tstop\n\
                          é\tser\tAUX\tstop\n\
                          lixo\tlixo\tNOUN\n\
                          descartamos\tdescartar\tVERB\n\
                          muito\tmuito\tADV\tstop\n";

    fn annotator() -> LexiconAnnotator {
        LexiconAnnotator::new("test_lexicon", Lexicon::parse(SAMPLE).unwrap())
    }

    #[test]
    fn parse_reads_entries_and_flags() {
        let lexicon = Lexicon::parse(SAMPLE).unwrap();
        assert_eq!(lexicon.len(), 5);
        let entry = lexicon.get("Descartamos").unwrap();
        assert_eq!(entry.lemma, "descartar");
        assert_eq!(entry.pos, PartOfSpeech::Verb);
        assert!(!entry.stop);
        assert!(lexicon.get("muito").unwrap().stop);
    }

    #[test]
    fn parse_rejects_bad_lines() {
        assert!(matches!(
            Lexicon::parse("lixo\tlixo\n"),
            Err(LexiconError::Malformed { line: 1 })
        ));
        assert!(matches!(
            Lexicon::parse("lixo\tlixo\tTHING\n"),
            Err(LexiconError::UnknownTag { line: 1, .. })
        ));
        assert!(matches!(Lexicon::parse("# nothing\n"), Err(LexiconError::Empty)));
    }

    #[test]
    fn lexicon_hits_provide_lemma_and_tag() {
        let annotations = annotate(&annotator(), "O lixo é descartamos");
        let lemmas: Vec<_> = annotations.iter().map(|a| a.lemma.clone().unwrap()).collect();
        assert_eq!(lemmas, vec!["o", "lixo", "ser", "descartar"]);
        assert_eq!(annotations[0].is_stop, Some(true));
        assert_eq!(annotations[2].pos, Some(PartOfSpeech::Auxiliary));
        assert_eq!(annotations[1].is_stop, Some(false));
    }

    #[test]
    fn unknown_words_get_heuristic_tags() {
        let words: Vec<String> = ["Baterias", "poluindo", "Recife", "perigosas", "reciclar", "rapidamente", "2024"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tags = annotator().pos_tag(&words).unwrap();
        assert_eq!(
            tags,
            vec![
                PartOfSpeech::Noun,
                PartOfSpeech::Verb,
                PartOfSpeech::ProperNoun,
                PartOfSpeech::Adjective,
                PartOfSpeech::Verb,
                PartOfSpeech::Adverb,
                PartOfSpeech::Numeral,
            ]
        );
    }

    #[test]
    fn sentence_start_capital_is_not_a_proper_noun() {
        let words: Vec<String> = ["Baterias", "vazam", ".", "Celulares", "também"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tags = annotator().pos_tag(&words).unwrap();
        assert_eq!(tags[0], PartOfSpeech::Noun);
        assert_eq!(tags[3], PartOfSpeech::Noun);
    }

    #[test]
    fn unknown_plurals_are_singularized() {
        let a = annotator();
        assert_eq!(a.lemmatize("Baterias").as_deref(), Some("bateria"));
        assert_eq!(a.lemmatize("poluições").as_deref(), Some("poluição"));
        assert_eq!(a.lemmatize("metais").as_deref(), Some("metal"));
        assert_eq!(a.lemmatize("cores").as_deref(), Some("cor"));
        assert_eq!(a.lemmatize("reciclar").as_deref(), Some("reciclar"));
    }
}
