//! Backend selection by probing for model resources.

use super::annotator::Annotator;
use super::basic::{SentenceSplitter, StopwordAnnotator};
use super::lexicon::LexiconAnnotator;
use crate::config::NlpConfig;
use std::sync::Arc;

/// Pick the richest backend whose resources load: each lexicon in order,
/// then the stopword list, then the bare splitter.
///
/// Call once per process and share the result.
pub fn load_annotator(config: &NlpConfig) -> Arc<dyn Annotator> {
    for path in &config.lexicon_paths {
        match LexiconAnnotator::from_file(path) {
            Ok(annotator) => {
                log::info!(
                    "Annotation model '{}' loaded (full, {} entries)",
                    annotator.name(),
                    annotator.entry_count()
                );
                return Arc::new(annotator);
            }
            Err(e) => log::warn!("Lexicon {} unavailable: {}", path.display(), e),
        }
    }

    match StopwordAnnotator::from_file(&config.stopwords_path) {
        Ok(annotator) => {
            log::info!(
                "Annotation model '{}' loaded (light, {} stopwords)",
                annotator.name(),
                annotator.len()
            );
            return Arc::new(annotator);
        }
        Err(e) => log::warn!(
            "Stopword list {} unavailable: {}",
            config.stopwords_path.display(),
            e
        ),
    }

    log::warn!("Falling back to '{}' (tokenization only)", SentenceSplitter::NAME);
    Arc::new(SentenceSplitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::annotator::Tier;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dir: &TempDir, lexicons: &[&str], stopwords: &str) -> NlpConfig {
        NlpConfig {
            lexicon_paths: lexicons.iter().map(|n| dir.path().join(n)).collect(),
            stopwords_path: dir.path().join(stopwords),
        }
    }

    #[test]
    fn nothing_available_falls_back_to_splitter() {
        let tmp = TempDir::new().unwrap();
        let annotator = load_annotator(&config(&tmp, &["sm.tsv", "md.tsv"], "stop.txt"));
        assert_eq!(annotator.tier(), Tier::Minimal);
        assert_eq!(annotator.name(), "blank_pt");
    }

    #[test]
    fn stopword_list_gives_light_tier() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("stop.txt"), "o\né\n").unwrap();
        let annotator = load_annotator(&config(&tmp, &["sm.tsv"], "stop.txt"));
        assert_eq!(annotator.tier(), Tier::Light);
    }

    #[test]
    fn first_readable_lexicon_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.tsv"), "lixo\n").unwrap();
        fs::write(tmp.path().join("pt_md.tsv"), "lixo\tlixo\tNOUN\n").unwrap();
        fs::write(tmp.path().join("pt_lg.tsv"), "lixo\tlixo\tNOUN\n").unwrap();
        fs::write(tmp.path().join("stop.txt"), "o\n").unwrap();

        let annotator = load_annotator(&config(
            &tmp,
            &["missing.tsv", "broken.tsv", "pt_md.tsv", "pt_lg.tsv"],
            "stop.txt",
        ));
        assert_eq!(annotator.tier(), Tier::Full);
        assert_eq!(annotator.name(), "pt_md");
    }

    #[test]
    fn bundled_models_load_as_full_tier() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let config = NlpConfig {
            lexicon_paths: vec![root.join("models/pt_lexicon.tsv")],
            stopwords_path: root.join("models/pt_stopwords.txt"),
        };
        let annotator = load_annotator(&config);
        assert_eq!(annotator.tier(), Tier::Full);
        assert_eq!(annotator.name(), "pt_lexicon");
    }
}
