//! CSV Data Loader Module
//! Fetches the survey export, parses it with Polars and exposes the
//! perception column.

use super::{CsvSource, TtlCache};
use polars::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Name given to the second column of every loaded table.
pub const PERCEPTION_COLUMN: &str = "percepcao";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Fetches and caches the response table.
pub struct DataLoader {
    source: Box<dyn CsvSource>,
    cache: TtlCache<DataFrame>,
}

impl DataLoader {
    pub fn new(source: Box<dyn CsvSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// Return the cached table while it is fresh, otherwise fetch again.
    pub fn load(&mut self, now: Instant) -> Result<DataFrame, LoaderError> {
        let source = &self.source;
        let ttl = self.cache.ttl();
        self.cache.get_or_try_insert_with(now, || {
            log::info!(
                "Fetching responses from {} (kept for {}s)",
                source.describe(),
                ttl.as_secs()
            );
            let bytes = source.fetch()?;
            let df = Self::parse_csv(&bytes)?;
            log::info!("Loaded {} rows, {} columns", df.height(), df.width());
            Ok(df)
        })
    }

    /// Drop the cached table so the next load refetches.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Parse CSV bytes and rename the perception column.
    pub fn parse_csv(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;

        rename_perception_column(&mut df)?;
        Ok(df)
    }
}

/// Rename the second column to [`PERCEPTION_COLUMN`]. Tables with fewer than
/// two columns are left as they are.
pub fn rename_perception_column(df: &mut DataFrame) -> Result<(), LoaderError> {
    let original = match df.get_column_names().get(1) {
        Some(name) => name.to_string(),
        None => {
            log::debug!("Table has {} column(s), nothing to rename", df.width());
            return Ok(());
        }
    };

    if original != PERCEPTION_COLUMN {
        // Another column already carries the name; move it aside first
        let clash = df
            .get_column_names()
            .iter()
            .position(|name| name.as_str() == PERCEPTION_COLUMN);
        if let Some(idx) = clash {
            let aside = format!("{}_{}", PERCEPTION_COLUMN, idx);
            df.rename(PERCEPTION_COLUMN, aside.as_str().into())?;
            log::debug!("Column '{}' renamed to '{}'", PERCEPTION_COLUMN, aside);
        }
        df.rename(&original, PERCEPTION_COLUMN.into())?;
        log::debug!("Column '{}' renamed to '{}'", original, PERCEPTION_COLUMN);
    }
    Ok(())
}

/// Non-null, non-blank values of the perception column.
///
/// `None` when the table has fewer than two columns, or the column is
/// absent or holds no usable text.
pub fn perception_texts(df: &DataFrame) -> Option<Vec<String>> {
    if df.width() < 2 {
        return None;
    }
    let column = df.column(PERCEPTION_COLUMN).ok()?;

    let as_text = match column.cast(&DataType::String) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Perception column is not text: {}", e);
            return None;
        }
    };
    let values = as_text.str().ok()?;

    let texts: Vec<String> = values
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SURVEY: &str = "Carimbo,O que você pensa sobre o lixo eletrônico?\n\
                          2024-05-01,O lixo é ruim\n\
                          2024-05-02,\n\
                          2024-05-03,\"reciclagem, é bom\"\n";

    struct CountingSource {
        body: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl CsvSource for CountingSource {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    struct FailingSource;

    impl CsvSource for FailingSource {
        fn describe(&self) -> String {
            "offline".to_string()
        }

        fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
            Err(LoaderError::HttpStatus {
                status: 503,
                url: "offline".to_string(),
            })
        }
    }

    #[test]
    fn second_column_is_renamed() {
        let df = DataLoader::parse_csv(SURVEY.as_bytes()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Carimbo".to_string(), PERCEPTION_COLUMN.to_string()]);
    }

    #[test]
    fn texts_skip_missing_values() {
        let df = DataLoader::parse_csv(SURVEY.as_bytes()).unwrap();
        let texts = perception_texts(&df).unwrap();
        assert_eq!(texts, vec!["O lixo é ruim", "reciclagem, é bom"]);
    }

    #[test]
    fn single_column_table_has_no_perception() {
        let df = DataLoader::parse_csv(b"Carimbo\n2024-05-01\n").unwrap();
        assert_eq!(df.width(), 1);
        assert!(perception_texts(&df).is_none());
    }

    #[test]
    fn lone_perception_column_is_not_analyzed() {
        let df = DataLoader::parse_csv(b"percepcao\nlixo reciclagem\n").unwrap();
        assert_eq!(df.width(), 1);
        assert!(perception_texts(&df).is_none());
    }

    #[test]
    fn first_column_named_like_perception_is_moved_aside() {
        let df = DataLoader::parse_csv(b"percepcao,Resposta\n1,lixo\n").unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["percepcao_0".to_string(), PERCEPTION_COLUMN.to_string()]);
        assert_eq!(perception_texts(&df).unwrap(), vec!["lixo"]);
    }

    #[test]
    fn blank_perception_column_is_treated_as_missing() {
        let df = DataLoader::parse_csv(b"Carimbo,Resposta\n2024-05-01,\n2024-05-02,\n").unwrap();
        assert!(perception_texts(&df).is_none());
    }

    #[test]
    fn load_uses_cache_until_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            body: SURVEY,
            calls: Arc::clone(&calls),
        };
        let mut loader = DataLoader::new(Box::new(source), Duration::from_secs(30));
        let start = Instant::now();

        loader.load(start).unwrap();
        loader.load(start + Duration::from_secs(5)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        loader.load(start + Duration::from_secs(31)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        loader.invalidate();
        loader.load(start + Duration::from_secs(32)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn fetch_failure_surfaces_as_error() {
        let mut loader = DataLoader::new(Box::new(FailingSource), Duration::from_secs(30));
        let err = loader.load(Instant::now()).unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
