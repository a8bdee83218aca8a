//! CSV sources: remote spreadsheet export or local file.

use super::LoaderError;
use std::path::PathBuf;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can hand back the raw bytes of a CSV document.
pub trait CsvSource: Send + Sync {
    /// Human readable location, used in logs and the debug panel.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<u8>, LoaderError>;
}

/// Plain HTTP GET, no authentication.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, LoaderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl CsvSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// CSV file on disk, re-read on every fetch.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CsvSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        std::fs::read(&self.path).map_err(|source| LoaderError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Pick a source from a configured location string.
pub fn source_for(location: &str) -> Result<Box<dyn CsvSource>, LoaderError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn local_paths_use_file_source() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("respostas.csv");
        fs::write(&path, "id,texto\n1,lixo\n").unwrap();

        let source = source_for(path.to_str().unwrap()).unwrap();
        assert_eq!(source.describe(), path.display().to_string());
        assert_eq!(source.fetch().unwrap(), b"id,texto\n1,lixo\n");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = FileSource::new("/definitely/not/here.csv");
        assert!(matches!(source.fetch(), Err(LoaderError::Io { .. })));
    }

    #[test]
    fn urls_use_http_source() {
        let source = source_for("https://example.com/export?format=csv").unwrap();
        assert_eq!(source.describe(), "https://example.com/export?format=csv");
    }
}
