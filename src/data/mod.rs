//! Data module - CSV fetching, caching and perception column extraction

mod cache;
mod loader;
mod source;

pub use cache::TtlCache;
pub use loader::{perception_texts, DataLoader, LoaderError, PERCEPTION_COLUMN};
pub use source::{source_for, CsvSource};
