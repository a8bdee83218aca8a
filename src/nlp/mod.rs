//! NLP module - annotation backends and token normalization

mod annotator;
mod basic;
mod lexicon;
mod loader;
mod normalizer;

pub use annotator::Annotator;
pub use basic::SentenceSplitter;
pub use loader::load_annotator;
pub use normalizer::{ExclusionSet, TextNormalizer};
