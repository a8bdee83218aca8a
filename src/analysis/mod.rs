//! Analysis module - term frequencies and the per-run pipeline

mod pipeline;
mod ranker;

pub use pipeline::{AnalysisReport, AnalysisStatus, DebugInfo, Pipeline};
pub use ranker::{FrequencyTable, RankedTerm, DEFAULT_TOP_N};
