//! Analysis Pipeline
//! Perception column → tokens → frequency table → chart inputs, plus the
//! debug details shown under the charts.

use super::ranker::{FrequencyTable, RankedTerm};
use crate::charts::BarChartSpec;
use crate::config::AnalysisConfig;
use crate::data::{perception_texts, PERCEPTION_COLUMN};
use crate::nlp::{Annotator, ExclusionSet, TextNormalizer};
use polars::prelude::*;
use std::sync::Arc;

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Tokens survived filtering; both visualizations have input.
    Ready,
    /// The perception column is absent or holds no text.
    MissingColumn,
    /// Text was present but every token was filtered out.
    NoTokens,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugInfo {
    pub columns: Vec<String>,
    /// Rendered head of the table.
    pub preview: String,
    pub token_count: usize,
    pub first_tokens: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    pub tokens: Vec<String>,
    pub frequencies: FrequencyTable,
    pub ranked: Vec<RankedTerm>,
    /// Only present when `status` is `Ready`.
    pub chart: Option<BarChartSpec>,
    pub debug: DebugInfo,
}

impl AnalysisReport {
    /// Word cloud input, only when there is something to draw.
    pub fn word_cloud_input(&self) -> Option<&FrequencyTable> {
        (self.status == AnalysisStatus::Ready).then_some(&self.frequencies)
    }

    pub fn status_message(&self) -> Option<String> {
        match self.status {
            AnalysisStatus::Ready => None,
            AnalysisStatus::MissingColumn => Some(format!(
                "Coluna '{}' não encontrada ou vazia.",
                PERCEPTION_COLUMN
            )),
            AnalysisStatus::NoTokens => Some("Nenhum token extraído.".to_string()),
        }
    }
}

/// Per-run analysis over a loaded table. Holds the shared annotation backend.
pub struct Pipeline {
    normalizer: TextNormalizer,
    top_n: usize,
    preview_rows: usize,
    preview_tokens: usize,
}

impl Pipeline {
    pub fn new(annotator: Arc<dyn Annotator>, config: &AnalysisConfig) -> Self {
        let exclusions = ExclusionSet::new(config.exclude_words.iter().cloned());
        Self {
            normalizer: TextNormalizer::new(annotator, exclusions),
            top_n: config.top_n,
            preview_rows: config.preview_rows,
            preview_tokens: config.preview_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        self.normalizer.annotator().name()
    }

    pub fn analyze(&self, df: &DataFrame) -> AnalysisReport {
        let debug = DebugInfo {
            columns: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preview: format!("{}", df.head(Some(self.preview_rows))),
            token_count: 0,
            first_tokens: Vec::new(),
        };

        let Some(texts) = perception_texts(df) else {
            log::info!("No usable '{}' column", PERCEPTION_COLUMN);
            return Self::empty_report(AnalysisStatus::MissingColumn, debug);
        };

        let tokens = self.normalizer.process_texts(&texts);
        log::debug!("{} texts → {} tokens", texts.len(), tokens.len());
        if tokens.is_empty() {
            return Self::empty_report(AnalysisStatus::NoTokens, debug);
        }

        let frequencies = FrequencyTable::from_tokens(&tokens);
        let ranked = frequencies.top(self.top_n);
        let chart = BarChartSpec::from_ranked(&ranked);

        AnalysisReport {
            status: AnalysisStatus::Ready,
            debug: DebugInfo {
                token_count: tokens.len(),
                first_tokens: tokens.iter().take(self.preview_tokens).cloned().collect(),
                ..debug
            },
            tokens,
            frequencies,
            ranked,
            chart: Some(chart),
        }
    }

    fn empty_report(status: AnalysisStatus, debug: DebugInfo) -> AnalysisReport {
        AnalysisReport {
            status,
            tokens: Vec::new(),
            frequencies: FrequencyTable::default(),
            ranked: Vec::new(),
            chart: None,
            debug,
        }
    }
}
