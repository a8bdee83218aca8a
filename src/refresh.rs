//! Refresh cycle: fetch (through the TTL cache) → analyze → render.

use crate::analysis::{AnalysisReport, Pipeline};
use crate::charts::StaticChartRenderer;
use crate::config::WordCloudConfig;
use crate::data::DataLoader;
use image::RgbImage;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Fixed-interval rerun schedule. The first run is always due.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    last_run: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark_run(&mut self, now: Instant) {
        self.last_run = Some(now);
    }

    /// Time left until the next scheduled run.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.last_run {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// Everything the dashboard shows for one run.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub source: String,
    pub model_name: String,
    pub report: AnalysisReport,
    pub word_cloud: Option<RgbImage>,
    pub generated_at: Instant,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    Ready(Box<DashboardSnapshot>),
    /// The fetch failed; nothing else ran.
    FetchFailed(String),
}

/// One full cycle. A fetch failure stops the run without partial results;
/// a word cloud that fails to render is logged and left empty.
pub fn run_refresh(
    loader: &Mutex<DataLoader>,
    pipeline: &Pipeline,
    word_cloud: &WordCloudConfig,
    now: Instant,
) -> RefreshOutcome {
    let (df, source) = {
        let mut loader = loader.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let source = loader.describe_source();
        match loader.load(now) {
            Ok(df) => (df, source),
            Err(e) => {
                log::error!("Failed to load data: {}", e);
                return RefreshOutcome::FetchFailed(e.to_string());
            }
        }
    };

    let report = pipeline.analyze(&df);

    let image = report.word_cloud_input().and_then(|frequencies| {
        match StaticChartRenderer::render_word_cloud(frequencies, word_cloud) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("Word cloud not rendered: {}", e);
                None
            }
        }
    });

    RefreshOutcome::Ready(Box::new(DashboardSnapshot {
        source,
        model_name: pipeline.model_name().to_string(),
        report,
        word_cloud: image,
        generated_at: now,
    }))
}
