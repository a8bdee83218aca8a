//! Perception Cloud - survey word cloud & term frequency dashboard
//!
//! Fetches survey answers as CSV, lemmatizes and filters them, and shows a
//! word cloud plus a ranked frequency chart that refresh on a schedule.

mod analysis;
mod charts;
mod config;
mod data;
mod export;
mod gui;
mod nlp;
mod refresh;

use anyhow::Context;
use config::{DashboardConfig, CONFIG_FILENAME};
use data::{source_for, DataLoader};
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILENAME));

    // Annotation backend is loaded once and shared by every run
    let annotator = nlp::load_annotator(&config.nlp);
    let pipeline = analysis::Pipeline::new(annotator, &config.analysis);

    let source = source_for(&config.source.csv_url)
        .with_context(|| format!("Invalid data source {}", config.source.csv_url))?;
    let loader = DataLoader::new(source, config.schedule.cache_ttl());
    log::info!(
        "Source: {} (cache {}s, refresh every {}s)",
        loader.describe_source(),
        config.schedule.cache_ttl_secs,
        config.schedule.refresh_interval_secs
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 820.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Percepções — E-lixo"),
        ..Default::default()
    };

    eframe::run_native(
        "Perception Cloud",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, loader, pipeline)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {}", e))
}
