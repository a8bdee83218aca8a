//! Export of the current dashboard artifacts to a folder.

use crate::charts::StaticChartRenderer;
use crate::config::ChartConfig;
use crate::refresh::DashboardSnapshot;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const WORD_CLOUD_FILE: &str = "nuvem.png";
pub const BAR_CHART_FILE: &str = "frequencias.png";
pub const FREQUENCY_CSV_FILE: &str = "frequencias.csv";
pub const CHART_JSON_FILE: &str = "grafico.json";

/// Write whatever the snapshot has into `dir`, returning the files written.
/// The frequency table is always written, even when empty.
pub fn export_snapshot(
    snapshot: &DashboardSnapshot,
    chart: &ChartConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export folder {}", dir.display()))?;

    // Rasters and the table are independent
    let (rasters, table) = rayon::join(
        || encode_rasters(snapshot, chart),
        || write_frequency_csv(snapshot, &dir.join(FREQUENCY_CSV_FILE)),
    );
    let (cloud_png, chart_png) = rasters?;
    let mut written = vec![table?];

    if let Some(bytes) = cloud_png {
        let path = dir.join(WORD_CLOUD_FILE);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    if let Some(bytes) = chart_png {
        let path = dir.join(BAR_CHART_FILE);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    if let Some(spec) = &snapshot.report.chart {
        let path = dir.join(CHART_JSON_FILE);
        fs::write(&path, spec.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    log::info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn encode_rasters(
    snapshot: &DashboardSnapshot,
    chart: &ChartConfig,
) -> Result<(Option<Vec<u8>>, Option<Vec<u8>>)> {
    let cloud = snapshot
        .word_cloud
        .as_ref()
        .map(StaticChartRenderer::encode_png)
        .transpose()?;

    let bars = match &snapshot.report.chart {
        Some(spec) => {
            let img = StaticChartRenderer::render_bar_chart(spec, chart)?;
            Some(StaticChartRenderer::encode_png(&img)?)
        }
        None => None,
    };

    Ok((cloud, bars))
}

fn write_frequency_csv(snapshot: &DashboardSnapshot, path: &Path) -> Result<PathBuf> {
    let mut df = snapshot.report.frequencies.to_dataframe()?;
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
