//! Static Chart Renderer
//! Rasterizes the word cloud and the frequency bar chart with plotters'
//! bitmap backend, for display textures and PNG export.

use super::layout::{layout_word_cloud, EstimatedMeasure, TextMeasure, WordCloudLayout};
use super::spec::BarChartSpec;
use crate::analysis::FrequencyTable;
use crate::config::{ChartConfig, WordCloudConfig};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::io::Cursor;
use thiserror::Error;

const FONT_FAMILY: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to draw")]
    Empty,
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Pixel buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Measures text with the fonts the bitmap backend will draw with.
struct FontMeasure<'a, 'b> {
    area: &'a DrawingArea<BitMapBackend<'b>, Shift>,
}

impl TextMeasure for FontMeasure<'_, '_> {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        let style = TextStyle::from((FONT_FAMILY, font_size as f64).into_font());
        self.area
            .estimate_text_size(text, &style)
            .unwrap_or_else(|_| EstimatedMeasure.measure(text, font_size))
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Lay out and draw the word cloud on a white canvas.
    pub fn render_word_cloud(
        frequencies: &FrequencyTable,
        config: &WordCloudConfig,
    ) -> Result<RgbImage, ChartError> {
        if frequencies.is_empty() {
            return Err(ChartError::Empty);
        }

        let (width, height) = (config.width, config.height);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let layout = layout_word_cloud(frequencies, config, &FontMeasure { area: &root });
            log::debug!(
                "Word cloud: {} of {} words placed",
                layout.words.len(),
                frequencies.len()
            );

            Self::draw_word_cloud(&root, &layout)
                .and_then(|_| root.present().map_err(Into::into))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer(width, height))
    }

    fn draw_word_cloud(
        root: &DrawingArea<BitMapBackend, Shift>,
        layout: &WordCloudLayout,
    ) -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;

        for word in &layout.words {
            let color = RGBColor(word.color[0], word.color[1], word.color[2]);
            let style = TextStyle::from((FONT_FAMILY, word.font_size as f64).into_font()).color(&color);
            root.draw(&Text::new(word.text.clone(), (word.x, word.y), style))?;
        }
        Ok(())
    }

    /// Draw the ranked bar chart with value labels above the bars.
    pub fn render_bar_chart(
        spec: &BarChartSpec,
        config: &ChartConfig,
    ) -> Result<RgbImage, ChartError> {
        if spec.is_empty() {
            return Err(ChartError::Empty);
        }

        let (width, height) = (config.width, config.height);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw_bar_chart(&root, spec)
                .and_then(|_| root.present().map_err(Into::into))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(ChartError::Buffer(width, height))
    }

    fn draw_bar_chart(
        root: &DrawingArea<BitMapBackend, Shift>,
        spec: &BarChartSpec,
    ) -> Result<(), Box<dyn Error>> {
        root.fill(&WHITE)?;

        let n = spec.bars.len() as u32;
        // Headroom for the value labels
        let y_max = (spec.max_value() as f64 * 1.15).ceil() as u32 + 1;
        let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT_FAMILY, 22))
            .margin(15)
            .x_label_area_size(70)
            .y_label_area_size(50)
            .build_cartesian_2d((0..n).into_segmented(), 0u32..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()?;

        chart.draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            let color = RGBColor(bar.color[0], bar.color[1], bar.color[2]);
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i as u32), 0u32),
                    (SegmentValue::Exact(i as u32 + 1), bar.value as u32),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, 8, 8);
            rect
        }))?;

        let value_style = TextStyle::from((FONT_FAMILY, 14).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(spec.bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                bar.value.to_string(),
                (SegmentValue::CenterOf(i as u32), bar.value as u32),
                value_style.clone(),
            )
        }))?;

        Ok(())
    }

    /// PNG bytes of a rendered image.
    pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, ChartError> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}
