//! Word cloud layout.
//!
//! Words are placed largest first along an Archimedean spiral starting at
//! the canvas centre. A word that finds no free slot is retried 10% smaller
//! until it drops under the minimum font size, then skipped.

use super::spec::{sample_scale, VIRIDIS};
use crate::analysis::FrequencyTable;
use crate::config::WordCloudConfig;

/// Radians advanced per spiral step.
const SPIRAL_STEP: f32 = 0.2;
/// Pixels the radius grows per radian.
const SPIRAL_GROWTH: f32 = 3.0;
const SHRINK_FACTOR: f32 = 0.9;

/// Pixel extent of a string at a font size.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32);
}

/// Font-independent approximation: 0.6 em per character, 1.15 em line.
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimatedMeasure;

impl TextMeasure for EstimatedMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        let chars = text.chars().count() as f32;
        (
            (0.6 * font_size * chars).ceil() as u32,
            (1.15 * font_size).ceil() as u32,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    /// Top-left corner of the text box.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: [u8; 3],
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        Rect::new(self.x, self.y, self.width, self.height).intersects(&Rect::new(
            other.x,
            other.y,
            other.width,
            other.height,
        ))
    }
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w: w as i32,
            h: h as i32,
        }
    }

    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lay out at most `config.max_words` words from `frequencies`.
pub fn layout_word_cloud(
    frequencies: &FrequencyTable,
    config: &WordCloudConfig,
    measure: &dyn TextMeasure,
) -> WordCloudLayout {
    let mut ranked = frequencies.ranked();
    ranked.truncate(config.max_words);

    let mut layout = WordCloudLayout {
        width: config.width,
        height: config.height,
        words: Vec::with_capacity(ranked.len()),
    };
    let Some(max_count) = ranked.first().map(|r| r.count) else {
        return layout;
    };

    let rs = config.relative_scaling.clamp(0.0, 1.0);
    let margin = config.margin as i32;
    let color_span = ranked.len().saturating_sub(1).max(1) as f64;
    let mut occupied: Vec<Rect> = Vec::with_capacity(ranked.len());
    let mut last_size = config.max_font_size;

    for (rank, term) in ranked.iter().enumerate() {
        let relative = term.count as f32 / max_count as f32;
        let mut size = (config.max_font_size * (rs * relative + (1.0 - rs))).min(last_size);

        while size >= config.min_font_size {
            let (w, h) = measure.measure(&term.term, size);
            let boxed_w = w + 2 * config.margin;
            let boxed_h = h + 2 * config.margin;

            if boxed_w <= config.width && boxed_h <= config.height {
                if let Some(slot) = find_slot(boxed_w, boxed_h, config, &occupied) {
                    occupied.push(slot);
                    layout.words.push(PlacedWord {
                        text: term.term.clone(),
                        count: term.count,
                        font_size: size,
                        x: slot.x + margin,
                        y: slot.y + margin,
                        width: w,
                        height: h,
                        color: sample_scale(&VIRIDIS, rank as f64 / color_span),
                    });
                    last_size = size;
                    break;
                }
            }
            size *= SHRINK_FACTOR;
        }

        if size < config.min_font_size {
            log::debug!("No room left for '{}'", term.term);
        }
    }

    layout
}

fn find_slot(w: u32, h: u32, config: &WordCloudConfig, occupied: &[Rect]) -> Option<Rect> {
    let cx = config.width as f32 / 2.0;
    let cy = config.height as f32 / 2.0;
    let max_radius = (cx * cx + cy * cy).sqrt();
    let aspect = config.height as f32 / config.width.max(1) as f32;

    let mut t = 0.0f32;
    loop {
        let radius = SPIRAL_GROWTH * t;
        if radius > max_radius {
            return None;
        }

        let x = (cx + radius * t.cos() - w as f32 / 2.0).round() as i32;
        let y = (cy + radius * t.sin() * aspect - h as f32 / 2.0).round() as i32;
        let candidate = Rect::new(x, y, w, h);

        let inside = x >= 0
            && y >= 0
            && x + w as i32 <= config.width as i32
            && y + h as i32 <= config.height as i32;
        if inside && !occupied.iter().any(|r| r.intersects(&candidate)) {
            return Some(candidate);
        }

        t += SPIRAL_STEP;
    }
}
