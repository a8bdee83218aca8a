//! Chart specifications and colour scales shared by the interactive and
//! static renderers.

use crate::analysis::RankedTerm;
use serde::{Deserialize, Serialize};

/// Continuous scale for the bar chart, dark to light green.
pub const GREEN_SCALE: [[u8; 3]; 5] = [
    [0x00, 0x33, 0x00],
    [0x00, 0x66, 0x00],
    [0x00, 0x99, 0x33],
    [0x33, 0xcc, 0x33],
    [0x99, 0xff, 0x99],
];

/// Viridis, sampled at nine evenly spaced stops.
pub const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Linear interpolation over `stops` at `t` in [0, 1].
pub fn sample_scale(stops: &[[u8; 3]], t: f64) -> [u8; 3] {
    match stops.len() {
        0 => return [0, 0, 0],
        1 => return stops[0],
        _ => {}
    }

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (stops.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(stops.len() - 1);
    let frac = pos - lo as f64;

    let mut out = [0u8; 3];
    for (c, channel) in out.iter_mut().enumerate() {
        let a = stops[lo][c] as f64;
        let b = stops[hi][c] as f64;
        *channel = (a + (b - a) * frac).round() as u8;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub color: [u8; 3],
}

/// Bar chart description: categorical x axis in the given order, counts on
/// the y axis, value labels drawn above each bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChartSpec {
    /// Build from a ranked table. Colours follow [`GREEN_SCALE`] from the
    /// smallest to the largest value shown.
    pub fn from_ranked(ranked: &[RankedTerm]) -> Self {
        let min = ranked.iter().map(|r| r.count).min().unwrap_or(0);
        let max = ranked.iter().map(|r| r.count).max().unwrap_or(0);
        let span = (max - min) as f64;

        let bars = ranked
            .iter()
            .map(|r| {
                let t = if span > 0.0 {
                    (r.count - min) as f64 / span
                } else {
                    1.0
                };
                Bar {
                    label: r.term.clone(),
                    value: r.count,
                    color: sample_scale(&GREEN_SCALE, t),
                }
            })
            .collect();

        Self {
            title: "Contagem de palavras".to_string(),
            x_label: "Percepção".to_string(),
            y_label: "Frequência".to_string(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rows: &[(&str, usize)]) -> Vec<RankedTerm> {
        rows.iter()
            .map(|(t, c)| RankedTerm {
                term: t.to_string(),
                count: *c,
            })
            .collect()
    }

    #[test]
    fn bars_keep_rank_order() {
        let spec = BarChartSpec::from_ranked(&ranked(&[("lixo", 3), ("reciclagem", 1), ("bom", 1)]));
        let labels: Vec<&str> = spec.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["lixo", "reciclagem", "bom"]);
        assert_eq!(spec.max_value(), 3);
        assert_eq!(spec.x_label, "Percepção");
        assert_eq!(spec.y_label, "Frequência");
    }

    #[test]
    fn colours_span_the_green_scale() {
        let spec = BarChartSpec::from_ranked(&ranked(&[("a", 9), ("b", 5), ("c", 1)]));
        assert_eq!(spec.bars[0].color, GREEN_SCALE[4]);
        assert_eq!(spec.bars[2].color, GREEN_SCALE[0]);
    }

    #[test]
    fn sample_scale_hits_stops_and_clamps() {
        assert_eq!(sample_scale(&VIRIDIS, 0.0), VIRIDIS[0]);
        assert_eq!(sample_scale(&VIRIDIS, 1.0), VIRIDIS[8]);
        assert_eq!(sample_scale(&VIRIDIS, 0.5), VIRIDIS[4]);
        assert_eq!(sample_scale(&VIRIDIS, 7.0), VIRIDIS[8]);
        assert_eq!(sample_scale(&VIRIDIS, f64::NAN), VIRIDIS[0]);
    }

    #[test]
    fn json_export_contains_bars() {
        let spec = BarChartSpec::from_ranked(&ranked(&[("lixo", 2)]));
        let json = spec.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bars"][0]["label"], "lixo");
        assert_eq!(value["bars"][0]["value"], 2);
    }
}
