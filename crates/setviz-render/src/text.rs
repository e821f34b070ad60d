mod wrap;

pub use wrap::{LABELS_PER_LINE, split_label_tokens, wrap_label_lines, wrap_region_label};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    /// Region element text: plain 12px.
    pub fn region_label() -> Self {
        Self {
            font_family: Some("Arial".to_string()),
            font_size: 12.0,
            font_weight: None,
        }
    }

    /// Set names above/below the circles: bold 16px.
    pub fn set_title() -> Self {
        Self {
            font_family: Some("Arial".to_string()),
            font_size: 16.0,
            font_weight: Some("bold".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Vertical distance between consecutive baselines.
    fn line_height(&self, style: &TextStyle) -> f64 {
        let m = self.measure("M", style);
        m.height / (m.line_count.max(1) as f64)
    }
}

/// Font-independent measurer: every char is `font_size * char_width_factor` wide and every line
/// `font_size * line_height_factor` tall. Zero factors fall back to `0.6` and `1.2`.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let out = text.split('\n').map(|s| s.to_string()).collect::<Vec<_>>();
        if out.is_empty() {
            return vec!["".to_string()];
        }
        out
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let width = max_chars as f64 * font_size * char_width_factor;
        let height = lines.len() as f64 * font_size * line_height_factor;
        TextMetrics {
            width,
            height,
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests;
