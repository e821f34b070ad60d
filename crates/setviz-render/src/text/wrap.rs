//! Region label wrapping.
//!
//! A region's labels are joined with `", "`, re-split on a comma plus optional whitespace, and
//! chunked into lines of at most [`LABELS_PER_LINE`] tokens joined by a bare `,`.

use super::{TextMeasurer, TextStyle};
use crate::geometry::Point;
use crate::model::LabelLine;
use regex::Regex;
use setviz_core::ElementSet;
use std::sync::OnceLock;

pub const LABELS_PER_LINE: usize = 5;

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*").expect("valid regex"))
}

/// Splits joined label text back into tokens. Trailing empty tokens are dropped.
pub fn split_label_tokens(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut tokens: Vec<&str> = separator_re().split(text).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Groups the tokens of `text` into lines of at most [`LABELS_PER_LINE`].
pub fn wrap_label_lines(text: &str) -> Vec<String> {
    split_label_tokens(text)
        .chunks(LABELS_PER_LINE)
        .map(|chunk| chunk.join(","))
        .collect()
}

/// Wraps a region's labels and positions each line centered on `anchor.x`, stacking downward
/// from `anchor.y` by one line height. Empty regions produce no lines.
pub fn wrap_region_label(
    elements: &ElementSet,
    anchor: Point,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Vec<LabelLine> {
    if elements.is_empty() {
        return Vec::new();
    }
    let line_height = measurer.line_height(style);

    wrap_label_lines(&elements.joined())
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measurer.measure(&text, style).width;
            LabelLine {
                x: anchor.x - width / 2.0,
                y: anchor.y + (i as f64) * line_height,
                width,
                text,
            }
        })
        .collect()
}
