use crate::geometry::{Circle, Point};
use crate::text::TextStyle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use setviz_core::RegionKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// One wrapped line of region text. `(x, y)` is the left end of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabelLayout {
    pub region: RegionKey,
    pub anchor: Point,
    pub element_count: usize,
    pub lines: Vec<LabelLine>,
}

/// Everything the output side needs to draw a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VennLayout {
    pub set_count: usize,
    /// The canvas, `(0, 0)` to `(width, height)`.
    pub bounds: Bounds,
    pub center: Point,
    pub circles: Vec<Circle>,
    pub anchors: IndexMap<RegionKey, Point>,
    /// Only regions with at least one element.
    pub labels: Vec<RegionLabelLayout>,
    pub title_style: TextStyle,
    pub label_style: TextStyle,
}

impl VennLayout {
    pub fn label(&self, region: RegionKey) -> Option<&RegionLabelLayout> {
        self.labels.iter().find(|l| l.region == region)
    }

    /// Extent of circles and text, which may overflow the canvas.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let circle_points = self.circles.iter().flat_map(|c| {
            [
                (c.center.x - c.radius, c.center.y - c.radius),
                (c.center.x + c.radius, c.center.y + c.radius),
                (c.title.x, c.title.y),
            ]
        });
        let line_points = self
            .labels
            .iter()
            .flat_map(|l| l.lines.iter())
            .flat_map(|line| [(line.x, line.y), (line.x + line.width, line.y)]);
        Bounds::from_points(circle_points.chain(line_points))
    }
}
