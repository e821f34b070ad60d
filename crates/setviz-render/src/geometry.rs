//! Fixed circle arrangements for two- and three-set Venn diagrams.
//!
//! All distances are canvas pixels. Circles never rescale to fit their text; only the diagram
//! center follows the canvas size.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use setviz_core::{RegionKey, SetCount, VennConfig, set_name};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Offset) -> Self {
        Self::new(self.x + by.dx, self.y + by.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A region anchor relative to the diagram center: `(dx + radius_x * r, dy + radius_y * r)`.
///
/// The radius multiples keep anchors that hug a circle edge in place when the radius changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnchorOffset {
    pub dx: f64,
    pub dy: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl AnchorOffset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            radius_x: 0.0,
            radius_y: 0.0,
        }
    }

    pub const fn with_radius(mut self, radius_x: f64, radius_y: f64) -> Self {
        self.radius_x = radius_x;
        self.radius_y = radius_y;
        self
    }

    fn resolve(self, radius: f64) -> Offset {
        Offset::new(
            self.dx + self.radius_x * radius,
            self.dy + self.radius_y * radius,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub set_index: usize,
    /// `A`, `B` or `C`.
    pub name: String,
    pub center: Point,
    pub radius: f64,
    pub fill: Rgba,
    pub outline: Rgba,
    /// Baseline position of the set name.
    pub title: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwoSetGeometry {
    pub radius: f64,
    /// Horizontal distance pushing the circles apart from the diagram center.
    pub gap: f64,
    /// Extra horizontal shift applied to every region anchor.
    pub value_x_offset: f64,
    /// Set name positions, relative to the top of each circle.
    pub title_a: Offset,
    pub title_b: Offset,
    /// Region anchors, relative to the diagram center.
    pub anchors: IndexMap<RegionKey, AnchorOffset>,
}

impl Default for TwoSetGeometry {
    fn default() -> Self {
        Self {
            radius: 100.0,
            gap: 10.0,
            value_x_offset: 55.0,
            title_a: Offset::new(-13.0, -15.0),
            title_b: Offset::new(-5.0, -15.0),
            anchors: IndexMap::from([
                (
                    RegionKey::OnlyA,
                    AnchorOffset::new(10.0, -10.0).with_radius(-1.0, 0.0),
                ),
                (
                    RegionKey::OnlyB,
                    AnchorOffset::new(-20.0, -10.0).with_radius(1.0, 0.0),
                ),
                (RegionKey::IntersectionAB, AnchorOffset::new(-5.0, -10.0)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreeSetGeometry {
    pub radius: f64,
    /// Pairwise offset between A and B, and the vertical drop of C below them.
    pub offset: f64,
    /// Horizontal shift of C's bounding box left edge from the diagram center.
    pub c_x_offset: f64,
    pub value_x_offset: f64,
    /// A and B name positions are relative to the top of their circle.
    pub title_a: Offset,
    pub title_b: Offset,
    /// C's name: `dx` from the diagram center, `dy` below the bottom of circle C.
    pub title_c: Offset,
    pub anchors: IndexMap<RegionKey, AnchorOffset>,
}

impl Default for ThreeSetGeometry {
    fn default() -> Self {
        Self {
            radius: 100.0,
            offset: 10.0,
            c_x_offset: -50.0,
            value_x_offset: 0.0,
            title_a: Offset::new(-8.0, -15.0),
            title_b: Offset::new(-8.0, -15.0),
            title_c: Offset::new(45.0, 20.0),
            anchors: IndexMap::from([
                (
                    RegionKey::OnlyA,
                    AnchorOffset::new(50.0, -20.0).with_radius(-1.0, 0.0),
                ),
                (
                    RegionKey::OnlyB,
                    AnchorOffset::new(30.0, -20.0).with_radius(1.0, 0.0),
                ),
                (
                    RegionKey::OnlyC,
                    AnchorOffset::new(45.0, 45.0).with_radius(0.0, 1.0),
                ),
                (RegionKey::IntersectionAB, AnchorOffset::new(50.0, -30.0)),
                (RegionKey::IntersectionAC, AnchorOffset::new(-10.0, 70.0)),
                (RegionKey::IntersectionBC, AnchorOffset::new(100.0, 70.0)),
                (RegionKey::IntersectionABC, AnchorOffset::new(50.0, 40.0)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Horizontal shift of the whole diagram from the canvas center.
    pub diagram_x_offset: f64,
    /// Fill per set, in `A, B, C` order.
    pub fills: Vec<Rgba>,
    pub outline: Rgba,
    pub two: TwoSetGeometry,
    pub three: ThreeSetGeometry,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            diagram_x_offset: -40.0,
            fills: vec![
                Rgba::new(255, 0, 0, 128),
                Rgba::new(0, 0, 255, 128),
                Rgba::new(0, 150, 0, 128),
            ],
            outline: Rgba::BLACK,
            two: TwoSetGeometry::default(),
            three: ThreeSetGeometry::default(),
        }
    }
}

impl GeometryConfig {
    /// Applies `geometry.*` overrides from `config` on top of the defaults.
    pub fn from_venn_config(config: &VennConfig) -> Result<Self> {
        let Some(overrides) = config.get("geometry") else {
            return Ok(Self::default());
        };
        let mut merged = VennConfig::from_value(serde_json::to_value(Self::default())?);
        merged.deep_merge(overrides);

        let geometry: Self =
            serde_json::from_value(merged.as_value().clone()).map_err(|e| Error::InvalidConfig {
                message: format!("geometry: {e}"),
            })?;
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        for (path, radius) in [
            ("geometry.two.radius", self.two.radius),
            ("geometry.three.radius", self.three.radius),
        ] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("{path} must be a positive number, got {radius}"),
                });
            }
        }
        if self.fills.len() < setviz_core::MAX_SETS {
            return Err(Error::InvalidConfig {
                message: format!(
                    "geometry.fills needs {} colors, got {}",
                    setviz_core::MAX_SETS,
                    self.fills.len()
                ),
            });
        }
        Ok(())
    }

    fn fill(&self, set_index: usize) -> Rgba {
        self.fills
            .get(set_index)
            .copied()
            .unwrap_or(Rgba::new(128, 128, 128, 128))
    }
}

/// Circles and region anchors for one canvas size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramGeometry {
    pub set_count: usize,
    pub center: Point,
    pub circles: Vec<Circle>,
    pub anchors: IndexMap<RegionKey, Point>,
}

impl DiagramGeometry {
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn anchor(&self, key: RegionKey) -> Option<Point> {
        self.anchors.get(&key).copied()
    }
}

/// Lays out the canonical arrangement for `count` sets on a `width` x `height` canvas.
///
/// Counts other than 2 and 3 have no arrangement and produce an empty geometry.
pub fn layout_geometry(
    count: usize,
    width: f64,
    height: f64,
    config: &GeometryConfig,
) -> DiagramGeometry {
    // Whole-pixel center, as integer canvas halves.
    let center = Point::new(
        (width / 2.0).floor() + config.diagram_x_offset,
        (height / 2.0).floor(),
    );
    let geometry = match SetCount::try_from(count) {
        Ok(SetCount::Two) => layout_two(center, config),
        Ok(SetCount::Three) => layout_three(center, config),
        Err(_) => DiagramGeometry {
            set_count: count,
            center,
            ..Default::default()
        },
    };
    tracing::trace!(
        set_count = count,
        circles = geometry.circles.len(),
        cx = center.x,
        cy = center.y,
        "laid out venn geometry"
    );
    geometry
}

fn circle(
    config: &GeometryConfig,
    set_index: usize,
    center: Point,
    radius: f64,
    title: Point,
) -> Circle {
    Circle {
        set_index,
        name: set_name(set_index).to_string(),
        center,
        radius,
        fill: config.fill(set_index),
        outline: config.outline,
        title,
    }
}

fn top(center: Point, radius: f64) -> Point {
    Point::new(center.x, center.y - radius)
}

fn anchors(
    center: Point,
    offsets: &IndexMap<RegionKey, AnchorOffset>,
    count: SetCount,
    radius: f64,
    value_x_offset: f64,
) -> IndexMap<RegionKey, Point> {
    RegionKey::for_count(count)
        .iter()
        .filter_map(|&key| {
            let offset = offsets.get(&key)?.resolve(radius);
            Some((
                key,
                center.offset(Offset::new(offset.dx + value_x_offset, offset.dy)),
            ))
        })
        .collect()
}

fn layout_two(center: Point, config: &GeometryConfig) -> DiagramGeometry {
    let g = &config.two;
    let r = g.radius;

    let a = Point::new(center.x - g.gap, center.y);
    let b = Point::new(center.x + g.gap + r, center.y);

    DiagramGeometry {
        set_count: 2,
        center,
        circles: vec![
            circle(config, 0, a, r, top(a, r).offset(g.title_a)),
            circle(config, 1, b, r, top(b, r).offset(g.title_b)),
        ],
        anchors: anchors(center, &g.anchors, SetCount::Two, r, g.value_x_offset),
    }
}

fn layout_three(center: Point, config: &GeometryConfig) -> DiagramGeometry {
    let g = &config.three;
    let r = g.radius;

    let a = Point::new(center.x - g.offset, center.y);
    let b = Point::new(center.x + g.offset + r, center.y);
    let c = Point::new(center.x + g.c_x_offset + r, center.y + g.offset + r);

    DiagramGeometry {
        set_count: 3,
        center,
        circles: vec![
            circle(config, 0, a, r, top(a, r).offset(g.title_a)),
            circle(config, 1, b, r, top(b, r).offset(g.title_b)),
            circle(
                config,
                2,
                c,
                r,
                Point::new(center.x + g.title_c.dx, c.y + r + g.title_c.dy),
            ),
        ],
        anchors: anchors(center, &g.anchors, SetCount::Three, r, g.value_x_offset),
    }
}
