use serde_json::json;
use setviz_core::{CalculateRequest, RegionKey, VennConfig, compute};
use setviz_render::svg::{SvgRenderOptions, render_layout_svg};
use setviz_render::text::{TextMeasurer, TextMetrics, TextStyle};
use setviz_render::{LayoutOptions, layout_calculation};
use std::sync::Arc;

/// 10px per char, 20px per line, regardless of style.
struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f64 * 10.0,
            height: 20.0,
            line_count: 1,
        }
    }
}

fn numbered(range: std::ops::RangeInclusive<usize>) -> String {
    range
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn crowded_region_wraps_five_labels_per_line() {
    let calc = compute(&CalculateRequest::new(2, "Union", [numbered(1..=12), String::new()]))
        .expect("compute ok");
    let options = LayoutOptions::default().with_text_measurer(Arc::new(FixedMeasurer));
    let layout = layout_calculation(&calc, &options).expect("layout ok");

    let only_a = layout.label(RegionKey::OnlyA).expect("onlyA label");
    let texts: Vec<&str> = only_a.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["1,2,3,4,5", "6,7,8,9,10", "11,12"]);

    assert_eq!(only_a.anchor.x, 425.0);
    assert_eq!(only_a.anchor.y, 290.0);
    let ys: Vec<f64> = only_a.lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![290.0, 310.0, 330.0]);
    assert_eq!(only_a.lines[0].x, 380.0);
    assert_eq!(only_a.lines[2].x, 400.0);
}

#[test]
fn config_overrides_reach_the_rendered_svg() {
    let config = VennConfig::from_value(json!({
        "canvas": { "width": 800, "height": 500 },
        "geometry": {
            "three": { "radius": 80 },
            "fills": [
                { "r": 10, "g": 20, "b": 30, "a": 255 },
                { "r": 0, "g": 0, "b": 255, "a": 128 },
                { "r": 0, "g": 150, "b": 0, "a": 128 }
            ]
        }
    }));
    let options = LayoutOptions::from_config(&config).expect("options ok");
    let calc = compute(&CalculateRequest::new(3, "Intersection", ["a,b", "b,c", "b"]))
        .expect("compute ok");
    let layout = layout_calculation(&calc, &options).expect("layout ok");

    assert!(layout.circles.iter().all(|c| c.radius == 80.0));
    // Canvas center is (400, 250); the diagram shifts 40px left.
    assert_eq!(layout.center.x, 360.0);
    assert_eq!(layout.center.y, 250.0);

    let svg = render_layout_svg(&layout, &SvgRenderOptions::default());
    assert!(svg.contains(r#"width="800" height="500""#));
    assert!(svg.contains(r#"r="80""#));
    assert!(svg.contains(r#"fill="rgb(10, 20, 30)" fill-opacity="1""#));
    assert!(svg.contains(r#"data-region="intersectionABC""#));
}

#[test]
fn rejected_geometry_config_is_an_error() {
    let config = VennConfig::from_value(json!({ "geometry": { "two": { "radius": "wide" } } }));
    let err = LayoutOptions::from_config(&config).expect_err("invalid radius");
    assert!(err.to_string().starts_with("invalid config: geometry"), "{err}");
}
