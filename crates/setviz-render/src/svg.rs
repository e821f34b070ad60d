mod util;

use crate::model::VennLayout;
use crate::text::TextStyle;
use std::fmt::Write as _;
use util::{escape_xml, fmt};

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`.
    pub diagram_id: Option<String>,
    /// Overrides the font family of both set titles and region text.
    pub font_family: Option<String>,
    /// Canvas background; `None` leaves it transparent.
    pub background: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            font_family: None,
            background: Some("white".to_string()),
        }
    }
}

fn font_attrs(style: &TextStyle, family_override: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(family) = family_override.or(style.font_family.as_deref()) {
        let _ = write!(&mut out, r#" font-family="{}""#, escape_xml(family));
    }
    let _ = write!(&mut out, r#" font-size="{}""#, fmt(style.font_size));
    if let Some(weight) = style.font_weight.as_deref() {
        let _ = write!(&mut out, r#" font-weight="{}""#, escape_xml(weight));
    }
    out
}

/// Renders `layout` as a standalone SVG document sized to the layout canvas.
///
/// Draw order: background, translucent circle fills, outlines, set titles, region text. Text
/// that overflows its region is drawn as-is.
pub fn render_layout_svg(layout: &VennLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("setviz");
    let diagram_id_esc = escape_xml(diagram_id);

    let b = &layout.bounds;
    let vb_w = b.width().max(1.0);
    let vb_h = b.height().max(1.0);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" role="graphics-document document" aria-roledescription="venn" data-sets="{n}">"#,
        id = diagram_id_esc,
        x = fmt(b.min_x),
        y = fmt(b.min_y),
        w = fmt(vb_w),
        h = fmt(vb_h),
        n = layout.set_count,
    );

    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect class="background" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = fmt(b.min_x),
            y = fmt(b.min_y),
            w = fmt(vb_w),
            h = fmt(vb_h),
            fill = escape_xml(bg),
        );
    }

    out.push_str(r#"<g class="venn-fills">"#);
    for c in &layout.circles {
        let _ = write!(
            &mut out,
            r#"<circle class="venn-set venn-set-{name}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" fill-opacity="{op}"/>"#,
            name = escape_xml(&c.name),
            cx = fmt(c.center.x),
            cy = fmt(c.center.y),
            r = fmt(c.radius),
            fill = c.fill.css_rgb(),
            op = fmt(c.fill.opacity()),
        );
    }
    out.push_str("</g>");

    // Outlines go on top of every fill so overlaps never hide an edge.
    out.push_str(r#"<g class="venn-outlines">"#);
    for c in &layout.circles {
        let _ = write!(
            &mut out,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{stroke}" stroke-opacity="{op}"/>"#,
            cx = fmt(c.center.x),
            cy = fmt(c.center.y),
            r = fmt(c.radius),
            stroke = c.outline.css_rgb(),
            op = fmt(c.outline.opacity()),
        );
    }
    out.push_str("</g>");

    let family = options.font_family.as_deref();

    let title_attrs = font_attrs(&layout.title_style, family);
    out.push_str(r#"<g class="venn-titles">"#);
    for c in &layout.circles {
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}"{attrs}>{text}</text>"#,
            x = fmt(c.title.x),
            y = fmt(c.title.y),
            attrs = title_attrs,
            text = escape_xml(&c.name),
        );
    }
    out.push_str("</g>");

    let label_attrs = font_attrs(&layout.label_style, family);
    out.push_str(r#"<g class="venn-labels">"#);
    for region in &layout.labels {
        let _ = write!(
            &mut out,
            r#"<g class="venn-region" data-region="{key}">"#,
            key = region.region.as_str()
        );
        for line in &region.lines {
            let _ = write!(
                &mut out,
                r#"<text x="{x}" y="{y}"{attrs}>{text}</text>"#,
                x = fmt(line.x),
                y = fmt(line.y),
                attrs = label_attrs,
                text = escape_xml(&line.text),
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayoutOptions, layout_calculation};
    use setviz_core::{CalculateRequest, compute};

    fn render(n: usize, sets: &[&str], options: &SvgRenderOptions) -> String {
        let calc = compute(&CalculateRequest::new(n, "Union", sets.iter().copied())).unwrap();
        let layout = layout_calculation(&calc, &LayoutOptions::default()).unwrap();
        render_layout_svg(&layout, options)
    }

    #[test]
    fn two_set_svg_has_two_filled_and_outlined_circles() {
        let svg = render(2, &["1,2,3", "2,3,4"], &SvgRenderOptions::default());
        assert!(svg.starts_with(r#"<svg id="setviz" width="1000" height="600""#));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains(
            r#"<circle class="venn-set venn-set-A" cx="450" cy="300" r="100" fill="rgb(255, 0, 0)" fill-opacity="0.502"/>"#
        ));
        assert!(svg.contains(r#"fill="rgb(0, 0, 255)""#));
        assert!(svg.contains(r#"font-weight="bold">A</text>"#));
        assert!(svg.contains(r#"data-region="intersectionAB""#));
        assert!(svg.contains(">2,3</text>"));
    }

    #[test]
    fn three_set_svg_skips_empty_regions() {
        let svg = render(3, &["a,b", "b,c", "c,a"], &SvgRenderOptions::default());
        assert_eq!(svg.matches("<circle").count(), 6);
        assert_eq!(svg.matches(r#"class="venn-region""#).count(), 3);
        assert!(!svg.contains(r#"data-region="onlyA""#));
        assert!(svg.contains(">C</text>"));
    }

    #[test]
    fn label_text_is_xml_escaped() {
        let svg = render(2, &["<a>&b", ""], &SvgRenderOptions::default());
        assert!(svg.contains("&lt;a&gt;&amp;b"));
        assert!(!svg.contains("<a>"));
    }

    #[test]
    fn background_and_font_family_are_configurable() {
        let options = SvgRenderOptions {
            diagram_id: Some("demo".to_string()),
            font_family: Some("Helvetica".to_string()),
            background: None,
        };
        let svg = render(2, &["x", "y"], &options);
        assert!(svg.starts_with(r#"<svg id="demo""#));
        assert!(!svg.contains(r#"class="background""#));
        assert!(svg.contains(r#"font-family="Helvetica""#));
        assert!(!svg.contains(r#"font-family="Arial""#));
    }
}
