use super::*;
use crate::geometry::Point;
use setviz_core::ElementSet;

fn labels(n: usize) -> ElementSet {
    (1..=n).map(|i| format!("e{i}")).collect()
}

#[test]
fn deterministic_measurer_uses_default_factors() {
    let m = DeterministicTextMeasurer::default().measure("abcd", &TextStyle::region_label());
    assert_eq!(m.width, 4.0 * 12.0 * 0.6);
    assert_eq!(m.line_count, 1);
    assert!((m.height - 14.4).abs() < 1e-9);
}

#[test]
fn line_height_is_per_line() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.5,
    };
    assert_eq!(measurer.line_height(&TextStyle::set_title()), 24.0);
}

#[test]
fn tokens_split_on_comma_and_optional_whitespace() {
    assert_eq!(split_label_tokens("a, b,c,  d"), vec!["a", "b", "c", "d"]);
    assert_eq!(split_label_tokens("two words, x"), vec!["two words", "x"]);
    assert!(split_label_tokens("").is_empty());
}

#[test]
fn lines_hold_at_most_five_tokens_joined_without_spaces() {
    let lines = wrap_label_lines("1, 2, 3, 4, 5, 6, 7");
    assert_eq!(lines, vec!["1,2,3,4,5".to_string(), "6,7".to_string()]);
}

#[test]
fn line_count_is_ceil_of_elements_over_five() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle::region_label();
    for k in 0..=16usize {
        let set = labels(k);
        let lines = wrap_region_label(&set, Point::new(0.0, 0.0), &measurer, &style);
        assert_eq!(lines.len(), k.div_ceil(LABELS_PER_LINE), "k = {k}");

        let tokens: Vec<String> = lines
            .iter()
            .flat_map(|l| l.text.split(',').map(str::to_string).collect::<Vec<_>>())
            .collect();
        let expected: Vec<String> = set.iter().map(str::to_string).collect();
        assert_eq!(tokens, expected, "k = {k}");
    }
}

#[test]
fn lines_are_centered_and_stacked_from_anchor() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle::region_label();
    let set = ElementSet::parse("aa,bb,cc,dd,ee,f");
    let anchor = Point::new(200.0, 100.0);

    let lines = wrap_region_label(&set, anchor, &measurer, &style);
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0].text, "aa,bb,cc,dd,ee");
    let w0 = 14.0 * 12.0 * 0.6;
    assert_eq!(lines[0].width, w0);
    assert_eq!(lines[0].x, 200.0 - w0 / 2.0);
    assert_eq!(lines[0].y, 100.0);

    assert_eq!(lines[1].text, "f");
    assert_eq!(lines[1].x, 200.0 - (12.0 * 0.6) / 2.0);
    assert!((lines[1].y - (100.0 + 14.4)).abs() < 1e-9);
}

#[test]
fn empty_region_renders_nothing() {
    let lines = wrap_region_label(
        &ElementSet::new(),
        Point::new(10.0, 10.0),
        &DeterministicTextMeasurer::default(),
        &TextStyle::region_label(),
    );
    assert!(lines.is_empty());
}
