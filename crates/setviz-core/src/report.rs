use crate::Calculation;
use std::fmt::Write as _;

/// Sentinel printed in place of an empty result set.
pub const EMPTY_RESULT: &str = "None";

/// Renders the human-readable summary shown next to the diagram:
///
/// ```text
/// Operation: Union
///
/// Set A: [1, 2, 3]
/// Set B: [2, 3, 4]
///
/// Result: [1, 2, 3, 4]
/// ```
pub fn render_report(calc: &Calculation) -> String {
    let mut out = String::new();
    let _ = write!(&mut out, "Operation: {}\n\n", calc.operation.display_name());

    for set in calc.sets.iter() {
        let _ = writeln!(&mut out, "Set {}: {}", set.name(), set.labels);
    }

    out.push_str("\nResult: ");
    if calc.result.is_empty() {
        out.push_str(EMPTY_RESULT);
    } else {
        let _ = write!(&mut out, "{}", calc.result);
    }
    out
}
