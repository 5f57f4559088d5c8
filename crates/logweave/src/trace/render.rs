use std::fmt::Write;

use super::model::{Span, SpanView};

pub const NO_SPAN_DATA: &str = "no span data available";

/// One line per span, two spaces of indent per depth:
///
/// ```text
/// span-001 [api-gateway] 2848ms
///   span-002 [payment-service] 37ms ERROR
/// ```
pub fn render_tree(view: &SpanView) -> String {
    let Some(forest) = view.forest() else {
        return format!("{}\n", NO_SPAN_DATA);
    };

    let mut out = String::new();
    for (depth, span) in forest.walk() {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), describe(span));
    }
    if !forest.detached.is_empty() {
        let _ = writeln!(out, "detached: {}", forest.detached.join(", "));
    }
    out
}

fn describe(span: &Span) -> String {
    let mut line = format!("{} [{}]", span.span_id, span.service);
    match span.duration_ms {
        Some(ms) => {
            let _ = write!(line, " {}ms", ms);
        }
        None => line.push_str(" -"),
    }
    if span.has_error {
        line.push_str(" ERROR");
    }
    if span.has_warning {
        line.push_str(" WARN");
    }
    line
}
