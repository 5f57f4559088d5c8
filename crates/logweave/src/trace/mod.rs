//! Trace module: span-tree reconstruction from analysed timeline events.

pub mod clock;
pub mod model;
pub mod render;
pub mod tree;

pub use clock::{clock_fragment, clock_millis};
pub use model::{OrphanPolicy, Span, SpanForest, SpanIds, SpanView};
pub use render::{render_tree, NO_SPAN_DATA};
pub use tree::{reconstruct_spans, SpanTreeBuilder};
