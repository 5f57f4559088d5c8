use std::collections::{BTreeMap, HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::TimelineEvent;

/// What to do with a span whose parent id names no span in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Show it as a forest root
    #[default]
    Promote,
    /// Leave it out of the forest (still listed in `detached`)
    Drop,
}

impl std::str::FromStr for OrphanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promote" => Ok(OrphanPolicy::Promote),
            "drop" => Ok(OrphanPolicy::Drop),
            other => Err(format!("unknown orphan policy: {}", other)),
        }
    }
}

/// Trace identifiers resolved for one timeline event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanIds {
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub parent_span_id: Option<String>,
}

/// One unit of work, derived from the timeline events sharing its span id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub span_id: String,
    pub trace_id: Option<String>,
    /// Service of the first event seen for this span
    pub service: String,
    pub parent_span_id: Option<String>,
    pub events: Vec<TimelineEvent>,
    /// Earliest event time, milliseconds since midnight
    pub start_ms: Option<u64>,
    /// Latest event time, milliseconds since midnight
    pub end_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    pub has_error: bool,
    pub has_warning: bool,
}

impl Span {
    pub(crate) fn new(span_id: String, service: String, ids: &SpanIds) -> Self {
        Self {
            span_id,
            trace_id: ids.trace_id.clone(),
            service,
            parent_span_id: ids.parent_span_id.clone(),
            events: Vec::new(),
            start_ms: None,
            end_ms: None,
            duration_ms: None,
            has_error: false,
            has_warning: false,
        }
    }

    /// Widen the time bounds to include `at` (milliseconds since midnight).
    pub(crate) fn observe(&mut self, at: u64) {
        let start = self.start_ms.map_or(at, |s| s.min(at));
        let end = self.end_ms.map_or(at, |e| e.max(at));
        self.start_ms = Some(start);
        self.end_ms = Some(end);
        self.duration_ms = Some(end - start);
    }
}

/// Call hierarchy rebuilt from correlated events.
#[derive(Debug, Clone, Serialize)]
pub struct SpanForest {
    /// Spans in first-discovery order
    pub spans: Vec<Span>,
    /// Root span ids, in discovery order
    pub roots: Vec<String>,
    /// Parent span id → child span ids, siblings in discovery order
    pub children: BTreeMap<String, Vec<String>>,
    /// Spans unreachable from any root (dropped orphans, parent cycles)
    pub detached: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SpanForest {
    pub(crate) fn new(
        spans: Vec<Span>,
        roots: Vec<String>,
        children: BTreeMap<String, Vec<String>>,
    ) -> Self {
        let index = spans
            .iter()
            .enumerate()
            .map(|(i, s)| (s.span_id.clone(), i))
            .collect();

        let mut forest = Self {
            spans,
            roots,
            children,
            detached: Vec::new(),
            index,
        };

        let reachable: HashSet<String> = forest
            .walk()
            .into_iter()
            .map(|(_, span)| span.span_id.clone())
            .collect();

        forest.detached = forest
            .spans
            .iter()
            .filter(|s| !reachable.contains(&s.span_id))
            .map(|s| s.span_id.clone())
            .collect();

        forest
    }

    pub fn get(&self, span_id: &str) -> Option<&Span> {
        self.index.get(span_id).map(|&i| &self.spans[i])
    }

    pub fn roots(&self) -> impl Iterator<Item = &Span> {
        self.roots.iter().filter_map(|id| self.get(id))
    }

    pub fn children_of(&self, span_id: &str) -> impl Iterator<Item = &Span> {
        self.children
            .get(span_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.get(id))
    }

    /// Depth-first, pre-order walk from every root: `(depth, span)`.
    /// Each span is visited at most once, so parent cycles terminate.
    pub fn walk(&self) -> Vec<(usize, &Span)> {
        let mut out = Vec::with_capacity(self.spans.len());
        let mut visited = HashSet::new();
        let roots: Vec<&Span> = self.roots().collect();
        let mut stack: Vec<(usize, &Span)> = roots.into_iter().rev().map(|s| (0, s)).collect();

        while let Some((depth, span)) = stack.pop() {
            if !visited.insert(span.span_id.as_str()) {
                continue;
            }
            out.push((depth, span));

            let children: Vec<&Span> = self.children_of(&span.span_id).collect();
            for child in children.into_iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Outcome of span reconstruction.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpanView {
    /// No event carried a resolvable span id
    NoSpanData,
    Forest(SpanForest),
}

impl SpanView {
    pub fn forest(&self) -> Option<&SpanForest> {
        match self {
            SpanView::Forest(forest) => Some(forest),
            SpanView::NoSpanData => None,
        }
    }
}
