//! Span-tree reconstruction from analysed timeline events.
//!
//! 1. Resolve trace ids per event: structured record first, event text second
//! 2. Drop events without a span id
//! 3. Group by span id; widen time bounds; raise error/warning flags
//! 4. Link children to parents; decide what happens to orphans

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::analysis::{AnalysisDocument, Severity, TimelineEvent};
use crate::parser::fields::{extract_parent_span_id, extract_span_id, extract_trace_id};
use crate::parser::LogLine;

use super::clock::{clock_fragment, clock_millis};
use super::model::{OrphanPolicy, Span, SpanForest, SpanIds, SpanView};

/// Rebuilds the span forest for one analysis request.
///
/// Holds only borrowed inputs and a policy; nothing is cached between builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanTreeBuilder<'a> {
    policy: OrphanPolicy,
    logs: Option<&'a [LogLine]>,
}

impl<'a> SpanTreeBuilder<'a> {
    pub fn new(policy: OrphanPolicy) -> Self {
        Self { policy, logs: None }
    }

    /// Structured records used to resolve ids before falling back to
    /// the event text.
    pub fn with_logs(mut self, logs: &'a [LogLine]) -> Self {
        self.logs = Some(logs);
        self
    }

    /// Trace ids for one event.
    ///
    /// A structured record matches when it has the event's service, its
    /// timestamp contains the event's `HH:MM:SS.mmm` fragment, and it
    /// carries a trace or span id.
    pub fn resolve(&self, event: &TimelineEvent) -> SpanIds {
        if let Some(matching) = self.find_record(event) {
            return SpanIds {
                trace_id: matching.trace_id.clone(),
                span_id: matching.span_id.clone(),
                parent_span_id: matching.parent_span_id.clone(),
            };
        }

        SpanIds {
            trace_id: extract_trace_id(&event.description),
            span_id: extract_span_id(&event.description),
            parent_span_id: extract_parent_span_id(&event.description),
        }
    }

    fn find_record(&self, event: &TimelineEvent) -> Option<&'a LogLine> {
        let logs = self.logs?;
        let fragment = clock_fragment(&event.timestamp)?;

        logs.iter().find(|log| {
            log.service == event.service
                && log.timestamp.as_deref().is_some_and(|ts| ts.contains(fragment.as_str()))
                && (log.trace_id.is_some() || log.span_id.is_some())
        })
    }

    pub fn build(&self, analysis: &AnalysisDocument) -> SpanView {
        let mut spans: Vec<Span> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for event in &analysis.timeline {
            let ids = self.resolve(event);
            let Some(span_id) = ids.span_id.clone() else {
                continue;
            };

            let slot = *index.entry(span_id.clone()).or_insert_with(|| {
                spans.push(Span::new(span_id, event.service.clone(), &ids));
                spans.len() - 1
            });
            let span = &mut spans[slot];

            if let Some(at) = clock_millis(&event.timestamp) {
                span.observe(at);
            }

            let text = event.description.to_lowercase();
            if analysis.flags(&event.service, Severity::Critical) || text.contains("error") {
                span.has_error = true;
            }
            if analysis.flags(&event.service, Severity::Warning) || text.contains("warn") {
                span.has_warning = true;
            }

            span.events.push(event.clone());
        }

        if spans.is_empty() {
            tracing::debug!(events = analysis.timeline.len(), "no span data available");
            return SpanView::NoSpanData;
        }

        let forest = self.link(spans);
        if !forest.detached.is_empty() {
            tracing::warn!(
                detached = ?forest.detached,
                policy = ?self.policy,
                "spans not reachable from any root"
            );
        }
        tracing::debug!(
            spans = forest.len(),
            roots = forest.roots.len(),
            "span forest reconstructed"
        );

        SpanView::Forest(forest)
    }

    fn link(&self, spans: Vec<Span>) -> SpanForest {
        let known: HashSet<&str> = spans.iter().map(|s| s.span_id.as_str()).collect();
        let mut roots = Vec::new();
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for span in &spans {
            match span.parent_span_id.as_deref() {
                None => roots.push(span.span_id.clone()),
                Some(parent) if known.contains(parent) => {
                    children
                        .entry(parent.to_string())
                        .or_default()
                        .push(span.span_id.clone());
                }
                Some(_) => match self.policy {
                    OrphanPolicy::Promote => roots.push(span.span_id.clone()),
                    OrphanPolicy::Drop => {}
                },
            }
        }

        SpanForest::new(spans, roots, children)
    }
}

/// Reconstruct spans with the given policy, resolving ids against `logs`
/// when provided.
pub fn reconstruct_spans(
    analysis: &AnalysisDocument,
    logs: Option<&[LogLine]>,
    policy: OrphanPolicy,
) -> SpanView {
    let mut builder = SpanTreeBuilder::new(policy);
    if let Some(logs) = logs {
        builder = builder.with_logs(logs);
    }
    builder.build(analysis)
}
