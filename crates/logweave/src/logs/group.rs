//! Group: partition records by service and restrict them by request id.
//!
//! Both operations keep input order inside their result; neither sorts.

use std::collections::{BTreeMap, HashSet};

use crate::parser::LogLine;

/// Partition raw line text by service.
///
/// Lines keep their relative input order inside each bucket. Keys iterate
/// in lexical order.
pub fn group_by_service<'a, I>(logs: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a LogLine>,
{
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for log in logs {
        grouped
            .entry(log.service.clone())
            .or_default()
            .push(log.raw.clone());
    }
    grouped
}

/// Records whose request id equals `request_id` exactly, in input order.
///
/// Records without a request id never match. An empty result is a real
/// outcome and must not be replaced by the unfiltered input.
pub fn filter_by_request_id<'a>(logs: &'a [LogLine], request_id: &str) -> Vec<&'a LogLine> {
    logs.iter()
        .filter(|log| log.request_id.as_deref() == Some(request_id))
        .collect()
}

/// Distinct request ids in first-seen order.
pub fn request_ids(logs: &[LogLine]) -> Vec<String> {
    let mut seen = HashSet::new();
    logs.iter()
        .filter_map(|log| log.request_id.as_deref())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}
