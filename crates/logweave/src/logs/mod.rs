//! Logs module: grouping, correlation-id filtering, and the ingestion pipeline.

pub mod group;
pub mod ingest;

pub use group::{filter_by_request_id, group_by_service, request_ids};
pub use ingest::{prepare, prepare_with, IngestError, IngestMetadata, Prepared};
