//! Analysis module: the contract with the external analysis engine.
//!
//! The engine itself is out of process; this module builds its request
//! payload and checks the shape of what comes back.

pub mod model;
pub mod request;
pub mod validate;

pub use model::{
    AnalysisDocument, Anomaly, AttentionPriority, CausalityAnalysis, ClockIssue, Confidence,
    Severity, TimelineEvent,
};
pub use request::{AnalysisContext, AnalysisRequest};
pub use validate::{strip_code_fences, validate_structure, AnalysisError};
