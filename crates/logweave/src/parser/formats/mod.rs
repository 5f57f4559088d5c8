/// Service-encoding conventions, one strategy per file

pub mod key_value;
pub mod json;
pub mod bracketed;
pub mod orchestration;
pub mod plain;

pub use key_value::KeyValueStrategy;
pub use json::JsonStrategy;
pub use bracketed::BracketedStrategy;
pub use orchestration::OrchestrationStrategy;
pub use plain::UnknownStrategy;
