// Domain-driven module structure for logweave.

// Ingestion core
pub mod parser;
pub mod logs;

// Analysis contract and span reconstruction
pub mod analysis;
pub mod trace;

// Binary support
pub mod conf;
pub mod runtime;
