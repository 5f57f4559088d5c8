/// Log ingestion: service detection and per-line field extraction
///
/// Turns an interleaved multi-service text stream into structured,
/// correlatable records.
///
/// # Architecture
///
/// - `traits.rs`: the `ServiceStrategy` seam used by the detection catalog
/// - `detector.rs`: ordered catalog; chooses one strategy per stream
/// - `formats/`: one file per service-encoding convention
/// - `timestamp.rs`, `fields.rs`: independent field extractors
/// - `stream.rs`: line and stream parsing
///
/// # Guarantees
///
/// - Every non-blank line yields exactly one `LogLine`; nothing is merged
/// - `raw` is kept verbatim
/// - Extraction is total: missing fields are `None`, never an error
/// - No state survives between calls

pub mod traits;
pub mod detector;
pub mod formats;
pub mod model;
pub mod timestamp;
pub mod fields;
pub mod stream;

// Re-export commonly used types
pub use traits::ServiceStrategy;
pub use model::{Level, LogLine, PatternKind, ServicePattern, UNKNOWN_SERVICE_LINE, UNKNOWN_SERVICE_STREAM};
pub use detector::{detect_service_pattern, ServicePatternDetector};
pub use stream::{parse_line, parse_stream, ParsedStream, StreamParser};

// Constants
pub const DETECTION_SAMPLE_SIZE: usize = 20; // Lines sampled for service detection
