use super::traits::*;
use super::formats::*;

/// Detection catalog. Order matters! More specific signals first, so that
/// an explicit `service=` key or JSON wins over loose workload-name tokens.
static CATALOG: [&dyn ServiceStrategy; 4] = [
    &KeyValueStrategy,
    &JsonStrategy,
    &BracketedStrategy,
    &OrchestrationStrategy,
];

static FALLBACK: UnknownStrategy = UnknownStrategy;

/// Chooses the service-encoding convention for a whole stream.
///
/// The first catalog entry whose trigger fires on ANY sampled line wins.
/// The choice is made once; the bound extractor then runs on every line.
pub struct ServicePatternDetector {
    catalog: &'static [&'static dyn ServiceStrategy],
}

impl ServicePatternDetector {
    pub fn new() -> Self {
        Self { catalog: &CATALOG }
    }

    pub fn detect(&self, sample: &[&str]) -> ServicePattern {
        for strategy in self.catalog {
            if sample.iter().any(|line| strategy.matches(line)) {
                tracing::debug!(
                    pattern = %strategy.kind(),
                    sample_lines = sample.len(),
                    "service pattern selected"
                );
                return ServicePattern::new(*strategy);
            }
        }

        tracing::debug!(sample_lines = sample.len(), "no service pattern matched, using fallback");
        ServicePattern::new(&FALLBACK)
    }
}

impl Default for ServicePatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the service pattern from a sample using the default catalog.
pub fn detect_service_pattern(sample: &[&str]) -> ServicePattern {
    ServicePatternDetector::new().detect(sample)
}
