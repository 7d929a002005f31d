//! Synthesis metrics

use std::time::Instant;

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

pub const TTS_SYNTHESIS_DURATION: &str = "tts.synthesis.duration";
pub const TTS_SYNTHESIS_COUNT: &str = "tts.synthesis.count";

/// Instruments recorded once per synthesis request
///
/// Backed by the global meter provider, so recording is a no-op until
/// [`crate::init`] installs an exporter.
#[derive(Clone)]
pub struct SynthesisMetrics {
    count: Counter<u64>,
    duration: Histogram<f64>,
}

impl SynthesisMetrics {
    pub fn new() -> Self {
        let meter = global::meter("educalm");

        Self {
            count: meter
                .u64_counter(TTS_SYNTHESIS_COUNT)
                .with_description("Synthesis requests by outcome")
                .build(),
            duration: meter
                .f64_histogram(TTS_SYNTHESIS_DURATION)
                .with_description("Time spent in the synthesis engine")
                .with_unit("s")
                .build(),
        }
    }

    /// Record one finished synthesis from its result
    pub fn record_result<T, E>(&self, language: &str, result: &Result<T, E>, start: Instant) {
        self.record(language, outcome(result), start);
    }

    /// Record one finished synthesis
    pub fn record(&self, language: &str, outcome: &'static str, start: Instant) {
        let attributes = [
            KeyValue::new("language", language.to_string()),
            KeyValue::new("outcome", outcome),
        ];

        self.count.add(1, &attributes);
        self.duration.record(start.elapsed().as_secs_f64(), &attributes);
    }
}

/// `outcome` attribute value for a synthesis result
pub const fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(_) => "failure",
    }
}

impl Default for SynthesisMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SynthesisMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisMetrics").finish_non_exhaustive()
    }
}
