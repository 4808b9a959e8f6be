// src/stats.rs
//! Aggregate counters fed by every analysis, exported through the `metrics` facade.
//! Whatever recorder the host installs (Prometheus, statsd, a test recorder)
//! receives them; with no recorder they are no-ops.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::pipeline::AnalysisResult;

pub const ANALYSES_TOTAL: &str = "sentiment_analyses_total";
pub const PRIMARY_EMOTION_TOTAL: &str = "sentiment_primary_emotion_total";

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            ANALYSES_TOTAL,
            "Completed analyses by detected language and sentiment label."
        );
        describe_counter!(
            PRIMARY_EMOTION_TOTAL,
            "Completed analyses by highest-scoring emotion."
        );
    });
}

pub fn record_analysis(result: &AnalysisResult) {
    ensure_metrics_described();
    counter!(
        ANALYSES_TOTAL,
        "language" => result.language_code.clone(),
        "sentiment" => result.sentiment.as_str()
    )
    .increment(1);
    counter!(PRIMARY_EMOTION_TOTAL, "emotion" => result.primary_emotion().as_str()).increment(1);
}
