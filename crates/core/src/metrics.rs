//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Agent runs and per-candidate outcomes
//! - Stage timings, failures and retries
//! - LLM token usage

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Agent Run Metrics
// =============================================================================

/// Pipeline runs total by result.
pub static RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelsmith_runs_total", "Total pipeline runs"),
        &["result"], // "completed", "cancelled", "discovery_failed", "rejected"
    )
    .unwrap()
});

/// Whether a run is currently in flight.
pub static RUN_IN_PROGRESS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "reelsmith_run_in_progress",
        "1 while a pipeline run is in flight",
    )
    .unwrap()
});

/// Candidate outcomes by final status.
pub static CANDIDATE_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reelsmith_candidate_outcomes_total",
            "Candidates processed by final status",
        ),
        &["status"], // "success", "partial", "failed"
    )
    .unwrap()
});

// =============================================================================
// Stage Metrics
// =============================================================================

/// Stage call duration in seconds, retries included.
pub static STAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "reelsmith_stage_duration_seconds",
            "Duration of pipeline stage calls",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]),
        &["stage"],
    )
    .unwrap()
});

/// Stage failures by stage and kind.
pub static STAGE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelsmith_stage_failures_total", "Failed stage calls"),
        &["stage", "kind"], // kind: "error", "timeout", "cancelled"
    )
    .unwrap()
});

/// Retry attempts by stage.
pub static RETRY_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelsmith_retry_attempts_total", "Stage retry attempts"),
        &["stage"],
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// LLM tokens used.
pub static LLM_TOKENS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("reelsmith_llm_tokens_total", "Total LLM tokens used"),
        &["provider", "direction"], // direction: "input", "output"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Runs
        Box::new(RUNS_TOTAL.clone()),
        Box::new(RUN_IN_PROGRESS.clone()),
        Box::new(CANDIDATE_OUTCOMES.clone()),
        // Stages
        Box::new(STAGE_DURATION.clone()),
        Box::new(STAGE_FAILURES.clone()),
        Box::new(RETRY_ATTEMPTS.clone()),
        // External services
        Box::new(LLM_TOKENS.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        CANDIDATE_OUTCOMES.with_label_values(&["success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"reelsmith_candidate_outcomes_total".to_string()));
    }
}
