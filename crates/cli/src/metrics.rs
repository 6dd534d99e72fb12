//! Prometheus registry for the CLI.

use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

fn register_metrics(registry: &Registry) {
    for metric in crewfinder_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewfinder_core::metrics::{PROFILE_FETCHES, SELECTION_RUNS};

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        SELECTION_RUNS.inc();
        PROFILE_FETCHES.with_label_values(&["success"]).inc();

        let output = encode_metrics().unwrap();
        assert!(output.contains("crewfinder_selection_runs_total"));
        assert!(output.contains("crewfinder_profile_fetches_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }
}
