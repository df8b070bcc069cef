use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;
use crate::db::types::{AssessmentKind, AssignmentStatus};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_submission(kind: AssessmentKind, is_late: bool) {
    metrics::counter!(
        "assessment_submissions_total",
        "kind" => kind.as_str(),
        "late" => if is_late { "true" } else { "false" }
    )
    .increment(1);
}

pub(crate) fn record_transition(to: AssignmentStatus) {
    metrics::counter!("grading_transitions_total", "to" => to.as_str()).increment(1);
}

pub(crate) fn record_retry(operation: &'static str) {
    metrics::counter!("assessment_optimistic_retries_total", "operation" => operation).increment(1);
}
