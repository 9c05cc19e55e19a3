use crate::progress::ProgressEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared service state: the readiness flag flipped after the listener
/// binds, the prometheus render handle, and the (stateless, shareable)
/// progress engine.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ProgressEngine>,
}
