use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::fault::FaultPolicy;
use friendfinder::RecordSet;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Record collection, loaded once and read by every request
    pub records: Arc<RecordSet>,

    /// Per-request latency and failure source
    pub faults: Arc<dyn FaultPolicy>,

    /// Prometheus render handle, present when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, loading records from `config.data_path`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let records = RecordSet::load(&config.data_path)?;
        let faults = config.fault_policy();
        Ok(Self::with_parts(config, records, faults))
    }

    /// Assemble state from already built parts
    pub fn with_parts(
        config: ServerConfig,
        records: RecordSet,
        faults: Arc<dyn FaultPolicy>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            records: Arc::new(records),
            faults,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
