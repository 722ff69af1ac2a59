use crate::client::exporters::webhook_forward::ReportEnvelope;
use crate::client::ReportDispatch;
use crate::config::Config;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct DaemonState {
    config: Arc<Config>,
    dispatcher: Arc<dyn ReportDispatch>,
    envelope: ReportEnvelope,
    // resolved once at startup, read-only afterwards
    manifest: Option<Arc<Value>>,
}

impl DaemonState {
    pub fn new(
        config: Arc<Config>,
        dispatcher: Arc<dyn ReportDispatch>,
        manifest: Option<Value>,
    ) -> Self {
        let envelope = ReportEnvelope::from(config.as_ref());
        Self {
            config,
            dispatcher,
            envelope,
            manifest: manifest.map(Arc::new),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> &dyn ReportDispatch {
        self.dispatcher.as_ref()
    }

    pub fn envelope(&self) -> &ReportEnvelope {
        &self.envelope
    }

    pub fn manifest(&self) -> Option<&Value> {
        self.manifest.as_deref()
    }
}
