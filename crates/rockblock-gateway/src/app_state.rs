//! Shared application state for the rockblock gateway.
//!
//! Everything here is immutable after startup and shared behind `Arc`, so
//! request handlers never lock.

use std::sync::Arc;

use rockblock_core::DecodeLimits;

use crate::config::GatewayConfig;
use crate::dispatch::{MessageSink, TracingSink};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    sink: Arc<dyn MessageSink>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    limits: DecodeLimits,
}

impl AppState {
    /// Build state with the default logging sink.
    pub fn new(cfg: GatewayConfig) -> Self {
        Self::with_sink(cfg, Arc::new(TracingSink::new()))
    }

    pub fn with_sink(cfg: GatewayConfig, sink: Arc<dyn MessageSink>) -> Self {
        let limits = cfg.decoder.limits();
        tracing::debug!(
            sink = sink.name(),
            max_depth = limits.max_depth,
            array_limit = limits.array_limit,
            "app state ready"
        );
        Self {
            inner: Arc::new(AppStateInner { cfg, limits }),
            sink,
        }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.inner.limits
    }

    pub fn max_body_bytes(&self) -> usize {
        self.inner.cfg.gateway.max_body_bytes.unwrap_or(usize::MAX)
    }

    pub fn sink(&self) -> Arc<dyn MessageSink> {
        Arc::clone(&self.sink)
    }
}
