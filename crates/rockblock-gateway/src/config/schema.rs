use serde::Deserialize;
use rockblock_core::error::{Result, WebhookError};
use rockblock_core::DecodeLimits;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub decoder: DecoderSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            decoder: DecoderSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WebhookError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.decoder.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request body cap; `None` accepts any size.
    #[serde(default)]
    pub max_body_bytes: Option<usize>,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_level: default_log_level(),
            max_body_bytes: None,
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(WebhookError::Config(format!(
                "gateway.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        if self.max_body_bytes == Some(0) {
            return Err(WebhookError::Config(
                "gateway.max_body_bytes must be greater than 0 when set".into(),
            ));
        }
        if !(100..=60000).contains(&self.shutdown_grace_ms) {
            return Err(WebhookError::Config(
                "gateway.shutdown_grace_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderSection {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_array_limit")]
    pub array_limit: usize,
}

impl Default for DecoderSection {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            array_limit: default_array_limit(),
        }
    }
}

impl DecoderSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=32).contains(&self.max_depth) {
            return Err(WebhookError::Config(
                "decoder.max_depth must be between 1 and 32".into(),
            ));
        }
        if self.array_limit > 10000 {
            return Err(WebhookError::Config(
                "decoder.array_limit must be at most 10000".into(),
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> DecodeLimits {
        DecodeLimits {
            max_depth: self.max_depth,
            array_limit: self.array_limit,
        }
    }
}

fn default_max_depth() -> usize {
    DecodeLimits::default().max_depth
}
fn default_array_limit() -> usize {
    DecodeLimits::default().array_limit
}
