//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use rockblock_core::error::{Result, WebhookError};

pub use schema::{DecoderSection, GatewayConfig, GatewaySection};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "ROCKBLOCK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "rockblock.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| WebhookError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| WebhookError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load config for the binary.
///
/// `ROCKBLOCK_CONFIG` names the file; when unset and `rockblock.yaml` is
/// missing, built-in defaults are used. `PORT` overrides the listen port.
pub fn load() -> Result<GatewayConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).ok();
    let port = std::env::var("PORT").ok();
    load_with(path.as_deref(), DEFAULT_CONFIG_PATH, port.as_deref())
}

/// `load` without the environment lookups.
///
/// An explicit `path` must exist; a missing `default_path` falls back to
/// `GatewayConfig::default()`.
pub fn load_with(
    path: Option<&str>,
    default_path: &str,
    port: Option<&str>,
) -> Result<GatewayConfig> {
    let cfg = match path {
        Some(path) => load_from_file(path)?,
        None => match fs::read_to_string(default_path) {
            Ok(s) => load_from_str(&s)?,
            Err(e) if e.kind() == ErrorKind::NotFound => GatewayConfig::default(),
            Err(e) => {
                return Err(WebhookError::Config(format!(
                    "read config {default_path} failed: {e}"
                )))
            }
        },
    };
    apply_port_override(cfg, port)
}

/// Replace the listen address with `0.0.0.0:<port>` when a port is given.
pub fn apply_port_override(mut cfg: GatewayConfig, port: Option<&str>) -> Result<GatewayConfig> {
    let Some(port) = port.filter(|p| !p.is_empty()) else {
        return Ok(cfg);
    };
    let port: u16 = port
        .parse()
        .map_err(|_| WebhookError::Config(format!("PORT must be a valid port number, got {port:?}")))?;
    cfg.gateway.listen = format!("0.0.0.0:{port}");
    Ok(cfg)
}
