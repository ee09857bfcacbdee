//! rockblock gateway
//!
//! - Webhook endpoint: POST / (application/x-www-form-urlencoded)
//! - Config from `ROCKBLOCK_CONFIG` / `rockblock.yaml`, `PORT` override
//! - Graceful shutdown on Ctrl-C / SIGTERM

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use rockblock_core::error::{Result, WebhookError};
use rockblock_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.gateway.log_level));
    fmt().with_env_filter(filter).init();

    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| WebhookError::Config(format!("gateway.listen: {e}")))?;
    let grace = Duration::from_millis(cfg.gateway.shutdown_grace_ms);

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "rockblock-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| WebhookError::Internal(format!("failed to bind {listen}: {e}")))?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        res = &mut server => {
            res.map_err(|e| WebhookError::Internal(format!("server failed: {e}")))?;
        }
        _ = shutdown_signal() => {
            let _ = shutdown_tx.send(());
            match tokio::time::timeout(grace, &mut server).await {
                Ok(res) => res.map_err(|e| WebhookError::Internal(format!("server failed: {e}")))?,
                Err(_) => tracing::warn!(?grace, "shutdown grace period elapsed, exiting"),
            }
        }
    }

    tracing::info!("rockblock-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
