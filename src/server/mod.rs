//! HTTP server: homepage plus the events, manufacturers and trends routes.

mod error;
mod routes;
mod state;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::RouteError;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home_handler))
        .route("/events", get(routes::events_handler))
        .route("/manufacturers", get(routes::manufacturers_handler))
        .route("/trends", get(routes::trends_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Base URL for calling back into a server bound at `addr`.
///
/// Wildcard binds are reached through the loopback address of the same family.
pub(crate) fn loopback_base(addr: SocketAddr) -> String {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}

/// Runs the HTTP server on `host:port` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error when the host is not an IP address, the bind fails, or
/// the upstream HTTP client cannot be created.
pub async fn run_http(host: &str, port: u16) -> anyhow::Result<()> {
    let ip: IpAddr = host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid host address: {e}"))?;
    let bind = SocketAddr::new(ip, port);

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP server: {e}"))?;
    let local = listener.local_addr()?;
    let state = AppState::new(loopback_base(local))?;

    info!("FAERS explorer listening on http://{local}");
    info!("  Events:        GET http://{local}/events?drug=<name>&serious=<1|2>");
    info!("  Manufacturers: GET http://{local}/manufacturers?drug=<name>");
    info!("  Trends:        GET http://{local}/trends?drug=<name>");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down…");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                warn!(error = %err, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
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
}

#[cfg(test)]
mod tests {
    use super::loopback_base;

    #[test]
    fn loopback_base_rewrites_wildcard_binds() {
        assert_eq!(
            loopback_base("0.0.0.0:5000".parse().unwrap()),
            "http://127.0.0.1:5000"
        );
        assert_eq!(loopback_base("[::]:5000".parse().unwrap()), "http://[::1]:5000");
    }

    #[test]
    fn loopback_base_keeps_concrete_address() {
        assert_eq!(
            loopback_base("192.168.1.20:8080".parse().unwrap()),
            "http://192.168.1.20:8080"
        );
    }
}
