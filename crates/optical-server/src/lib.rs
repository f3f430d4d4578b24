//! JSON REST API over the optical retail resource store.
//!
//! # Routes
//!
//! - `/api/customer`, `/api/patient`, `/api/prescription`: paged envelopes
//!   (`{customers, total, page, totalPages}`) with full CRUD
//! - `/api/customer/invoice`: walk-in sale, creating a customer and an invoice together
//! - `/api/invoices`, `/api/products`, `/api/appointments`: bare arrays with full CRUD
//! - `/api/shops`, `/doctors`, `/admins`, `/staff`, `/purchase-orders`,
//!   `/admin-payment-notices`: read-only reference data
//! - `/api/reports/summary`, `/api/health`
//!
//! Errors are always `{"error": "<message>"}`. Only `POST /api/patient` asks
//! for a bearer token.
//!
//! # Configuration
//!
//! Read from `OPTICAL_*` environment variables at startup, see [`config::Config`].
//! Logging follows `RUST_LOG`.

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{signal, SignalKind};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use routes::app;

use config::Config;
use state::AppState;

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing state...");
    let address = config.address();
    let state = AppState::new(config)?;

    info!("Starting server...");
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
