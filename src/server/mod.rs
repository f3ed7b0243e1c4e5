//! # HTTPS Print Server
//!
//! Accepts text over HTTPS and prints it on the attached receipt printer.
//!
//! ## Usage
//!
//! ```bash
//! sobr-print 8888
//! curl -k -X POST --data 'Hello' https://localhost:8888/
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Stopped -> Starting (TLS load + bind) -> Serving -> Stopping (signal) -> Stopped
//! ```
//!
//! [`Server::bind`] is the Starting phase and fails fast on bad TLS material
//! or a busy port. [`Server::run`] serves until the shutdown future resolves,
//! lets in-flight requests finish, then waits for the print worker to finish
//! the pending job. Both waits are bounded by [`ServerConfig::shutdown_grace`]:
//! a job stuck in a device write is abandoned rather than holding the process.

mod handlers;
mod state;
pub mod tls;

pub use state::{
    AppState, DEFAULT_BODY_TIMEOUT, DEFAULT_CERT_PATH, DEFAULT_KEY_PATH, DEFAULT_PORT,
    DEFAULT_SHUTDOWN_GRACE, ServerConfig,
};

use std::future::Future;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, header},
};
use axum_server::tls_rustls::RustlsConfig;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::error::SobrError;
use crate::printer::{Printer, PrinterHandle, worker};

/// Build the router: every method and path goes through one dispatcher.
pub fn router(state: Arc<AppState>) -> Router {
    let max_in_flight = state.config.max_in_flight.max(1);

    Router::new()
        .fallback(handlers::dispatch)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(max_in_flight))
}

/// A bound TLS listener, ready to serve.
pub struct Server {
    config: ServerConfig,
    listener: TcpListener,
    tls: RustlsConfig,
}

impl Server {
    /// Load the certificate and key, then bind the listening socket.
    pub async fn bind(config: ServerConfig) -> Result<Self, SobrError> {
        let tls = tls::load_tls_config(&config.cert_path, &config.key_path).await?;

        let addr = config.listen_addr();
        let listener = TcpListener::bind(addr).map_err(|source| SobrError::Bind { addr, source })?;
        listener
            .set_nonblocking(true)
            .map_err(|source| SobrError::Bind { addr, source })?;

        Ok(Self {
            config,
            listener,
            tls,
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, SobrError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, printing POST bodies on `printer`.
    ///
    /// Returns once the server has stopped and every accepted job is printed,
    /// or once `shutdown_grace` has passed waiting for the printer.
    pub async fn run<F>(self, printer: Printer, shutdown: F) -> Result<(), SobrError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let grace = self.config.shutdown_grace;
        let (handle, worker) = worker::spawn(printer);

        let served = self.serve(handle, shutdown).await;

        // All handles are gone with the router; the worker drains and exits
        match tokio::time::timeout(grace, worker).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "Print worker panicked"),
            Err(_) => error!(
                grace_secs = grace.as_secs_f64(),
                "Printer did not finish the pending job; abandoning it"
            ),
        }

        served
    }

    /// Serve requests until `shutdown` resolves.
    pub async fn serve<F>(self, printer: PrinterHandle, shutdown: F) -> Result<(), SobrError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        let grace = self.config.shutdown_grace;
        let app = router(Arc::new(AppState::new(self.config, printer)));

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            shutdown.await;
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        info!(%addr, "Starting httpd...");

        let result = axum_server::from_tcp_rustls(self.listener, self.tls)
            .handle(handle)
            .serve(app.into_make_service())
            .await;

        info!("Stopping httpd...");

        result.map_err(|e| SobrError::Server(e.to_string()))
    }
}

/// Resolves on Ctrl-C (SIGINT) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
