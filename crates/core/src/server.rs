//! HTTP front end serving a simulator over the Event Store Atom API paths.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, ServerError},
    simulator::{AtomFeedSimulator, SimulatorResponse},
};

/// Content type Event Store uses for Atom documents rendered as JSON
pub const ATOM_JSON_CONTENT_TYPE: &str = "application/vnd.eventstore.atom+json";

/// Server configuration options.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2113,
        }
    }
}

impl ServerOptions {
    /// Base URL requests are resolved against when they carry no `Host` header
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<AtomFeedSimulator>,
    pub options: ServerOptions,
}

/// Create the router answering every GET path from the simulator.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/{*path}", get(handle_get))
        .layer(cors)
        .with_state(state)
}

async fn handle_get(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let url = request_url(&state.options, &uri, &headers);
    debug!(url = %url, "Handling request");

    match state.simulator.handle(&url) {
        Ok(SimulatorResponse::Feed(feed)) => atom_json(&feed),
        Ok(SimulatorResponse::Event(event)) => atom_json(&event),
        Ok(SimulatorResponse::Metadata(metadata)) => Json(metadata).into_response(),
        Err(e) => {
            warn!(url = %url, error = %e, "Request failed");
            e.into_response()
        }
    }
}

fn atom_json<T: Serialize>(document: &T) -> Response {
    ([(header::CONTENT_TYPE, ATOM_JSON_CONTENT_TYPE)], Json(document)).into_response()
}

/// Rebuild the absolute URL a client asked for.
///
/// Event URIs are absolute, so the scheme and authority must match what the
/// client used to reach us.
fn request_url(options: &ServerOptions, uri: &Uri, headers: &HeaderMap) -> String {
    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        return format!("{}://{}{}", scheme, authority, uri.path());
    }

    let base = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| format!("http://{}", host))
        .unwrap_or_else(|| options.base_url());

    format!("{}{}", base, uri.path())
}

/// Start the server and serve until interrupted.
pub async fn start_server(
    simulator: AtomFeedSimulator,
    options: ServerOptions,
) -> std::io::Result<()> {
    let state = AppState {
        simulator: Arc::new(simulator),
        options: options.clone(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", options.host, options.port);
    info!("Starting Atom feed simulator on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

/// A simulator served on an ephemeral local port, for tests driving a real client.
///
/// The port is bound before the simulator is built, so generated event URIs can
/// point back at the server. The server stops on [`SimulatorServer::shutdown`]
/// or when the handle is dropped.
pub struct SimulatorServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl SimulatorServer {
    pub async fn start<F>(build: F) -> std::result::Result<Self, ServerError>
    where
        F: FnOnce(&str) -> Result<AtomFeedSimulator>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let simulator = build(&format!("http://{}", addr))?;

        let router = create_router(AppState {
            simulator: Arc::new(simulator),
            options: ServerOptions {
                host: addr.ip().to_string(),
                port: addr.port(),
            },
        });

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
        });
        info!(addr = %addr, "Simulator server started");

        Ok(Self {
            addr,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the server, without a trailing slash
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) -> std::result::Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.map_err(std::io::Error::other)??;
        }
        Ok(())
    }
}

impl Drop for SimulatorServer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
