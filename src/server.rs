//! HTTP server, request dispatch and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`; no new connections are taken.
//! 2. Closes idle keep-alive connections and lets busy ones finish their
//!    current response.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http::header::{self, HeaderValue};
use http::{Method, StatusCode};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Route, Router};

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then serves `router` until SIGTERM or Ctrl-C.
    ///
    /// Returns only after a full graceful shutdown.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| Error::Bind { addr: self.addr, source })?;

        serve_with_shutdown(listener, router, shutdown_signal()).await
    }
}

/// Serves `router` on an already-bound listener until `shutdown` resolves,
/// then drains in-flight connections.
///
/// Binding `127.0.0.1:0` and passing the listener here is how tests get an
/// ephemeral port.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    let router = Arc::new(router);

    info!(addr = %listener.local_addr()?, "calcd listening");

    // HTTP/1.1 or HTTP/2, whichever the client speaks.
    let builder = ConnBuilder::new(TokioExecutor::new());
    // Told about every connection so idle keep-alives can be closed on shutdown.
    let graceful = GracefulShutdown::new();
    let mut tasks = tokio::task::JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Check shutdown first so a signal stops accepting immediately,
            // even with connections queued.
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("accept error: {e}");
                        continue;
                    }
                };

                let router = Arc::clone(&router);
                // Called once per request on the connection.
                let svc = service_fn(move |req| {
                    let router = Arc::clone(&router);
                    async move { Ok::<_, Infallible>(dispatch(&router, req).await.into_inner()) }
                });

                let conn = builder.serve_connection(TokioIo::new(stream), svc).into_owned();
                let conn = graceful.watch(conn);

                tasks.spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connection tasks so the set stays bounded.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    // Idle connections close now; busy ones after their current response.
    graceful.shutdown().await;
    while tasks.join_next().await.is_some() {}

    info!("calcd stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Never fails: routing misses
/// become 404/405, a panicking handler becomes 500.
pub(crate) async fn dispatch<B>(router: &Router, req: http::Request<B>) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = match router.lookup(&method, &path) {
        Route::Found(handler) => run(handler, Request::new(&req)).await,
        Route::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
        Route::NotFound => Response::error(StatusCode::NOT_FOUND, "Not found."),
    };

    info!(
        %method,
        %path,
        status = response.status_code().as_u16(),
        latency_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "request"
    );
    response
}

/// Runs the handler on its own task so a panic is contained to this request.
async fn run(handler: BoxedHandler, req: Request) -> Response {
    match tokio::spawn(handler(req)).await {
        Ok(response) => response,
        Err(e) => {
            error!("handler failed: {e}");
            Response::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let response = Response::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.");
    let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    match HeaderValue::from_str(&allow) {
        Ok(value) => response.header(header::ALLOW, value),
        Err(_) => response,
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM (Kubernetes, systemd) or SIGINT (Ctrl-C).
/// On Windows only Ctrl-C is available. A signal that cannot be installed is
/// logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
