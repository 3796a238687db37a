//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use simple_time_service::clock::Clock;
use simple_time_service::http::AppState;
use simple_time_service::{HttpServer, Shutdown};

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A running server bound to an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    fn spawn(addr: SocketAddr, shutdown: Shutdown, task: JoinHandle<()>) -> Self {
        Self {
            addr,
            shutdown,
            task: Some(task),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(mut self) {
        self.shutdown.trigger();
        if let Some(task) = self.task.take() {
            tokio::time::timeout(Duration::from_secs(5), task)
                .await
                .expect("server did not stop within 5s")
                .expect("server task panicked");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

async fn bind_ephemeral() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Start the full server (peer addresses recorded) with the given state.
pub async fn start_server(state: AppState) -> TestServer {
    let (listener, addr) = bind_ephemeral().await;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(state);
    let server_shutdown = shutdown.subscribe();

    let task = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer::spawn(addr, shutdown, task)
}

/// Start the server with a pinned clock.
#[allow(dead_code)]
pub async fn start_server_with_clock(instant: DateTime<Utc>) -> TestServer {
    start_server(AppState {
        clock: Arc::new(FixedClock(instant)),
    })
    .await
}

/// Serve the router without connect info, so no peer address is known.
#[allow(dead_code)]
pub async fn start_server_without_peer() -> TestServer {
    let (listener, addr) = bind_ephemeral().await;
    let shutdown = Shutdown::new();
    let router = HttpServer::default().into_router();
    let stop = shutdown.subscribe();

    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, router)
            .with_graceful_shutdown(stop.recv())
            .await;
    });

    TestServer::spawn(addr, shutdown, task)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
