//! A stand-in for the OpenMensa api, serving fixed [`Fixtures`] under
//! `/api/v2`.

use std::net::SocketAddr;

use tokio::{net::TcpListener, task::JoinHandle};

pub mod config;
mod routes;
pub use routes::*;

/// mock running on an ephemeral local port, stopped on drop
pub struct MockServer {
    addr: SocketAddr,
    log: RequestLog,
    task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(fixtures: Fixtures, paging: Paging) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let log = RequestLog::default();
        let app = make_router(fixtures, paging, log.clone());

        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!("mock server stopped: {err}");
            }
        });

        Ok(Self { addr, log, task })
    }

    pub fn addr(&self) -> SocketAddr { self.addr }

    /// base url to configure a client with
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }

    pub fn log(&self) -> &RequestLog { &self.log }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
