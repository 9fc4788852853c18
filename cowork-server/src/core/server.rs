//! HTTP server startup and graceful shutdown

use crate::api;
use crate::core::ServerState;

pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Serve until Ctrl-C, then close the pool
    pub async fn run(self) -> anyhow::Result<()> {
        let config = &self.state.config;
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            environment = %config.environment,
            "Cowork server listening on {}",
            addr
        );

        let pool = self.state.pool.clone();
        let app = api::build_app(self.state);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        pool.close().await;
        tracing::info!("Server stopped");
        Ok(())
    }
}
