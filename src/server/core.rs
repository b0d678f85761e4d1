use log::{error, info, warn};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::routes::router;
use crate::server::state::AppState;
use crate::session::SessionStoreRef;
use crate::storage::filesystem::create_directory;

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Binds the listener and prepares shared state.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let addr = config.listen_addr();

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            error!("Failed to bind to {}: {}", addr, e);
            anyhow::anyhow!("Server startup failed on {}: {}", addr, e)
        })?;
        info!("Server bound to {}", addr);

        if let Err(e) = create_directory(&config.data_dir_path()).await {
            warn!("Failed to create data directory: {}", e);
        } else {
            info!("Data directory: {}", config.data_dir);
        }

        Ok(Self {
            listener,
            state: AppState::new(config),
        })
    }

    /// Serves requests until Ctrl+C or SIGTERM.
    pub async fn start(self) -> anyhow::Result<()> {
        let sweeper = spawn_session_sweeper(
            self.state.sessions.store().clone(),
            self.state.config.session_sweep_interval(),
        );

        info!(
            "Starting portal server on {} (session ttl {}s)",
            self.state.config.listen_addr(),
            self.state.config.session_ttl_secs
        );

        let app = router(self.state);
        let result = axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        sweeper.abort();
        info!("Server shut down");

        result.map_err(|e| anyhow::anyhow!("Server error: {}", e))
    }
}

/// Periodically drops expired sessions so abandoned ones do not pile up.
pub fn spawn_session_sweeper(store: SessionStoreRef, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = store.cleanup_expired_sessions().await {
                warn!("Session sweep failed: {}", e);
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
