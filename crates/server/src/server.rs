use std::net::SocketAddr;

use axum::Router;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// Serves a router on its own runtime until dropped.
pub struct SiteServer {
    runtime: Runtime,
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl SiteServer {
    pub fn start(bind: SocketAddr, app: Router) -> Result<Self, std::io::Error> {
        let runtime = Runtime::new()?;

        let listener = runtime.block_on(tokio::net::TcpListener::bind(bind))?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        runtime.spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(error) = served {
                tracing::error!("server stopped: {error}");
            }
        });

        tracing::info!(%addr, "listening");

        Ok(Self {
            runtime,
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Blocks the calling thread until Ctrl-C.
    pub fn wait_for_ctrl_c(&self) -> Result<(), std::io::Error> {
        self.runtime.block_on(tokio::signal::ctrl_c())?;
        tracing::info!("shutting down");
        Ok(())
    }
}

impl Drop for SiteServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
