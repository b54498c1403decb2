use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::responder::Responder;

/// Binds the configured address and serves until an accept error.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let responder = Arc::new(Responder::from_config(cfg)?);
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        addr = %cfg.server.listen_addr,
        root = %responder.root().path().display(),
        "Listening"
    );

    serve(listener, responder, cfg.read_timeout()).await
}

/// Accepts connections from `listener` forever.
///
/// Each connection is handled by its own task; tasks share only the
/// read-only `Responder`.
pub async fn serve(
    listener: TcpListener,
    responder: Arc<Responder>,
    read_timeout: std::time::Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let responder = Arc::clone(&responder);
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, responder).with_read_timeout(read_timeout);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
