use bytes::BytesMut;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::responder::{error_response, Responder};
use crate::http::writer::ResponseWriter;

/// How long a new connection may stay silent before it is dropped.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the bytes read for one request.
pub const MAX_REQUEST_SIZE: usize = 8192;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    responder: Arc<Responder>,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingData,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, responder: Arc<Responder>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(MAX_REQUEST_SIZE),
            responder,
            read_timeout: READ_TIMEOUT,
            state: ConnectionState::AwaitingData,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Serves exactly one request, then shuts the stream down.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::AwaitingData => {
                    if !self.read_request().await? {
                        self.state = ConnectionState::Closed;
                        continue;
                    }

                    tracing::debug!(
                        request = %String::from_utf8_lossy(&self.buffer),
                        "Request content"
                    );

                    self.state = match parse_http_request(&self.buffer) {
                        Ok(req) => ConnectionState::Processing(req),
                        Err(e) => ConnectionState::Writing(ResponseWriter::new(error_response(&e))),
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.responder.respond(req).await;

                    tracing::info!(
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "Request served"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    let sent = writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(
                        status = writer.status().as_u16(),
                        bytes = sent,
                        "Response sent"
                    );

                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        Ok(())
    }

    /// Fills the buffer with one request.
    ///
    /// Returns `false` when nothing arrived before the timeout or the peer
    /// closed without sending anything. Once data has arrived, reading stops
    /// at the end of the header block, at `MAX_REQUEST_SIZE`, at EOF or at
    /// the same deadline, whichever comes first.
    async fn read_request(&mut self) -> anyhow::Result<bool> {
        let deadline = Instant::now() + self.read_timeout;
        let mut temp = [0u8; 1024];

        loop {
            if self.buffer.len() >= MAX_REQUEST_SIZE || headers_complete(&self.buffer) {
                return Ok(true);
            }

            let n = match timeout_at(deadline, self.stream.read(&mut temp)).await {
                Ok(read) => read?,
                Err(_) => {
                    if self.buffer.is_empty() {
                        tracing::info!(
                            timeout = ?self.read_timeout,
                            "No data received, closing connection"
                        );
                        return Ok(false);
                    }
                    return Ok(true);
                }
            };

            if n == 0 {
                // Client closed connection
                return Ok(!self.buffer.is_empty());
            }

            let room = MAX_REQUEST_SIZE - self.buffer.len();
            self.buffer.extend_from_slice(&temp[..n.min(room)]);
        }
    }
}

fn headers_complete(buf: &[u8]) -> bool {
    buf.windows(4).any(|w| w == b"\r\n\r\n")
}
