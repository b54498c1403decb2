//! HTTP protocol implementation.
//!
//! This module implements the per-connection pipeline of a GET-only
//! HTTP/1.1 static file server.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`lines`**: Splits a raw request buffer into CRLF-terminated lines
//! - **`parser`**: Validates the request line and header lines, producing a `Request`
//! - **`request`**: Immutable HTTP request representation
//! - **`error`**: Classified request errors and their status codes
//! - **`resolver`**: Maps a request target onto the document root
//! - **`mime`**: MIME type detection based on file extensions
//! - **`responder`**: Chooses between directory listing, file transfer and error page
//! - **`response`**: Status codes and response values
//! - **`writer`**: Frames the status line and headers and sends the body
//! - **`connection`**: The connection handler implementing the pipeline state machine
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │  AwaitData  │ ← Wait up to 5s for request data
//!        └──────┬──────┘
//!               │ Request read and parsed      (timeout / EOF → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve target, build response
//!        └──────┬───────────┘
//!               │ Response ready               (parse error → Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send header and body to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```
//!
//! Exactly one request is served per connection. 200 responses advertise
//! `Connection: Keep-Alive` but the connection is closed regardless.
//!
//! # Example
//!
//! ```ignore
//! use sstt::http::connection::Connection;
//! use sstt::http::responder::Responder;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let responder = Arc::new(Responder::open("./www")?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let responder = Arc::clone(&responder);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, responder);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod lines;
pub mod error;
pub mod request;
pub mod response;
pub mod parser;
pub mod mime;
pub mod resolver;
pub mod responder;
pub mod writer;
pub mod connection;
