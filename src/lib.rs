//! sstt - Static file HTTP/1.1 server
//!
//! Core library: request parsing, path resolution under a document root,
//! and response framing for a GET-only static file server.

pub mod config;
pub mod http;
pub mod server;
