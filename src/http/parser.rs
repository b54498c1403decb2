//! Request parsing.
//!
//! Parsing walks the tokenized lines once: the first line must be a valid
//! request line, every following line up to the first blank line (or the end
//! of the buffer) must be a valid header line. The first malformed element
//! ends parsing with the matching error; nothing after it is inspected.

use crate::http::error::HttpError;
use crate::http::lines::lines;
use crate::http::request::{Request, SUPPORTED_METHOD, SUPPORTED_VERSION};
use regex::Regex;
use std::sync::LazyLock;

/// `key: value` where the key is letters and hyphens and exactly one space
/// follows the colon.
static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z-]+: .*$").expect("header pattern is valid")
});

/// The three fields of a validated request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: String,
}

impl RequestLine {
    pub fn into_request(self, headers: Vec<String>) -> Request {
        Request {
            method: self.method,
            target: self.target,
            version: self.version,
            headers,
        }
    }
}

pub fn parse_http_request(buf: &[u8]) -> Result<Request, HttpError> {
    let mut lines = lines(buf);

    let first = lines
        .next()
        .ok_or_else(|| HttpError::BadRequest("empty request".to_string()))?;
    let request_line = parse_request_line(as_text(first)?)?;

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        let line = as_text(line)?;
        parse_header_line(line)?;
        headers.push(line.to_string());
    }

    Ok(request_line.into_request(headers))
}

/// Validates `METHOD SP target SP version`.
///
/// The method is checked first, so any non-GET line is a 405 whatever else
/// is wrong with it. Then the field count (exactly three, split on single
/// spaces) and finally the version.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HttpError> {
    if line.is_empty() {
        return Err(HttpError::BadRequest("empty request line".to_string()));
    }

    let fields: Vec<&str> = line.split(' ').collect();

    if fields[0] != SUPPORTED_METHOD {
        return Err(HttpError::MethodNotAllowed(format!(
            "only {} is supported, got {:?}",
            SUPPORTED_METHOD, fields[0]
        )));
    }

    if fields.len() != 3 {
        return Err(HttpError::BadRequest(format!(
            "request line must be 'METHOD target VERSION', got {} fields",
            fields.len()
        )));
    }

    let (target, version) = (fields[1], fields[2]);

    if target.is_empty() {
        return Err(HttpError::BadRequest("empty request target".to_string()));
    }

    if version != SUPPORTED_VERSION {
        return Err(HttpError::HttpVersionNotSupported(format!(
            "only {} is supported, got {:?}",
            SUPPORTED_VERSION, version
        )));
    }

    Ok(RequestLine {
        method: fields[0].to_string(),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Checks the shape of a header line; the value is not interpreted.
pub fn parse_header_line(line: &str) -> Result<(), HttpError> {
    if HEADER_LINE.is_match(line) {
        Ok(())
    } else {
        Err(HttpError::BadRequest(format!(
            "header line must be 'key: value', got {:?}",
            line
        )))
    }
}

fn as_text(line: &[u8]) -> Result<&str, HttpError> {
    std::str::from_utf8(line)
        .map_err(|_| HttpError::BadRequest("request is not valid UTF-8".to_string()))
}
