/// The only method the server accepts.
pub const SUPPORTED_METHOD: &str = "GET";

/// The only protocol version the server accepts.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// Represents a validated HTTP request from a client.
///
/// Built once by the parser after the request line and every header line
/// passed validation. Header lines are kept verbatim and in order; the
/// server does not act on any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method, always `GET` once validated
    pub method: String,
    /// The request target as sent (e.g., "/docs/index.html")
    pub target: String,
    /// HTTP version, always `HTTP/1.1` once validated
    pub version: String,
    /// Raw `key: value` header lines
    pub headers: Vec<String>,
}

impl Request {
    /// The target with a single leading `/` removed.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::request::Request;
    /// let req = Request {
    ///     method: "GET".into(),
    ///     target: "/img/logo.png".into(),
    ///     version: "HTTP/1.1".into(),
    ///     headers: vec![],
    /// };
    /// assert_eq!(req.path(), "img/logo.png");
    /// ```
    pub fn path(&self) -> &str {
        self.target.strip_prefix('/').unwrap_or(&self.target)
    }

    /// Retrieves a header value by name, ignoring ASCII case.
    ///
    /// Returns the first matching line's value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (name, value) = line.split_once(": ")?;
            name.eq_ignore_ascii_case(key).then_some(value)
        })
    }
}
