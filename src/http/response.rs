use tokio::fs::File;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File or directory listing served
/// - `MovedPermanently` (301): Directory requested without trailing slash
/// - `BadRequest` (400): Malformed request line or header line
/// - `Forbidden` (403): Target escapes the document root
/// - `NotFound` (404): Resource not found
/// - `MethodNotAllowed` (405): HTTP method other than GET
/// - `UnsupportedMediaType` (415): File extension not in the MIME table
/// - `HttpVersionNotSupported` (505): Version other than HTTP/1.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::HttpVersionNotSupported => 505,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }

    /// Whether the response advertises a persistent connection.
    pub fn keeps_alive(&self) -> bool {
        *self == StatusCode::Ok
    }
}

/// Response payload.
#[derive(Debug)]
pub enum Body {
    Empty,
    Bytes(Vec<u8>),
    /// An open file sent in chunks; `len` is the size taken when it was opened.
    File { file: File, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete HTTP response ready to be framed and sent.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    /// Media type without parameters, `; charset=UTF-8` is added on the wire
    pub content_type: String,
    /// Target of a redirect, sent as `Location`
    pub location: Option<String>,
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/css")
///     .body(Body::Bytes(b"body {}".to_vec()))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    location: Option<String>,
    body: Body,
}

impl ResponseBuilder {
    /// Creates a new builder; content type defaults to `text/html`.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: "text/html".to_string(),
            location: None,
            body: Body::Empty,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            location: self.location,
            body: self.body,
        }
    }
}

impl Response {
    /// A 200 response with an HTML body.
    pub fn html(body: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .body(Body::Bytes(body.into().into_bytes()))
            .build()
    }

    /// A 200 response streaming an open file.
    pub fn file(file: File, len: u64, content_type: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(Body::File { file, len })
            .build()
    }

    /// A bodyless 301 pointing at `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::MovedPermanently)
            .location(location)
            .build()
    }

    /// An error response carrying the standard error page.
    pub fn error(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .body(Body::Bytes(error_page(status).into_bytes()))
            .build()
    }

    pub fn content_length(&self) -> u64 {
        self.body.len()
    }
}

/// Minimal HTML page naming the status code and reason phrase.
pub fn error_page(status: StatusCode) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\n\
         <head>\n\
         \t<meta charset='UTF-8'>\n\
         \t<link rel='stylesheet' type='text/css' href='/styles.css'>\n\
         \t<title>{code} {reason}</title>\n\
         </head>\n\n\
         <body>\n\
         \t<div>\n\
         \t\t<h1>ERROR {code}</h1>\n\
         \t\t<h2>{reason}</h2>\n\
         \t</div>\n\
         </body>\n\n\
         </html>\n",
        code = status.as_u16(),
        reason = status.reason_phrase(),
    )
}
