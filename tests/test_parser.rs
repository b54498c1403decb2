use sstt::http::error::HttpError;
use sstt::http::parser::{parse_header_line, parse_http_request, parse_request_line};
use sstt::http::response::StatusCode;

fn status_of(req: &[u8]) -> StatusCode {
    parse_http_request(req).unwrap_err().status()
}

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers, vec!["Host: example.com".to_string()]);
}

#[test]
fn test_parse_multiple_headers_in_order() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(
        parsed.headers,
        vec![
            "Host: example.com".to_string(),
            "User-Agent: test-client".to_string(),
            "Accept: */*".to_string(),
        ]
    );
    assert_eq!(parsed.header("user-agent"), Some("test-client"));
}

#[test]
fn test_parse_request_without_headers_or_terminator() {
    let parsed = parse_http_request(b"GET /index.html HTTP/1.1").unwrap();

    assert_eq!(parsed.target, "/index.html");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_stops_at_blank_line() {
    // Anything after the header block is not inspected
    let req = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nthis is not a header\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
}

#[test]
fn test_parse_duplicate_headers_kept() {
    let req = b"GET / HTTP/1.1\r\nAccept: a\r\nAccept: b\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 2);
    assert_eq!(parsed.header("Accept"), Some("a"));
}

#[test]
fn test_parse_non_get_methods_rejected() {
    for method in ["POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH", "get"] {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method);
        assert_eq!(status_of(req.as_bytes()), StatusCode::MethodNotAllowed);
    }
}

#[test]
fn test_parse_method_checked_before_version_and_shape() {
    assert_eq!(status_of(b"POST / HTTP/1.0\r\n\r\n"), StatusCode::MethodNotAllowed);
    assert_eq!(status_of(b"POST /\r\n\r\n"), StatusCode::MethodNotAllowed);
    assert_eq!(status_of(b"POST / HTTP/1.1 extra\r\n\r\n"), StatusCode::MethodNotAllowed);
}

#[test]
fn test_parse_unsupported_version() {
    for version in ["HTTP/1.0", "HTTP/2", "http/1.1", "HTTP/1.1 "] {
        let line = format!("GET / {}", version);
        let err = parse_request_line(&line).unwrap_err();
        let expected = if version.ends_with(' ') {
            StatusCode::BadRequest
        } else {
            StatusCode::HttpVersionNotSupported
        };
        assert_eq!(err.status(), expected, "version {:?}", version);
    }
}

#[test]
fn test_parse_wrong_field_count() {
    assert_eq!(status_of(b"GET /\r\n\r\n"), StatusCode::BadRequest);
    assert_eq!(status_of(b"GET\r\n\r\n"), StatusCode::BadRequest);
    assert_eq!(status_of(b"GET / HTTP/1.1 extra\r\n\r\n"), StatusCode::BadRequest);
    // double space produces an empty field
    assert_eq!(status_of(b"GET  / HTTP/1.1\r\n\r\n"), StatusCode::BadRequest);
}

#[test]
fn test_parse_empty_target() {
    let err = parse_request_line("GET  HTTP/1.1").unwrap_err();
    assert!(matches!(err, HttpError::BadRequest(_)));
}

#[test]
fn test_parse_empty_request() {
    assert_eq!(status_of(b""), StatusCode::BadRequest);
    assert_eq!(status_of(b"\r\n\r\n"), StatusCode::BadRequest);
}

#[test]
fn test_parse_malformed_header() {
    assert_eq!(status_of(b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n"), StatusCode::BadRequest);
    assert_eq!(status_of(b"GET / HTTP/1.1\r\nHost:nospace\r\n\r\n"), StatusCode::BadRequest);
    assert_eq!(status_of(b"GET / HTTP/1.1\r\nX_Custom: a\r\n\r\n"), StatusCode::BadRequest);
    assert_eq!(status_of(b"GET / HTTP/1.1\r\nX-1: a\r\n\r\n"), StatusCode::BadRequest);
}

#[test]
fn test_parse_first_error_wins() {
    // Bad header after a bad version: the version is reported
    let req = b"GET / HTTP/1.0\r\nBrokenHeader\r\n\r\n";
    assert_eq!(status_of(req), StatusCode::HttpVersionNotSupported);
}

#[test]
fn test_parse_header_line_shapes() {
    assert!(parse_header_line("Host: example.com").is_ok());
    assert!(parse_header_line("Accept-Encoding: gzip, deflate").is_ok());
    assert!(parse_header_line("X-Empty: ").is_ok());
    assert!(parse_header_line(": value").is_err());
    assert!(parse_header_line("Host : value").is_err());
}

#[test]
fn test_parse_invalid_utf8() {
    assert_eq!(status_of(b"GET /\xff HTTP/1.1\r\n\r\n"), StatusCode::BadRequest);
}

#[test]
fn test_parse_target_kept_verbatim() {
    let parsed = parse_http_request(b"GET /search?q=rust HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(parsed.target, "/search?q=rust");
    assert_eq!(parsed.path(), "search?q=rust");
}
