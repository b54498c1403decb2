use sstt::http::error::HttpError;
use sstt::http::response::{error_page, Body, Response, ResponseBuilder, StatusCode};
use sstt::http::writer::{build_header, ResponseWriter};

const ALL: [StatusCode; 8] = [
    StatusCode::Ok,
    StatusCode::MovedPermanently,
    StatusCode::BadRequest,
    StatusCode::Forbidden,
    StatusCode::NotFound,
    StatusCode::MethodNotAllowed,
    StatusCode::UnsupportedMediaType,
    StatusCode::HttpVersionNotSupported,
];

async fn serialize(response: Response) -> String {
    let mut out = Vec::new();
    ResponseWriter::new(response)
        .write_to_stream(&mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_status_code_as_u16() {
    let codes: Vec<u16> = ALL.iter().map(|s| s.as_u16()).collect();
    assert_eq!(codes, vec![200, 301, 400, 403, 404, 405, 415, 505]);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::MovedPermanently.reason_phrase(), "Moved Permanently");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    assert_eq!(
        StatusCode::UnsupportedMediaType.reason_phrase(),
        "Unsupported Media Type"
    );
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_http_error_status_mapping() {
    let cases = [
        (HttpError::BadRequest("x".into()), StatusCode::BadRequest),
        (HttpError::Forbidden("x".into()), StatusCode::Forbidden),
        (HttpError::NotFound("x".into()), StatusCode::NotFound),
        (HttpError::MethodNotAllowed("x".into()), StatusCode::MethodNotAllowed),
        (HttpError::UnsupportedMediaType("x".into()), StatusCode::UnsupportedMediaType),
        (HttpError::HttpVersionNotSupported("x".into()), StatusCode::HttpVersionNotSupported),
    ];

    for (error, status) in cases {
        assert_eq!(error.status(), status);
        assert_eq!(error.detail(), "x");
    }
}

#[test]
fn test_build_header_ok() {
    let header = build_header(StatusCode::Ok, "image/png", 1234);
    assert_eq!(
        String::from_utf8(header).unwrap(),
        "HTTP/1.1 200 OK\r\n\
         Content-Length: 1234\r\n\
         Connection: Keep-Alive\r\n\
         Content-Type: image/png; charset=UTF-8\r\n\
         Keep-Alive: timeout=5, max=1000\r\n\
         \r\n"
    );
}

#[test]
fn test_build_header_error_closes() {
    let header = build_header(StatusCode::NotFound, "text/html", 10);
    assert_eq!(
        String::from_utf8(header).unwrap(),
        "HTTP/1.1 404 Not Found\r\n\
         Content-Length: 10\r\n\
         Connection: close\r\n\
         Content-Type: text/html; charset=UTF-8\r\n\
         \r\n"
    );
}

#[test]
fn test_only_ok_keeps_alive() {
    for status in ALL {
        let header = String::from_utf8(build_header(status, "text/html", 0)).unwrap();
        assert_eq!(header.contains("Keep-Alive: timeout=5"), status == StatusCode::Ok);
        assert_eq!(header.contains("Connection: close"), status != StatusCode::Ok);
    }
}

#[test]
fn test_error_page_mentions_status() {
    let page = error_page(StatusCode::NotFound);
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("ERROR 404"));
    assert!(page.contains("Not Found"));
}

#[test]
fn test_response_error_helper() {
    let response = Response::error(StatusCode::Forbidden);

    assert_eq!(response.status, StatusCode::Forbidden);
    assert_eq!(response.content_type, "text/html");
    assert_eq!(
        response.content_length(),
        error_page(StatusCode::Forbidden).len() as u64
    );
}

#[test]
fn test_response_builder_defaults() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.content_type, "text/html");
    assert!(response.location.is_none());
    assert!(response.body.is_empty());
}

#[test]
fn test_response_builder_fluent_api() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .content_type("text/css")
        .body(Body::Bytes(b"body {}".to_vec()))
        .build();

    assert_eq!(response.content_type, "text/css");
    assert_eq!(response.content_length(), 7);
}

#[tokio::test]
async fn test_serialized_error_response_has_exact_length() {
    let text = serialize(Response::error(StatusCode::MethodNotAllowed)).await;
    let (head, body) = text.split_once("\r\n\r\n").unwrap();

    assert!(head.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));
    assert!(body.contains("405"));
}

#[tokio::test]
async fn test_serialized_redirect() {
    let text = serialize(Response::redirect("/docs/")).await;

    assert_eq!(
        text,
        "HTTP/1.1 301 Moved Permanently\r\n\
         Location: /docs/\r\n\
         Content-Length: 0\r\n\
         Connection: close\r\n\
         Content-Type: text/html; charset=UTF-8\r\n\
         \r\n"
    );
}

#[tokio::test]
async fn test_serialized_html_response() {
    let text = serialize(Response::html("<p>hi</p>")).await;

    assert!(text.starts_with("HTTP/1.1 200 OK\r\nContent-Length: 9\r\n"));
    assert!(text.ends_with("\r\n\r\n<p>hi</p>"));
}
