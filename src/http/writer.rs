use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Size of each block read from a file and written to the socket.
pub const CHUNK_SIZE: usize = 8192;

const KEEP_ALIVE: &str = "timeout=5, max=1000";

/// Builds the status line and headers for a response.
///
/// Layout is fixed: status line, `Content-Length`, `Connection`,
/// `Content-Type` (with `; charset=UTF-8`), then `Keep-Alive` for 200 only,
/// then the blank line.
pub fn build_header(status: StatusCode, content_type: &str, content_length: u64) -> Vec<u8> {
    frame_header(status, content_type, content_length, None)
}

fn frame_header(
    status: StatusCode,
    content_type: &str,
    content_length: u64,
    location: Option<&str>,
) -> Vec<u8> {
    let mut head = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );

    if let Some(location) = location {
        head.push_str(&format!("Location: {}\r\n", location));
    }

    head.push_str(&format!("Content-Length: {}\r\n", content_length));

    if status.keeps_alive() {
        head.push_str("Connection: Keep-Alive\r\n");
    } else {
        head.push_str("Connection: close\r\n");
    }

    head.push_str(&format!("Content-Type: {}; charset=UTF-8\r\n", content_type));

    if status.keeps_alive() {
        head.push_str(&format!("Keep-Alive: {}\r\n", KEEP_ALIVE));
    }

    head.push_str("\r\n");
    head.into_bytes()
}

/// Header plus in-memory body, ready for a single write.
fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = frame_header(
        resp.status,
        &resp.content_type,
        resp.content_length(),
        resp.location.as_deref(),
    );

    if let Body::Bytes(bytes) = &resp.body {
        buf.extend_from_slice(bytes);
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    body: Body,
    status: StatusCode,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let buffer = serialize_head(&response);
        Self {
            buffer,
            written: 0,
            body: response.body,
            status: response.status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Writes the whole response; returns the number of bytes sent.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        let mut sent = self.written as u64;

        if let Body::File { file, len } = &mut self.body {
            sent += send_file(file, *len, stream).await?;
        }

        stream.flush().await?;
        Ok(sent)
    }
}

/// Copies `len` bytes of `file` to `stream` in `CHUNK_SIZE` blocks plus a
/// final partial block.
async fn send_file<R, W>(file: &mut R, len: u64, stream: &mut W) -> anyhow::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let full_chunks = len / CHUNK_SIZE as u64;
    let remainder = (len % CHUNK_SIZE as u64) as usize;

    for _ in 0..full_chunks {
        file.read_exact(&mut chunk).await?;
        stream.write_all(&chunk).await?;
    }

    if remainder > 0 {
        file.read_exact(&mut chunk[..remainder]).await?;
        stream.write_all(&chunk[..remainder]).await?;
    }

    Ok(len)
}
