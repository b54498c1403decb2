//! CRLF line splitting over a raw request buffer.

use std::iter::FusedIterator;

const CRLF: &[u8] = b"\r\n";

/// Iterator over the CRLF-separated lines of a byte buffer.
///
/// Lines are yielded without their terminator. A final line without a
/// trailing CRLF is still yielded; a buffer ending in CRLF yields a final
/// empty line. Bytes are not interpreted, a lone `\r` or `\n` stays inside
/// the line it appears in.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Lines<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { rest: Some(buf) }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        match find_crlf(rest) {
            Some(pos) => {
                self.rest = Some(&rest[pos + CRLF.len()..]);
                Some(&rest[..pos])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}

pub fn lines(buf: &[u8]) -> Lines<'_> {
    Lines::new(buf)
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}
