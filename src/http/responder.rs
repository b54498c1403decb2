//! Resource responses
//!
//! Turns a validated request into a response: a directory listing, a file
//! transfer, a redirect or an error page. All state here is read-only and
//! shared between connections behind an `Arc`.

use crate::config::Config;
use crate::http::error::HttpError;
use crate::http::mime::MimeTable;
use crate::http::request::Request;
use crate::http::resolver::{DocumentRoot, Resolution, ResolvedTarget};
use crate::http::response::Response;
use anyhow::Context;
use std::borrow::Cow;
use std::io;
use std::path::Path;

const DIR_ICON: &str = "/icons/dir.png";
const FILE_ICON: &str = "/icons/regfile.png";

/// Serves resources from one document root.
#[derive(Debug, Clone)]
pub struct Responder {
    root: DocumentRoot,
    mime: MimeTable,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

impl Responder {
    pub fn new(root: DocumentRoot, mime: MimeTable) -> Self {
        Self { root, mime }
    }

    /// Serves `path` with the built-in MIME table.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(DocumentRoot::new(path)?, MimeTable::default()))
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let root = DocumentRoot::new(&cfg.server.document_root).with_context(|| {
            format!(
                "cannot serve from {}",
                cfg.server.document_root.display()
            )
        })?;
        let mime = MimeTable::default().with_entries(cfg.mime_types.clone());
        Ok(Self::new(root, mime))
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    pub fn mime(&self) -> &MimeTable {
        &self.mime
    }

    /// Builds the response for a request; failures become error pages.
    pub async fn respond(&self, request: &Request) -> Response {
        match self.try_respond(request).await {
            Ok(response) => response,
            Err(e) => error_response(&e),
        }
    }

    async fn try_respond(&self, request: &Request) -> Result<Response, HttpError> {
        match self.root.resolve_request(&request.target, &self.mime).await? {
            Resolution::Redirect { location } => {
                tracing::debug!(location = %location, "Redirecting to trailing slash");
                Ok(Response::redirect(location))
            }
            Resolution::Listing(target) => {
                let entries = read_listing(&target)
                    .await
                    .map_err(|e| HttpError::NotFound(format!("{}: {}", target.name, e)))?;
                let title = format!("/{}", target.name);
                Ok(Response::html(render_listing(&title, &entries)))
            }
            Resolution::File {
                target,
                file,
                len,
                content_type,
            } => {
                tracing::debug!(
                    file = %target.path.display(),
                    len,
                    content_type = %content_type,
                    "Serving file"
                );
                Ok(Response::file(file, len, content_type))
            }
        }
    }
}

/// Logs a classified failure and builds its error page.
pub fn error_response(error: &HttpError) -> Response {
    let status = error.status();
    tracing::warn!(
        status = status.as_u16(),
        kind = status.reason_phrase(),
        detail = error.detail(),
        "Request rejected"
    );
    Response::error(status)
}

/// Entries of a listed directory, sorted by name.
pub async fn read_listing(target: &ResolvedTarget) -> io::Result<Vec<ListingEntry>> {
    let mut dir = tokio::fs::read_dir(&target.path).await?;
    let mut entries = Vec::new();

    while let Some(entry) = dir.next_entry().await? {
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort();
    Ok(entries)
}

/// Renders a directory listing page titled `Index of <title>`.
pub fn render_listing(title: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(title);
    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\n\
         <head>\n\
         \t<meta charset='UTF-8'>\n\
         \t<title>Index of {title}</title>\n\
         </head>\n\n\
         <body>\n\
         \t<h1>Index of {title}</h1>\n\
         \t<table>\n"
    );

    for entry in entries {
        let (class, icon, suffix) = if entry.is_dir {
            ("dir", DIR_ICON, "/")
        } else {
            ("file", FILE_ICON, "")
        };
        let name = escape_html(&entry.name);

        html.push_str(&format!(
            "\t\t<tr>\n\
             \t\t\t<td valign='top' class='icon {class}'><img src='{icon}' /></td>\n\
             \t\t\t<td><a href='{name}{suffix}'>{name}{suffix}</a></td>\n\
             \t\t</tr>\n"
        ));
    }

    html.push_str("\t</table>\n</body>\n\n</html>\n");
    html
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape_html("a<b>&'c\""), "a&lt;b&gt;&amp;&#39;c&quot;");
        assert!(matches!(escape_html("plain.txt"), Cow::Borrowed(_)));
    }
}
