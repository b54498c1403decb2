//! Request target resolution
//!
//! This module maps a request target onto the document root. A target is
//! first checked without touching the file system (absolute-style and
//! parent-traversal targets are refused), then probed, canonicalised and
//! checked again for containment so that symlinks cannot lead outside the
//! root.

use crate::http::error::HttpError;
use crate::http::mime::MimeTable;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Resource served for the root target.
pub const INDEX_FILE: &str = "index.html";

/// What a resolved path turned out to be on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    RegularFile,
    Directory,
    Missing,
}

/// A request target mapped to a path under the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Resource name relative to the root (e.g., "docs/" or "index.html")
    pub name: String,
    /// Absolute path; canonical unless the target is missing
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Final outcome of resolving a request.
#[derive(Debug)]
pub enum Resolution {
    /// Directory requested without a trailing slash
    Redirect { location: String },
    /// Directory requested with a trailing slash
    Listing(ResolvedTarget),
    /// Regular file, already opened
    File {
        target: ResolvedTarget,
        file: File,
        len: u64,
        content_type: String,
    },
}

/// The directory all resources are served from.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    /// Canonicalises `path`, which must be an existing directory.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::fs::canonicalize(path.as_ref())?;

        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Maps `target` to a path under the root and probes it.
    ///
    /// Refused targets never reach the file system.
    pub async fn resolve(&self, target: &str) -> Result<ResolvedTarget, HttpError> {
        let name = resource_name(target)?;
        let joined = self.root.join(&name);

        let path = match tokio::fs::canonicalize(&joined).await {
            Ok(path) => path,
            Err(_) => {
                return Ok(ResolvedTarget {
                    name,
                    path: joined,
                    kind: TargetKind::Missing,
                });
            }
        };

        if !path.starts_with(&self.root) {
            return Err(HttpError::Forbidden(format!(
                "{:?} resolves outside the document root",
                target
            )));
        }

        let kind = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => TargetKind::Directory,
            Ok(meta) if meta.is_file() => TargetKind::RegularFile,
            _ => TargetKind::Missing,
        };

        Ok(ResolvedTarget { name, path, kind })
    }

    /// Resolves `target` all the way to a redirect, a listing or an open file.
    pub async fn resolve_request(
        &self,
        target: &str,
        mime: &MimeTable,
    ) -> Result<Resolution, HttpError> {
        let resolved = self.resolve(target).await?;

        match resolved.kind {
            TargetKind::Directory if !target.ends_with('/') => Ok(Resolution::Redirect {
                location: format!("{}/", target),
            }),
            TargetKind::Directory => Ok(Resolution::Listing(resolved)),
            TargetKind::Missing => Err(HttpError::NotFound(resolved.name)),
            TargetKind::RegularFile => {
                let file = File::open(&resolved.path)
                    .await
                    .map_err(|e| HttpError::NotFound(format!("{}: {}", resolved.name, e)))?;

                let content_type = mime
                    .for_name(&resolved.name)
                    .ok_or_else(|| HttpError::UnsupportedMediaType(resolved.name.clone()))?
                    .to_string();

                let len = file
                    .metadata()
                    .await
                    .map_err(|e| HttpError::NotFound(format!("{}: {}", resolved.name, e)))?
                    .len();

                Ok(Resolution::File {
                    target: resolved,
                    file,
                    len,
                    content_type,
                })
            }
        }
    }
}

/// Turns a request target into a resource name relative to the root.
///
/// One leading `/` is dropped. What remains must not start with another
/// `/`, must not be made only of dots and must not contain a `..` segment.
/// An empty name becomes [`INDEX_FILE`].
///
/// # Example
///
/// ```
/// # use sstt::http::resolver::resource_name;
/// assert_eq!(resource_name("/").unwrap(), "index.html");
/// assert_eq!(resource_name("/docs/").unwrap(), "docs/");
/// assert!(resource_name("//etc/passwd").is_err());
/// assert!(resource_name("/a/../../b").is_err());
/// ```
pub fn resource_name(target: &str) -> Result<String, HttpError> {
    let name = target.strip_prefix('/').unwrap_or(target);

    if name.starts_with('/') {
        return Err(HttpError::Forbidden(format!("absolute path {:?}", target)));
    }

    if !name.is_empty() && name.chars().all(|c| c == '.') {
        return Err(HttpError::Forbidden(format!("dot-only path {:?}", target)));
    }

    if name.split('/').any(|segment| segment == "..") {
        return Err(HttpError::Forbidden(format!("parent traversal in {:?}", target)));
    }

    if name.is_empty() {
        return Ok(INDEX_FILE.to_string());
    }

    Ok(name.to_string())
}
