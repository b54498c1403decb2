//! MIME type lookup by file extension.

use std::collections::HashMap;

/// Extensions served out of the box.
const BUILTIN: &[(&str, &str)] = &[
    ("gif", "image/gif"),
    ("jpg", "image/jpg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("ico", "image/ico"),
    ("zip", "image/zip"),
    ("gz", "image/gz"),
    ("tar", "image/tar"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("mp4", "video/mp4"),
    ("css", "text/css"),
];

/// Read-only `extension -> content type` table.
///
/// Extensions are matched case-sensitively and without the leading dot.
#[derive(Debug, Clone)]
pub struct MimeTable {
    entries: HashMap<String, String>,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(ext, ty)| (ext.to_string(), ty.to_string()))
                .collect(),
        }
    }
}

impl MimeTable {
    /// A table with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces entries.
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (ext, ty) in entries {
            let ext: String = ext.into();
            let ext = ext.trim_start_matches('.').to_string();
            self.entries.insert(ext, ty.into());
        }
        self
    }

    pub fn lookup(&self, ext: &str) -> Option<&str> {
        self.entries.get(ext).map(|v| v.as_str())
    }

    /// Content type for a resource name, from the text after the last `.`
    /// of its final `/`-separated component.
    ///
    /// # Example
    ///
    /// ```
    /// # use sstt::http::mime::MimeTable;
    /// let table = MimeTable::default();
    /// assert_eq!(table.for_name("img/logo.png"), Some("image/png"));
    /// assert_eq!(table.for_name("archive.tar.gz"), Some("image/gz"));
    /// assert_eq!(table.for_name("v1.2/README"), None);
    /// ```
    pub fn for_name(&self, name: &str) -> Option<&str> {
        let file_name = name.rsplit('/').next().unwrap_or(name);
        let (_, ext) = file_name.rsplit_once('.')?;
        self.lookup(ext)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
