//! Content classification and deterministic file naming

use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// How a link's content is treated, decided from the link itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Pdf,
    /// Excel workbooks are never fetched
    Spreadsheet,
}

impl ContentKind {
    /// Classifies a link by its lowercased suffix.
    ///
    /// The suffix test is on the bare string, so `.../reportpdf` counts as a
    /// PDF just like `.../report.pdf`.
    pub fn classify(link: &str) -> Self {
        let lowered = link.to_lowercase();
        if lowered.ends_with("pdf") {
            Self::Pdf
        } else if lowered.ends_with("xlsx") || lowered.ends_with("xls") {
            Self::Spreadsheet
        } else {
            Self::Text
        }
    }

    /// Refines a link classification with the response Content-Type
    pub fn refine(self, content_type: Option<&str>) -> Self {
        match (self, content_type) {
            (Self::Text, Some(ct)) if ct.to_lowercase().starts_with("application/pdf") => {
                Self::Pdf
            }
            (kind, _) => kind,
        }
    }

    /// The on-disk file type, or None for content that is never stored
    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Self::Text => Some(FileType::Text),
            Self::Pdf => Some(FileType::Pdf),
            Self::Spreadsheet => None,
        }
    }
}

/// On-disk representation of persisted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Pdf,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for FileType {
    type Err = ConfigError;

    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag.to_lowercase().as_str() {
            "txt" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ConfigError::UnknownFileType(flag.to_string())),
        }
    }
}

/// Replaces path separators so the root site can prefix a file name
pub fn sanitize_root(root_site: &str) -> String {
    root_site.replace('\\', "_").replace('/', "_")
}

/// Builds the content-addressed file name for `link` crawled from `root_site`.
///
/// Format: `<sanitized root><sha256(root_site + link) hex>.<ext>`. The same
/// (root, link) pair always yields the same name.
pub fn output_file_name(root_site: &str, link: &str, file_type: FileType) -> String {
    let mut hasher = Sha256::new();
    hasher.update(root_site.as_bytes());
    hasher.update(link.as_bytes());
    let digest = hex::encode(hasher.finalize());

    format!(
        "{}{}.{}",
        sanitize_root(root_site),
        digest,
        file_type.extension()
    )
}
