//! Raw content persistence to the local filesystem

use crate::storage::naming::{output_file_name, FileType};
use crate::SpiderError;
use std::path::{Path, PathBuf};

/// Writes fetched pages under a save directory using deterministic names.
///
/// Re-running a crawl over the same root overwrites the earlier files
/// instead of adding new ones.
#[derive(Debug, Clone)]
pub struct ContentPersister {
    root_site: String,
    save_dir: PathBuf,
}

impl ContentPersister {
    /// Creates a persister, creating `save_dir` if it does not exist yet
    pub fn new(root_site: &str, save_dir: &Path) -> Result<Self, SpiderError> {
        std::fs::create_dir_all(save_dir).map_err(|source| SpiderError::Persist {
            path: save_dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root_site: root_site.to_string(),
            save_dir: save_dir.to_path_buf(),
        })
    }

    /// Full path the content of `link` is stored at
    pub fn path_for(&self, link: &str, file_type: FileType) -> PathBuf {
        self.save_dir
            .join(output_file_name(&self.root_site, link, file_type))
    }

    /// Persists `body` for `link` and returns the written path.
    ///
    /// Text files start with a two-line header naming the root site and the
    /// link, followed by the body bytes unchanged. PDFs are written as raw bytes.
    pub fn persist(
        &self,
        link: &str,
        file_type: FileType,
        body: &[u8],
    ) -> Result<PathBuf, SpiderError> {
        let path = self.path_for(link, file_type);

        let contents = match file_type {
            FileType::Text => {
                let header = format!("root_site:{}\nweb_url:{}\n", self.root_site, link);
                let mut contents = Vec::with_capacity(header.len() + body.len());
                contents.extend_from_slice(header.as_bytes());
                contents.extend_from_slice(body);
                contents
            }
            FileType::Pdf => body.to_vec(),
        };

        std::fs::write(&path, contents).map_err(|source| SpiderError::Persist {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} to {}", link, path.display());
        Ok(path)
    }
}
