use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, anyhow};
use uuid::Uuid;

use crate::domain::image::ImageFormat;
use crate::domain::repository::ImageStore;
use crate::error::DirectoryError;

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Images on the local filesystem, served by the router under `/storage`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_base: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, app_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base: format!("{}/storage", app_url.trim_end_matches('/')),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a reference. Only plain relative paths are accepted.
    fn path_for(&self, reference: &str) -> Result<PathBuf, DirectoryError> {
        let relative = Path::new(reference);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if reference.is_empty() || !plain {
            return Err(anyhow!("image reference escapes storage root: {reference}").into());
        }
        Ok(self.root.join(relative))
    }
}

impl ImageStore for LocalImageStore {
    async fn store(
        &self,
        bytes: &[u8],
        format: ImageFormat,
        category: &str,
    ) -> Result<String, DirectoryError> {
        let reference = format!("{category}/{}.{}", Uuid::new_v4().simple(), format.extension());
        let path = self.path_for(&reference)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create image directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("write image {}", path.display()))?;
        tracing::debug!(reference, size = bytes.len(), "image stored");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<(), DirectoryError> {
        // Remote photos are not ours to remove.
        if is_remote(reference) {
            return Ok(());
        }
        let path = self.path_for(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("delete image {}", path.display()))
                .into()),
        }
    }

    fn resolve_url(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;
        if is_remote(reference) {
            return Some(reference.to_owned());
        }
        Some(format!("{}/{}", self.public_base, reference))
    }
}
