use super::ImageStore;
use crate::Result;
use async_trait::async_trait;
use base64::Engine as _;
use std::path::{Component, Path, PathBuf};

/// Writes images straight to disk. Relative paths resolve against the
/// current working directory.
#[derive(Debug, Default, Clone)]
pub struct FileImageStore;

impl FileImageStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn save(&self, base64_data: &str, output_path: &Path) -> Result<PathBuf> {
        let absolute_path = normalize(&std::path::absolute(output_path)?);

        let bytes = base64::engine::general_purpose::STANDARD.decode(base64_data)?;

        if let Some(parent) = absolute_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute_path, &bytes).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            bytes.len(),
            absolute_path.display()
        );

        Ok(absolute_path)
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
