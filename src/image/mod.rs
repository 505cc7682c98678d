//! Persistence of generated images
//!
//! Writes base64 image payloads returned by the generation tools to a
//! caller-chosen path on the local filesystem.

pub mod mock;
pub mod store;

pub use mock::MockImageStore;
pub use store::FileImageStore;

use crate::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Decode `base64_data` and write it to `output_path`, returning the
    /// absolute path written.
    async fn save(&self, base64_data: &str, output_path: &Path) -> Result<PathBuf>;
}
