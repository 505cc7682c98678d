use super::ImageStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Records saves in memory instead of touching the filesystem.
pub struct MockImageStore {
    saved: Arc<Mutex<Vec<(PathBuf, String)>>>,
    base_path: PathBuf,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageStore {
    pub fn new() -> Self {
        Self {
            saved: Arc::new(Mutex::new(Vec::new())),
            base_path: PathBuf::from("/tmp"),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Directory that relative output paths are reported under.
    pub fn with_base_path(mut self, path: PathBuf) -> Self {
        self.base_path = path;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Every `(absolute path, base64 payload)` pair saved so far.
    pub fn saved(&self) -> Vec<(PathBuf, String)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn get_save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl Default for MockImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn save(&self, base64_data: &str, output_path: &Path) -> Result<PathBuf> {
        if *self.should_fail.lock().unwrap() {
            return Err(Error::Io(std::io::Error::other("Mock failure")));
        }

        let absolute_path = if output_path.is_absolute() {
            output_path.to_path_buf()
        } else {
            self.base_path.join(output_path)
        };

        self.saved
            .lock()
            .unwrap()
            .push((absolute_path.clone(), base64_data.to_string()));

        Ok(absolute_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_records_saves() {
        let store = MockImageStore::new().with_base_path(PathBuf::from("/work"));

        let saved = store.save("AAAA", Path::new("out/a.png")).await.unwrap();
        assert_eq!(saved, PathBuf::from("/work/out/a.png"));

        let saved = store.save("BBBB", Path::new("/abs/b.png")).await.unwrap();
        assert_eq!(saved, PathBuf::from("/abs/b.png"));

        assert_eq!(store.get_save_count(), 2);
        assert_eq!(store.saved()[1].1, "BBBB");
    }

    #[tokio::test]
    async fn test_mock_store_failure() {
        let store = MockImageStore::new().with_failure(true);
        let err = store.save("AAAA", Path::new("a.png")).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(store.get_save_count(), 0);
    }
}
