use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::{StateError, Store};

/// The always-available local store: one JSON file per key under a root
/// directory.
///
/// This is the durability backstop of the fallback chain. The root directory
/// is created lazily on first access, memoized behind a [`OnceCell`] so
/// concurrent callers share a single initialization and a failed attempt is
/// retried on the next call.
pub struct FileStore {
    root: PathBuf,
    init: OnceCell<()>,
}

impl FileStore {
    /// Creates a store rooted at `root`. No filesystem access happens until
    /// the first read or write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            init: OnceCell::new(),
        }
    }

    async fn ensure_root(&self) -> Result<(), StateError> {
        self.init
            .get_or_try_init(|| async {
                tokio::fs::create_dir_all(&self.root).await?;
                Ok::<_, StateError>(())
            })
            .await?;
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StateError> {
        self.ensure_root().await?;
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.ensure_root().await?;
        tokio::fs::write(self.path(key), value).await?;
        Ok(())
    }
}
