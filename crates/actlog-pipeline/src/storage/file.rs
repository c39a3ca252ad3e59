use super::UserStore;
use actlog_core::{Error, Result, User};
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

/// Writes one `uid<id>.txt` activity report per user into a directory.
///
/// Files are opened read/write and created when absent. Unless `truncate` is
/// set, an existing file is overwritten from offset 0 without being
/// shortened, so a shorter report leaves the tail of the previous one behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    truncate: bool,
}

impl FileStore {
    /// Creates a store rooted at `dir` without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>, truncate: bool) -> Self {
        Self {
            dir: dir.into(),
            truncate,
        }
    }

    /// Creates `dir` (and parents) if needed, then returns a store rooted
    /// there.
    pub async fn create(dir: impl Into<PathBuf>, truncate: bool) -> Result<Self> {
        let store = Self::new(dir, truncate);
        fs::create_dir_all(&store.dir)
            .await
            .map_err(|source| Error::FileOpen {
                path: store.dir.clone(),
                source,
            })?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the report file for user `id`.
    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("uid{id}.txt"))
    }
}

impl UserStore for FileStore {
    async fn save(&self, user: &User) -> Result<()> {
        let path = self.path_for(user.id);

        let mut file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(self.truncate)
            .open(&path)
            .await
            .map_err(|source| Error::FileOpen {
                path: path.clone(),
                source,
            })?;

        let report = user.activity_report();
        file.write_all(report.as_bytes())
            .await
            .map_err(|source| Error::FileWrite {
                path: path.clone(),
                source,
            })?;
        // tokio hands writes to a blocking thread; flush waits for it.
        file.flush()
            .await
            .map_err(|source| Error::FileWrite { path, source })?;

        Ok(())
    }
}
