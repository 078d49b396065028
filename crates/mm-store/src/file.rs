use std::fs;
use std::path::{Path, PathBuf};

use mm_core::entities::Watchlist;

use crate::{StoreError, WatchlistStore, decode};

/// Watchlist persisted as a pretty-printed JSON file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl WatchlistStore for JsonFileStore {
    fn load(&self) -> Watchlist {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw, &self.path.display().to_string()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Watchlist::default(),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "cannot read watchlist; starting empty");
                Watchlist::default()
            }
        }
    }

    fn save(&mut self, watchlist: &Watchlist) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let payload = serde_json::to_vec_pretty(watchlist)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, payload).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), items = watchlist.len(), "watchlist saved");
        Ok(())
    }
}
