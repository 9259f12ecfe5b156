//! The store: base directory bootstrap and whole-file collection I/O.

use crate::collection::Collection;
use crate::error::{Result, StoreError};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base directory holding one `<collection>.json` file per collection.
    pub path: PathBuf,

    /// Whether to create the base directory if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./database"),
            create_if_missing: true,
        }
    }
}

/// A flat-file document store.
///
/// Each collection is one JSON array file under the base directory. The
/// store reads and writes whole files; there is no index, no cache, and no
/// cross-process coordination (concurrent processes race, last writer wins).
pub struct Store {
    /// Store configuration.
    config: StoreConfig,

    /// One mutation lock per collection, created on first use.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Store {
    /// Open a store at the configured base directory, creating the
    /// directory if it is absent and `create_if_missing` is set.
    pub fn open(config: StoreConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.create_if_missing {
                return Err(StoreError::NotInitialized);
            }
            fs::create_dir_all(&config.path)?;
        }

        debug!(path = %config.path.display(), "opened store");

        Ok(Self {
            config,
            locks: Mutex::new(HashMap::new()),
        })
    }

    // --- Collection Operations ---

    /// Get a typed handle for `name`, creating its backing file on first use.
    pub fn collection<T>(&self, name: &str) -> Result<Collection<'_, T>> {
        self.register_collection(name)?;
        Ok(Collection::new(self, name))
    }

    /// Create the backing file for `name` if it doesn't exist yet.
    ///
    /// Idempotent: an existing file is left untouched.
    pub fn register_collection(&self, name: &str) -> Result<()> {
        let path = self.collection_path(name)?;
        if !path.exists() {
            fs::write(&path, b"[]")?;
            debug!(collection = name, "created empty collection file");
        }
        Ok(())
    }

    // --- Collection File I/O ---

    /// Read and parse the full contents of a collection file.
    ///
    /// The file is not created on demand: reading a collection that was
    /// never registered fails with [`StoreError::CollectionNotFound`].
    pub fn read_all<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.collection_path(name)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::CollectionNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        trace!(collection = name, bytes = contents.len(), "read collection file");

        serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            collection: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize `records` and replace the collection file contents in full.
    ///
    /// The new contents are staged to a temp file, synced, and renamed into
    /// place, so a failed write leaves the previous contents intact.
    pub fn write_all<T: Serialize>(&self, name: &str, records: &[T]) -> Result<()> {
        let path = self.collection_path(name)?;
        let payload =
            serde_json::to_vec(records).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = File::create(&tmp_path)?;
        file.write_all(&payload)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)?;

        trace!(collection = name, records = records.len(), "replaced collection file");
        Ok(())
    }

    /// Base directory of this store.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    // --- Private Helpers ---

    /// Mutation lock for one collection, created on first use.
    pub(crate) fn collection_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(
            locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Map a collection name to its file path, rejecting names that would
    /// escape the base directory.
    fn collection_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.config.path.join(format!("{name}.json")))
    }
}
