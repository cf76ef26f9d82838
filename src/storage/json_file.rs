//! JSON file storage implementation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Dataset, Storage};
use crate::{Error, Result};

/// File-backed storage: the whole dataset as one pretty-printed JSON document
pub struct JsonFileStore {
    path: PathBuf,
    /// Set while the file on disk fails to parse; saves are refused meanwhile
    unreadable: AtomicBool,
}

impl JsonFileStore {
    /// Open a data file, creating it with empty collections if it doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            unreadable: AtomicBool::new(false),
        };
        if !store.path.exists() {
            tracing::info!("Initializing empty datastore at {}", store.path.display());
            store.save(&Dataset::default())?;
        }
        Ok(store)
    }
}

impl Storage for JsonFileStore {
    /// Missing file: recreate it empty. Unparseable file: log and serve an
    /// empty dataset, and refuse to save over the file until it parses again.
    fn load(&self) -> Result<Dataset> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Datastore {} is missing, reinitializing", self.path.display());
                self.unreadable.store(false, Ordering::SeqCst);
                let empty = Dataset::default();
                self.save(&empty)?;
                return Ok(empty);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(dataset) => {
                self.unreadable.store(false, Ordering::SeqCst);
                Ok(dataset)
            }
            Err(e) => {
                tracing::error!("Error reading data file {}: {}", self.path.display(), e);
                self.unreadable.store(true, Ordering::SeqCst);
                Ok(Dataset::default())
            }
        }
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        if self.unreadable.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!(
                "refusing to overwrite unreadable data file {}; repair or move it first",
                self.path.display()
            )));
        }
        let mut payload = serde_json::to_vec_pretty(dataset)?;
        payload.push(b'\n');
        write_atomic(&self.path, &payload)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write to a sibling temp file, sync, then rename over the target, so a
/// failed write never leaves a truncated document behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("data.json");
    let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    let written = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
