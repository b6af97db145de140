//! JSON document store on local disk
//!
//! The whole store is one JSON object. Each write goes to its own temporary
//! file in the same directory, is synced, then renamed over the original, so
//! the file on disk is always a complete document.

use super::KeyValueStore;
use crate::utils::StoreError;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (lazily) the store at `path`; the file is created on first write
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self, key: &str) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    key: key.to_string(),
                    message: format!("{}: {}", self.path.display(), e),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt {
                key: key.to_string(),
                message: format!("{} is not a JSON object", self.path.display()),
            }),
            Err(e) => Err(StoreError::Corrupt {
                key: key.to_string(),
                message: format!("{}: {}", self.path.display(), e),
            }),
        }
    }

    fn save(&self, key: &str, map: Map<String, Value>) -> Result<(), StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            key: key.to_string(),
            message: format!("{}: {}", self.path.display(), e),
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let body = serde_json::to_vec_pretty(&Value::Object(map)).map_err(|e| {
            StoreError::Write {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        // Unique temp file per write; dropped (and deleted) on any error below
        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(&body).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Persisted {} to {}", key, self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.load(key)?;
        map.insert(key.to_string(), value);
        self.save(key, map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("policy.json"));
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn test_write_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("policy.json");
        let mut store = FileStore::new(&path);

        store.set("a", json!(1)).unwrap();
        store.set("b", json!({"x": 2})).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("policy.json")]);
        assert_eq!(store.get("a").unwrap(), Some(json!(1)));
        assert_eq!(store.get("b").unwrap(), Some(json!({"x": 2})));
    }

    #[test]
    fn test_concurrent_writers_never_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        let blob = "x".repeat(64 * 1024);

        let writers: Vec<_> = (0..2)
            .map(|id| {
                let path = path.clone();
                let blob = blob.clone();
                std::thread::spawn(move || {
                    let mut store = FileStore::new(path);
                    (0..100)
                        .filter(|i| {
                            store
                                .set(&format!("writer{}", id), json!({"n": i, "pad": blob}))
                                .is_err()
                        })
                        .count()
                })
            })
            .collect();

        for writer in writers {
            assert_eq!(writer.join().unwrap(), 0);
        }

        let content = fs::read_to_string(&path).unwrap();
        let doc: Value = serde_json::from_str(&content).unwrap();
        assert!(doc.is_object());
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, "[1, 2").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get("a"), Err(StoreError::Corrupt { .. })));
        assert!(store.set("a", json!(1)).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }
}
