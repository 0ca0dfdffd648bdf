use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::app::Result;
use crate::domain::SeenSet;
use crate::store::SeenStore;

/// Seen-entry store backed by a flat JSON file.
pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SeenStore for JsonSeenStore {
    fn load(&self) -> SeenSet {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Seen entries file {} not found, starting with an empty set",
                    self.path.display()
                );
                return SeenSet::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read seen entries file {}: {}. Starting with an empty set",
                    self.path.display(),
                    e
                );
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => {
                let seen: SeenSet = map.into_iter().map(|(id, _)| id).collect();
                tracing::info!("Loaded {} seen entries", seen.len());
                seen
            }
            Ok(_) => {
                tracing::warn!("Invalid format of seen entries, starting with an empty set");
                SeenSet::new()
            }
            Err(e) => {
                tracing::warn!("Seen entries JSON is empty or malformed ({}), starting with an empty set", e);
                SeenSet::new()
            }
        }
    }

    /// Write to a sibling temp file, then rename over the target.
    fn save(&self, seen: &SeenSet) -> Result<()> {
        let content = serde_json::to_vec(seen)?;
        let temp_path = self.temp_path();

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(&content)?;
            file.sync_all()
        });

        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::info!("Saved seen entries: {}", seen.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonSeenStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonSeenStore::new(dir.path().join("seen.json"));
        let seen: SeenSet = ["a1", "https://example.com/2", "b3"].into_iter().collect();

        store.save(&seen).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, seen);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = JsonSeenStore::new(dir.path().join("seen.json"));
        store.save(&["x"].into_iter().collect()).unwrap();

        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("seen.json");
        // a non-empty directory cannot be renamed over
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let store = JsonSeenStore::new(&target);

        assert!(store.save(&["x"].into_iter().collect()).is_err());
        assert!(!store.temp_path().exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = tempdir().unwrap();
        let store = JsonSeenStore::new(dir.path().join("seen.json"));
        store.save(&["old"].into_iter().collect()).unwrap();
        store.save(&["old", "new"].into_iter().collect()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, r#"{"new":true,"old":true}"#);
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, "{\"a1\": tru").unwrap();

        assert!(JsonSeenStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, "").unwrap();

        assert!(JsonSeenStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_non_object_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, r#"["a1", "a2"]"#).unwrap();

        assert!(JsonSeenStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_any_value_counts_as_seen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen.json");
        fs::write(&path, r#"{"a1": true, "a2": 1}"#).unwrap();

        let seen = JsonSeenStore::new(&path).load();
        assert!(seen.contains("a1"));
        assert!(seen.contains("a2"));
    }
}
