use super::StateStore;
use crate::menu::{MenuError, Payload, Result};
use chrono::Local;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of the state file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    saved_at: Option<String>,
    #[serde(default)]
    values: Payload,
}

/// Key/value state kept in a YAML file
#[derive(Debug, Clone)]
pub struct YamlState {
    path: PathBuf,
    values: Payload,
}

impl YamlState {
    /// Empty state that will be written to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: Payload::new(),
        }
    }

    /// Load state from `path`.
    /// If the file doesn't exist, returns an empty state bound to that path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(path)?;
        let file: StateFile = serde_yaml::from_str(&content)?;
        Ok(Self {
            path: path.to_path_buf(),
            values: file.values,
        })
    }

    /// Default state location: `<data dir>/squiffy/state.yaml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| MenuError::Storage("Could not determine data directory".to_string()))?
            .join("squiffy");
        Ok(dir.join("state.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Payload {
        &self.values
    }
}

impl StateStore for YamlState {
    fn update(&mut self, payload: &Payload) {
        for (key, value) in payload {
            self.values.insert(key.clone(), value.clone());
        }
    }

    fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = StateFile {
            saved_at: Some(Local::now().to_rfc3339()),
            values: self.values.clone(),
        };
        fs::write(&self.path, serde_yaml::to_string(&file)?)?;
        info!("State saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn payload(key: &str, value: i64) -> Payload {
        let mut payload = Payload::new();
        payload.insert(Value::from(key), Value::from(value));
        payload
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let state = YamlState::load(temp_dir.path().join("state.yaml")).unwrap();
        assert!(state.values().is_empty());
    }

    #[test]
    fn test_update_merges_and_overwrites() {
        let mut state = YamlState::new("unused.yaml");
        state.update(&payload("volume", 3));
        state.update(&payload("brightness", 5));
        state.update(&payload("volume", 7));

        assert_eq!(state.get("volume"), Some(&Value::from(7)));
        assert_eq!(state.get("brightness"), Some(&Value::from(5)));
    }

    #[test]
    fn test_save_and_load_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("state.yaml");

        let mut state = YamlState::new(&path);
        state.update(&payload("volume", 3));
        state.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("saved_at"));

        let loaded = YamlState::load(&path).unwrap();
        assert_eq!(loaded.get("volume"), Some(&Value::from(3)));
    }

    #[test]
    fn test_load_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.yaml");
        fs::write(&path, "values: [unclosed").unwrap();

        let err = YamlState::load(&path).unwrap_err();
        assert_eq!(err.kind(), crate::menu::ErrorKind::Storage);
    }
}
