//! JSON file-backed settings store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use focusflow::config::ConfigStore;
use focusflow::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Environment variable naming the settings file.
pub const STORE_ENV: &str = "FOCUSFLOW_STORE";

/// Persists the key/value map as one pretty-printed JSON object.
///
/// Every call re-reads the file, so concurrent writers see each other's keys.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `--store`, then `$FOCUSFLOW_STORE`, then `<config dir>/focusflow/storage.json`.
	pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
		if let Some(path) = explicit {
			return Ok(Self::new(path));
		}
		if let Some(path) = std::env::var_os(STORE_ENV).filter(|value| !value.is_empty()) {
			return Ok(Self::new(path));
		}
		let dir = dirs::config_dir().ok_or_else(|| Error::store("no config directory for this platform; pass --store"))?;
		Ok(Self::new(dir.join("focusflow").join("storage.json")))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn read(&self) -> Result<Map<String, Value>> {
		let raw = match tokio::fs::read_to_string(&self.path).await {
			Ok(raw) => raw,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
			Err(err) => return Err(Error::store(format!("reading {}: {err}", self.path.display()))),
		};
		if raw.trim().is_empty() {
			return Ok(Map::new());
		}
		match serde_json::from_str::<Value>(&raw) {
			Ok(Value::Object(entries)) => Ok(entries),
			Ok(_) => Err(Error::store(format!("{} does not hold a JSON object", self.path.display()))),
			Err(err) => Err(Error::store(format!("parsing {}: {err}", self.path.display()))),
		}
	}

	async fn write(&self, entries: &Map<String, Value>) -> Result<()> {
		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}
		let json = serde_json::to_string_pretty(entries)?;
		tokio::fs::write(&self.path, json + "\n").await?;
		debug!(target = "focusflow.store", path = %self.path.display(), keys = entries.len(), "settings written");
		Ok(())
	}
}

#[async_trait]
impl ConfigStore for FileStore {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		let mut entries = self.read().await?;
		Ok(keys.iter().filter_map(|key| entries.remove(*key).map(|value| (key.to_string(), value))).collect())
	}

	async fn set(&self, entries: Map<String, Value>) -> Result<()> {
		let mut stored = self.read().await?;
		stored.extend(entries);
		self.write(&stored).await
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		let mut stored = self.read().await?;
		for key in keys {
			stored.remove(*key);
		}
		self.write(&stored).await
	}
}

#[cfg(test)]
mod tests {
	use focusflow::Configuration;
	use focusflow::config::{load_configuration, save_configuration};
	use focusflow_protocol::{CHANNEL_WHITELIST_KEY, FOCUS_MODE_KEY};
	use serde_json::json;
	use tempfile::TempDir;

	use super::*;

	#[tokio::test]
	async fn missing_file_reads_as_empty() {
		let tmp = TempDir::new().unwrap();
		let store = FileStore::new(tmp.path().join("absent.json"));
		assert!(store.get(&[FOCUS_MODE_KEY]).await.unwrap().is_empty());
		assert_eq!(load_configuration(&store).await.unwrap(), Configuration::default());
	}

	#[tokio::test]
	async fn writes_create_parent_directories_and_keep_other_keys() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("nested").join("storage.json");
		std::fs::create_dir_all(path.parent().unwrap()).unwrap();
		std::fs::write(&path, r#"{"focus_password":"123456"}"#).unwrap();

		let store = FileStore::new(&path);
		let config = Configuration {
			focus_mode_enabled: true,
			channel_whitelist: vec!["Numberphile".to_string()],
			..Default::default()
		};
		save_configuration(&store, &config).await.unwrap();

		let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
		assert_eq!(raw["focus_password"], json!("123456"));
		assert_eq!(raw[CHANNEL_WHITELIST_KEY], json!(["Numberphile"]));
		assert_eq!(load_configuration(&store).await.unwrap(), config);
	}

	#[tokio::test]
	async fn remove_drops_keys() {
		let tmp = TempDir::new().unwrap();
		let store = FileStore::new(tmp.path().join("s.json"));
		let mut entries = Map::new();
		entries.insert(FOCUS_MODE_KEY.to_string(), json!(true));
		store.set(entries).await.unwrap();
		store.remove(&[FOCUS_MODE_KEY]).await.unwrap();
		assert!(store.get(&[FOCUS_MODE_KEY]).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn corrupt_file_is_a_store_error() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("s.json");
		std::fs::write(&path, "[1, 2").unwrap();
		let store = FileStore::new(&path);
		assert!(matches!(store.get(&[FOCUS_MODE_KEY]).await, Err(Error::Store(_))));
	}

	#[test]
	fn explicit_path_wins() {
		let store = FileStore::resolve(Some(PathBuf::from("/tmp/explicit.json"))).unwrap();
		assert_eq!(store.path(), Path::new("/tmp/explicit.json"));
	}
}
