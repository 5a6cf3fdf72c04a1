//! Data loading for the report commands
//!
//! File-based stand-in for the dashboard backend: reads the same three JSON
//! documents the REST endpoints serve (device list, wholesale usage dataset,
//! user settings) from a local data directory.

use crate::types::{AggregatedEntry, Device, HomewattError, Result, UserSettings};
use std::fs;
use std::path::{Path, PathBuf};

const DEVICES_FILE: &str = "devices.json";
const USAGE_FILE: &str = "usage.json";
const SETTINGS_FILE: &str = "settings.json";

/// In-memory snapshot of everything the aggregation core consumes
#[derive(Debug)]
pub struct DataStore {
    pub devices: Vec<Device>,
    pub usage: Vec<AggregatedEntry>,
    pub settings: UserSettings,
}

/// Loads the device/usage/settings snapshot from a data directory
pub struct DataLoaderService {
    data_dir: PathBuf,
}

impl DataLoaderService {
    /// Loader rooted at the platform data dir (e.g. `~/.local/share/homewatt`)
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "homewatt")
            .ok_or_else(|| HomewattError::Config("cannot resolve home directory".into()))?;
        Ok(Self {
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the full snapshot.
    ///
    /// The device list is required. A missing or unreadable usage dataset or
    /// settings file degrades to empty/default with a stderr warning — the
    /// aggregation core already treats absent data as zero usage.
    pub fn load(&self) -> Result<DataStore> {
        let devices: Vec<Device> = self.read_json(DEVICES_FILE)?;

        let usage = match self.read_json::<Vec<AggregatedEntry>>(USAGE_FILE) {
            Ok(usage) => usage,
            Err(e) => {
                eprintln!("[homewatt] Warning: {USAGE_FILE}: {e}");
                Vec::new()
            }
        };

        let settings = match self.read_json::<UserSettings>(SETTINGS_FILE) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("[homewatt] Warning: {SETTINGS_FILE}: {e}");
                UserSettings::default()
            }
        };

        Ok(DataStore {
            devices,
            usage,
            settings,
        })
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.data_dir.join(name);
        let mut bytes = fs::read(&path)?;
        simd_json::serde::from_slice(&mut bytes)
            .map_err(|e| HomewattError::Parse(format!("{}: {e}", path.display())))
    }
}
