use crate::registry::error::RegistryError;
use crate::registry::insights::compute_insights;
use crate::registry::types::{Device, DeviceMap, last_octet};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Durable store of device records keyed by IP.
///
/// Explicitly owned and lifetimed: constructed at run start via [`load`],
/// persisted at run end via [`save`]. No hidden global state.
///
/// [`load`]: DeviceRegistry::load
/// [`save`]: DeviceRegistry::save
#[derive(Debug)]
pub struct DeviceRegistry {
    path: PathBuf,
    data: DeviceMap,
}

impl DeviceRegistry {
    /// Read the persisted device map.
    ///
    /// A missing or corrupt backing file degrades to an empty, well-formed
    /// map: the registry is a cache rebuildable from logs, so neither case
    /// fails the run.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let data = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<DeviceMap>(&text) {
                Ok(map) => map,
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "device map is not valid JSON; starting from an empty map"
                    );
                    DeviceMap::empty()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "device map not found; starting from an empty map"
                );
                DeviceMap::empty()
            }
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "failed to read device map; starting from an empty map"
                );
                DeviceMap::empty()
            }
        };

        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn devices(&self) -> &BTreeMap<String, Device> {
        &self.data.devices
    }

    pub fn len(&self) -> usize {
        self.data.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.devices.is_empty()
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.data.devices.contains_key(ip)
    }

    pub fn network_range(&self) -> &str {
        &self.data.metadata.network_range
    }

    /// Look up a device by IP.
    ///
    /// Unknown addresses get a synthesized placeholder; a pure read never
    /// inserts anything into the map.
    pub fn get(&self, ip: &str) -> Device {
        self.data
            .devices
            .get(ip)
            .cloned()
            .unwrap_or_else(|| placeholder(ip))
    }

    pub fn device_mut(&mut self, ip: &str) -> Option<&mut Device> {
        self.data.devices.get_mut(ip)
    }

    /// Create or overwrite the named fields of a device.
    ///
    /// `added` is stamped only on first creation; activity fields of an
    /// existing record are left alone.
    pub fn upsert(
        &mut self,
        ip: &str,
        name: &str,
        device_type: &str,
        category: &str,
        description: &str,
    ) -> &mut Device {
        let device = self
            .data
            .devices
            .entry(ip.to_string())
            .or_insert_with(|| Device {
                name: String::new(),
                device_type: String::new(),
                category: String::new(),
                description: String::new(),
                added_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                query_count: 0,
                common_domains: Vec::new(),
            });

        device.name = name.to_string();
        device.device_type = device_type.to_string();
        device.category = category.to_string();
        device.description = description.to_string();
        device
    }

    /// Persist the map with recomputed metadata and insights.
    ///
    /// The write is atomic: content goes to a temp file in the destination
    /// directory which is then renamed over the target, so a crash mid-write
    /// cannot corrupt the existing file. The temp file is cleaned up on
    /// every error path.
    pub fn save(&mut self) -> Result<(), RegistryError> {
        self.data.metadata.last_updated = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.data.metadata.total_devices = self.data.devices.len();
        self.data.network_insights = compute_insights(&self.data);

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| RegistryError::encode(&self.path, e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| RegistryError::write_file(&self.path, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| RegistryError::write_file(&self.path, e))?;
        tmp.flush()
            .map_err(|e| RegistryError::write_file(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| RegistryError::persist(&self.path, e.error))?;

        tracing::info!(
            path = %self.path.display(),
            devices = self.data.metadata.total_devices,
            "device map saved"
        );

        Ok(())
    }
}

fn placeholder(ip: &str) -> Device {
    let octet = last_octet(ip).unwrap_or(ip);

    Device {
        name: format!("Unknown-{octet}"),
        device_type: "Unknown".to_string(),
        category: "Unknown".to_string(),
        description: "Unidentified network device".to_string(),
        added_at: String::new(),
        query_count: 0,
        common_domains: Vec::new(),
    }
}
