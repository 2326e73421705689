use serde::{Deserialize, Serialize};

/// Top-level hostq configuration, loaded from hostq.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostqConfig {
    #[serde(default)]
    pub device: DeviceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// DRM device node to submit through
    #[serde(default = "default_device_path")]
    pub path: String,
}

impl Default for HostqConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
        }
    }
}

impl HostqConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: HostqConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Returns the default config file path.
/// Search order:
/// 1. System-wide config: `/etc/hostq/hostq.toml`
/// 2. Local fallback: `./hostq.toml`
pub fn default_config_path() -> String {
    let system_path = "/etc/hostq/hostq.toml";
    if std::path::Path::new(system_path).exists() {
        return system_path.to_string();
    }
    "hostq.toml".to_string()
}

fn default_device_path() -> String {
    hostq_common::platform::default_device_path()
}
