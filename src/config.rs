//! Relay configuration.
//!
//! Loaded from TOML. Every key is optional and falls back to the real X-56
//! Rhino identifiers:
//!
//! ```toml
//! debug = true
//!
//! [throttle]
//! vendor_id = 0x0738
//! product_id = 0xa221
//! emulated_name = "Mad Catz Saitek Pro Flight X-56 Rhino Throttle (emulated)"
//! read_timeout_ms = 100
//!
//! [stick]
//! product_id = 0x2221
//! ```

use crate::device::{DeviceClass, VENDOR_ID};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Register the [`DebugLogger`](crate::DebugLogger) on both pipelines.
    pub debug: bool,
    pub throttle: DeviceConfig,
    pub stick: DeviceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            throttle: DeviceConfig::defaults_for(DeviceClass::Throttle),
            stick: DeviceConfig::defaults_for(DeviceClass::Stick),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text)?;
        config.throttle.fill_defaults(DeviceClass::Throttle);
        config.stick.fill_defaults(DeviceClass::Stick);
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn device(&self, device: DeviceClass) -> &DeviceConfig {
        match device {
            DeviceClass::Throttle => &self.throttle,
            DeviceClass::Stick => &self.stick,
        }
    }
}

/// How to find one physical device and what to call its virtual twin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    pub vendor_id: u16,
    /// `0` in a partial file means "use the device's own product id".
    pub product_id: u16,
    /// Empty in a partial file means "use the default name".
    pub emulated_name: String,
    pub read_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_id: VENDOR_ID,
            product_id: 0,
            emulated_name: String::new(),
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl DeviceConfig {
    pub fn defaults_for(device: DeviceClass) -> Self {
        let mut config = Self::default();
        config.fill_defaults(device);
        config
    }

    fn fill_defaults(&mut self, device: DeviceClass) {
        if self.product_id == 0 {
            self.product_id = device.product_id();
        }
        if self.emulated_name.is_empty() {
            self.emulated_name = device.emulated_name().to_string();
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
