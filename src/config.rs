//! Run configuration: driver names, subsystem names and sysfs control paths.
//!
//! The defaults describe a stock Linux host with the `xpad` and `hid-generic`
//! drivers. With the `config` feature enabled the same values can be read from a
//! TOML file, every key being optional.

use std::path::{Path, PathBuf};

#[cfg(feature = "config")]
use crate::error::{ArbiterError, Result};

/// Name of the dedicated gamepad driver
pub const DEFAULT_SPECIALIZED_DRIVER: &str = "xpad";

/// Name of the catch-all HID driver
pub const DEFAULT_GENERIC_DRIVER: &str = "hid-generic";

/// Sysname prefix shared by joystick device nodes (`js0`, `js1`, ...)
pub const DEFAULT_JOYSTICK_PREFIX: &str = "js";

/// Mount point of sysfs
pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

/// Settings for a single arbitration run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ArbiterConfig {
    pub specialized_driver: String,
    pub generic_driver: String,
    pub joystick_prefix: String,
    pub input_subsystem: String,
    pub hid_subsystem: String,
    pub sysfs_root: PathBuf,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            specialized_driver: DEFAULT_SPECIALIZED_DRIVER.to_string(),
            generic_driver: DEFAULT_GENERIC_DRIVER.to_string(),
            joystick_prefix: DEFAULT_JOYSTICK_PREFIX.to_string(),
            input_subsystem: "input".to_string(),
            hid_subsystem: "hid".to_string(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

impl ArbiterConfig {
    /// Control file paths of the generic driver under this config's sysfs root
    pub fn driver_paths(&self) -> DriverPaths {
        DriverPaths::for_hid_driver(&self.sysfs_root, &self.generic_driver)
    }

    /// Location of the per-user configuration file
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("joystick-arbiter").join("config.toml"))
    }

    /// Parse a configuration from TOML text
    #[cfg(feature = "config")]
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ArbiterError::config(e.to_string()))
    }

    /// Load a configuration file; the file must exist
    #[cfg(feature = "config")]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ArbiterError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Load the file at [`ArbiterConfig::default_path`], falling back to defaults
    /// when it does not exist
    #[cfg(feature = "config")]
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Bind and unbind control files of one HID driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPaths {
    pub bind: PathBuf,
    pub unbind: PathBuf,
}

impl DriverPaths {
    /// `<sysfs_root>/bus/hid/drivers/<driver>/{bind,unbind}`
    pub fn for_hid_driver(sysfs_root: &Path, driver: &str) -> Self {
        let dir = sysfs_root.join("bus").join("hid").join("drivers").join(driver);
        Self {
            bind: dir.join("bind"),
            unbind: dir.join("unbind"),
        }
    }
}
