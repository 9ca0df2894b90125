//! Device registry backed by libudev.

use super::{DeviceNode, DeviceRegistry};
use crate::error::{ArbiterError, Result};

/// A udev device with its sysname, driver and subsystem decoded up front
#[derive(Clone)]
pub struct UdevNode {
    device: udev::Device,
    sysname: String,
    driver: Option<String>,
    subsystem: Option<String>,
}

impl UdevNode {
    fn from_device(device: udev::Device) -> Self {
        let sysname = device.sysname().to_string_lossy().into_owned();
        let driver = device.driver().map(|d| d.to_string_lossy().into_owned());
        let subsystem = device.subsystem().map(|s| s.to_string_lossy().into_owned());
        Self {
            device,
            sysname,
            driver,
            subsystem,
        }
    }
}

impl std::fmt::Debug for UdevNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdevNode")
            .field("syspath", &self.device.syspath())
            .field("driver", &self.driver)
            .finish()
    }
}

impl DeviceNode for UdevNode {
    fn sysname(&self) -> &str {
        &self.sysname
    }

    fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    fn subsystem(&self) -> Option<&str> {
        self.subsystem.as_deref()
    }
}

/// Registry session on the host's udev database
pub struct UdevRegistry {
    udev: udev::Udev,
}

impl UdevRegistry {
    /// Open a udev context
    ///
    /// # Errors
    /// * [`ArbiterError::RegistryUnavailable`] if libudev cannot create a context
    pub fn new() -> Result<Self> {
        let udev = udev::Udev::new().map_err(ArbiterError::registry_unavailable)?;
        Ok(Self { udev })
    }
}

impl DeviceRegistry for UdevRegistry {
    type Node = UdevNode;

    fn enumerate(&self, subsystem: &str) -> Result<Vec<UdevNode>> {
        let scan = || -> std::io::Result<Vec<UdevNode>> {
            let mut enumerator = udev::Enumerator::with_udev(self.udev.clone())?;
            enumerator.match_subsystem(subsystem)?;
            Ok(enumerator
                .scan_devices()?
                .map(UdevNode::from_device)
                .collect())
        };

        scan().map_err(|e| ArbiterError::enumeration(subsystem, e))
    }

    fn parent_of(&self, device: &UdevNode) -> Option<UdevNode> {
        device.device.parent().map(UdevNode::from_device)
    }
}
