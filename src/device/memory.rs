//! In-process device tree.
//!
//! `MemoryRegistry` stores devices in an arena with parent links by index and
//! doubles as a driver-control backend that mimics the kernel: binding fills an
//! unbound device with the generic driver, unbinding clears a generic binding,
//! and writes naming an ineligible device are silently ignored. This makes it
//! possible to run the arbiter repeatedly against the same simulated host.

use super::{DeviceNode, DeviceRegistry};
use crate::config::DEFAULT_GENERIC_DRIVER;
use crate::driver::{DriverAction, DriverControl};
use crate::error::{ArbiterError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Handle of a device inside a [`MemoryRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryDeviceId(usize);

#[derive(Debug)]
struct MemoryDevice {
    sysname: String,
    subsystem: String,
    driver: Option<String>,
    parent: Option<MemoryDeviceId>,
}

/// Snapshot of a [`MemoryRegistry`] device taken at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
    id: MemoryDeviceId,
    sysname: String,
    subsystem: String,
    driver: Option<String>,
}

impl DeviceNode for MemoryNode {
    fn sysname(&self) -> &str {
        &self.sysname
    }

    fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    fn subsystem(&self) -> Option<&str> {
        Some(&self.subsystem)
    }
}

/// Simulated device registry and driver-control target
#[derive(Debug)]
pub struct MemoryRegistry {
    devices: RefCell<Vec<MemoryDevice>>,
    generic_driver: String,
    failing_subsystems: HashSet<String>,
    issued: RefCell<Vec<DriverAction>>,
    parent_lookups: Cell<usize>,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::with_generic_driver(DEFAULT_GENERIC_DRIVER)
    }

    /// Registry whose bind writes attach `driver`
    pub fn with_generic_driver(driver: impl Into<String>) -> Self {
        Self {
            devices: RefCell::new(Vec::new()),
            generic_driver: driver.into(),
            failing_subsystems: HashSet::new(),
            issued: RefCell::new(Vec::new()),
            parent_lookups: Cell::new(0),
        }
    }

    /// Add a device and return its handle
    pub fn add(
        &mut self,
        sysname: &str,
        subsystem: &str,
        driver: Option<&str>,
        parent: Option<MemoryDeviceId>,
    ) -> MemoryDeviceId {
        let devices = self.devices.get_mut();
        let id = MemoryDeviceId(devices.len());
        devices.push(MemoryDevice {
            sysname: sysname.to_string(),
            subsystem: subsystem.to_string(),
            driver: driver.map(str::to_string),
            parent,
        });
        id
    }

    /// Make every scan of `subsystem` fail
    pub fn fail_enumeration(&mut self, subsystem: &str) {
        self.failing_subsystems.insert(subsystem.to_string());
    }

    /// Current snapshot of a device
    ///
    /// # Panics
    /// If `id` was not returned by [`MemoryRegistry::add`] on this registry.
    pub fn node(&self, id: MemoryDeviceId) -> MemoryNode {
        let devices = self.devices.borrow();
        Self::snapshot(id, &devices[id.0])
    }

    /// Currently bound driver of a device
    pub fn driver_of(&self, id: MemoryDeviceId) -> Option<String> {
        self.devices.borrow()[id.0].driver.clone()
    }

    /// Every bind/unbind write received so far, in order
    pub fn issued(&self) -> Vec<DriverAction> {
        self.issued.borrow().clone()
    }

    /// Forget recorded writes, keeping the device state
    pub fn clear_issued(&self) {
        self.issued.borrow_mut().clear();
    }

    /// Number of parent lookups served so far
    pub fn parent_lookups(&self) -> usize {
        self.parent_lookups.get()
    }

    fn snapshot(id: MemoryDeviceId, device: &MemoryDevice) -> MemoryNode {
        MemoryNode {
            id,
            sysname: device.sysname.clone(),
            subsystem: device.subsystem.clone(),
            driver: device.driver.clone(),
        }
    }

    fn write(&self, action: DriverAction) {
        {
            let mut devices = self.devices.borrow_mut();
            if let Some(device) = devices
                .iter_mut()
                .find(|device| device.sysname == action.sysname())
            {
                match &action {
                    DriverAction::Bind(_) if device.driver.is_none() => {
                        device.driver = Some(self.generic_driver.clone());
                    }
                    DriverAction::Unbind(_)
                        if device.driver.as_deref() == Some(self.generic_driver.as_str()) =>
                    {
                        device.driver = None;
                    }
                    _ => {}
                }
            }
        }
        self.issued.borrow_mut().push(action);
    }
}

impl DeviceRegistry for MemoryRegistry {
    type Node = MemoryNode;

    fn enumerate(&self, subsystem: &str) -> Result<Vec<MemoryNode>> {
        if self.failing_subsystems.contains(subsystem) {
            return Err(ArbiterError::enumeration(
                subsystem,
                std::io::Error::new(std::io::ErrorKind::Other, "simulated scan failure"),
            ));
        }

        let devices = self.devices.borrow();
        Ok(devices
            .iter()
            .enumerate()
            .filter(|(_, device)| device.subsystem == subsystem)
            .map(|(index, device)| Self::snapshot(MemoryDeviceId(index), device))
            .collect())
    }

    fn parent_of(&self, device: &MemoryNode) -> Option<MemoryNode> {
        self.parent_lookups.set(self.parent_lookups.get() + 1);
        let devices = self.devices.borrow();
        let parent = devices.get(device.id.0)?.parent?;
        Some(Self::snapshot(parent, &devices[parent.0]))
    }
}

impl DriverControl for MemoryRegistry {
    fn bind(&self, sysname: &str) -> Result<()> {
        self.write(DriverAction::Bind(sysname.to_string()));
        Ok(())
    }

    fn unbind(&self, sysname: &str) -> Result<()> {
        self.write(DriverAction::Unbind(sysname.to_string()));
        Ok(())
    }
}
