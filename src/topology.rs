//! Joystick discovery and system-state classification.
//!
//! A joystick node (`js*` in the input subsystem) belongs to whichever driver
//! is bound somewhere above it in the device tree. The specialized driver is
//! considered active as soon as one joystick has it among its ancestors.
//!
//! Enumeration failures are deliberately swallowed here: an unreadable input
//! subsystem counts as "no joysticks", which steers the run towards re-enabling
//! generic devices.

use crate::config::ArbiterConfig;
use crate::device::{ancestors, DeviceNode, DeviceRegistry};

/// Two-character prefix test on a sysname
///
/// Only the leading characters are compared: `js0` and `jsx` match,
/// `joystick1` does not (its second character is `o`).
pub fn is_joystick(sysname: &str, prefix: &str) -> bool {
    sysname.starts_with(prefix)
}

/// Joystick nodes of the input subsystem, empty if the scan fails
pub fn joystick_nodes<R: DeviceRegistry>(registry: &R, config: &ArbiterConfig) -> Vec<R::Node> {
    match registry.enumerate(&config.input_subsystem) {
        Ok(nodes) => nodes
            .into_iter()
            .filter(|node| is_joystick(node.sysname(), &config.joystick_prefix))
            .collect(),
        Err(e) => {
            log::warn!("{}; treating it as having no joysticks", e);
            Vec::new()
        }
    }
}

/// Decides whether the specialized driver currently owns a joystick
pub struct Classifier<'a, R: DeviceRegistry> {
    registry: &'a R,
    config: &'a ArbiterConfig,
}

impl<'a, R: DeviceRegistry> Classifier<'a, R> {
    pub fn new(registry: &'a R, config: &'a ArbiterConfig) -> Self {
        Self { registry, config }
    }

    /// `true` as soon as any joystick has an ancestor bound to the specialized
    /// driver; the search stops at the first such pair
    pub fn is_specialized_driver_active(&self) -> bool {
        self.find_specialized_joystick().is_some()
    }

    /// First joystick owned by the specialized driver, with that ancestor
    pub fn find_specialized_joystick(&self) -> Option<(R::Node, R::Node)> {
        let driver = self.config.specialized_driver.as_str();

        joystick_nodes(self.registry, self.config)
            .into_iter()
            .find_map(|joystick| {
                let owner = ancestors(self.registry, &joystick).find(|a| a.is_bound_to(driver))?;
                Some((joystick, owner))
            })
    }
}
