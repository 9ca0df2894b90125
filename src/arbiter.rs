//! Arbitration engine
//!
//! One run classifies the host and then performs exactly one corrective pass:
//!
//! - specialized driver active: unbind the nearest generic-driver ancestor of
//!   every joystick
//! - specialized driver absent: bind every unbound HID device to the generic
//!   driver
//!
//! Both passes only act on what they find unbound/bound at that moment, so
//! running again in the same physical state issues nothing.

use crate::config::ArbiterConfig;
use crate::device::{ancestors, DeviceNode, DeviceRegistry};
use crate::driver::{DriverAction, DriverControl};
use crate::error::Result;
use crate::topology::{joystick_nodes, Classifier};
use std::fmt;

/// Derived state of the host, recomputed on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    SpecializedActive,
    SpecializedAbsent,
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpecializedActive => f.write_str("specialized driver active"),
            Self::SpecializedAbsent => f.write_str("specialized driver absent"),
        }
    }
}

/// What a run observed and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrationReport {
    pub state: SystemState,
    pub actions: Vec<DriverAction>,
}

/// Coordinates classification and the corrective passes
pub struct Arbiter<'a, R: DeviceRegistry, C: DriverControl> {
    registry: &'a R,
    control: &'a C,
    config: &'a ArbiterConfig,
}

impl<'a, R: DeviceRegistry, C: DriverControl> Arbiter<'a, R, C> {
    pub fn new(registry: &'a R, control: &'a C, config: &'a ArbiterConfig) -> Self {
        Self {
            registry,
            control,
            config,
        }
    }

    pub fn classify(&self) -> SystemState {
        let classifier = Classifier::new(self.registry, self.config);
        match classifier.find_specialized_joystick() {
            Some((joystick, owner)) => {
                log::info!(
                    "{} is owned by {} via {}",
                    joystick.sysname(),
                    self.config.specialized_driver,
                    owner.sysname()
                );
                SystemState::SpecializedActive
            }
            None => SystemState::SpecializedAbsent,
        }
    }

    /// Classify the host and run the matching pass
    ///
    /// # Errors
    /// * [`ArbiterError::DriverControl`](crate::ArbiterError::DriverControl) on the first
    ///   failed write; no later writes are attempted.
    pub fn run(&self) -> Result<ArbitrationReport> {
        let state = self.classify();
        let actions = self.correct(state)?;
        Ok(ArbitrationReport { state, actions })
    }

    /// Run the pass that belongs to an already classified `state`
    pub fn correct(&self, state: SystemState) -> Result<Vec<DriverAction>> {
        log::info!("system state: {}", state);
        match state {
            SystemState::SpecializedActive => self.disable_pass(),
            SystemState::SpecializedAbsent => self.enable_pass(),
        }
    }

    /// Unbind the nearest generic-driver ancestor of each joystick
    ///
    /// Joysticks without such an ancestor are left alone.
    pub fn disable_pass(&self) -> Result<Vec<DriverAction>> {
        let generic = self.config.generic_driver.as_str();
        let mut issued = Vec::new();

        for joystick in joystick_nodes(self.registry, self.config) {
            let Some(target) =
                ancestors(self.registry, &joystick).find(|a| a.is_bound_to(generic))
            else {
                log::debug!("{}: no {} ancestor", joystick.sysname(), generic);
                continue;
            };

            let action = DriverAction::Unbind(target.sysname().to_string());
            log::info!(
                "{}: {} ({} device)",
                joystick.sysname(),
                action,
                target.subsystem().unwrap_or("unknown")
            );
            self.control.apply(&action)?;
            issued.push(action);
        }

        Ok(issued)
    }

    /// Bind every HID device that has no driver at all
    ///
    /// Devices already bound to any driver are never displaced. A failed HID
    /// scan skips the pass.
    pub fn enable_pass(&self) -> Result<Vec<DriverAction>> {
        let devices = match self.registry.enumerate(&self.config.hid_subsystem) {
            Ok(devices) => devices,
            Err(e) => {
                log::warn!("{}; skipping enable pass", e);
                return Ok(Vec::new());
            }
        };

        let mut issued = Vec::new();
        for device in devices.iter().filter(|d| d.driver().is_none()) {
            let action = DriverAction::Bind(device.sysname().to_string());
            log::info!("{}", action);
            self.control.apply(&action)?;
            issued.push(action);
        }

        Ok(issued)
    }
}
