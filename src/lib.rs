//! # joystick-arbiter - xpad / hid-generic joystick arbitration
//!
//! Gamepads handled by the `xpad` driver expose their own joystick node. Any
//! joystick node the `hid-generic` driver creates next to it is redundant and
//! produces duplicate input. Each run of this crate looks at the current device
//! tree and converges the host to one of two configurations:
//!
//! - **xpad active**: unbind `hid-generic` from the devices behind every joystick
//! - **xpad absent**: bind `hid-generic` to every HID device left without a driver
//!
//! Runs keep no state between invocations and are idempotent.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Driver names, subsystems and sysfs control paths
//! - [`device`] - Device registry abstraction (udev and in-memory) and ancestry walk
//! - [`driver`] - Bind/unbind control (sysfs and dry-run)
//! - [`topology`] - Joystick discovery and system-state classification
//! - [`arbiter`] - Classification plus the disable/enable passes

pub mod error;
pub mod config;

pub mod device;
pub mod driver;

pub mod arbiter;
pub mod topology;

// Re-export commonly used types for convenience
pub use error::{ArbiterError, Result};

pub use arbiter::{Arbiter, ArbitrationReport, SystemState};
pub use config::{ArbiterConfig, DriverPaths};
pub use device::{DeviceNode, DeviceRegistry, MemoryRegistry, UdevRegistry};
pub use driver::{DriverAction, DriverControl, DryRunControl, SysfsDriverControl};
pub use topology::Classifier;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
