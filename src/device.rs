//! Device registry abstraction and device-tree traversal.
//!
//! The registry owns every device; this crate only holds short-lived snapshots
//! obtained through [`DeviceRegistry::enumerate`] and [`DeviceRegistry::parent_of`].

pub mod ancestry;
pub mod memory;
pub mod udev_registry;

use crate::error::Result;

pub use ancestry::{ancestors, Ancestors};
pub use memory::{MemoryDeviceId, MemoryRegistry};
pub use udev_registry::{UdevNode, UdevRegistry};

/// Read-only view of one node in the device tree
pub trait DeviceNode {
    /// Short kernel name, e.g. `js0` or `0003:045E:028E.0001`
    fn sysname(&self) -> &str;

    /// Name of the bound driver, `None` when unbound
    fn driver(&self) -> Option<&str>;

    /// Device class such as `input` or `hid`
    fn subsystem(&self) -> Option<&str>;

    /// Whether the bound driver is exactly `name`
    fn is_bound_to(&self, name: &str) -> bool {
        self.driver() == Some(name)
    }
}

/// Source of device snapshots
pub trait DeviceRegistry {
    type Node: DeviceNode + Clone;

    /// List every device of `subsystem`
    ///
    /// # Errors
    /// * [`ArbiterError::Enumeration`](crate::ArbiterError::Enumeration) if the scan fails.
    ///   Callers treat this as an empty result.
    fn enumerate(&self, subsystem: &str) -> Result<Vec<Self::Node>>;

    /// Direct parent of `device`, `None` at the root of the tree
    fn parent_of(&self, device: &Self::Node) -> Option<Self::Node>;
}
