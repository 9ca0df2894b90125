//! Driver bind/unbind control.
//!
//! A [`DriverControl`] accepts the two kernel operations that attach or detach
//! the generic HID driver. Writes for a device that is not eligible (already
//! bound, already unbound) are expected to be ignored by the backend; only
//! I/O-level failures are reported.

pub mod dry_run;
pub mod sysfs;

use crate::error::Result;
use std::fmt;

pub use dry_run::DryRunControl;
pub use sysfs::SysfsDriverControl;

/// One bind or unbind request, targeted by sysname
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DriverAction {
    Bind(String),
    Unbind(String),
}

impl DriverAction {
    pub fn sysname(&self) -> &str {
        match self {
            Self::Bind(sysname) | Self::Unbind(sysname) => sysname,
        }
    }

    /// `"bind"` or `"unbind"`
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Bind(_) => "bind",
            Self::Unbind(_) => "unbind",
        }
    }
}

impl fmt::Display for DriverAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.sysname())
    }
}

/// Write-only access to a driver's bind/unbind controls
pub trait DriverControl {
    /// Attach the driver to `sysname`
    fn bind(&self, sysname: &str) -> Result<()>;

    /// Detach the driver from `sysname`
    fn unbind(&self, sysname: &str) -> Result<()>;

    /// Dispatch an action to [`bind`](Self::bind) or [`unbind`](Self::unbind)
    fn apply(&self, action: &DriverAction) -> Result<()> {
        match action {
            DriverAction::Bind(sysname) => self.bind(sysname),
            DriverAction::Unbind(sysname) => self.unbind(sysname),
        }
    }
}
