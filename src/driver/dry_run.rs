//! Driver control that records requests instead of writing them.

use super::{DriverAction, DriverControl};
use crate::error::Result;
use std::cell::RefCell;

/// Logs and remembers every action; the host is left untouched
#[derive(Debug, Default)]
pub struct DryRunControl {
    actions: RefCell<Vec<DriverAction>>,
}

impl DryRunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions received so far, in order
    pub fn actions(&self) -> Vec<DriverAction> {
        self.actions.borrow().clone()
    }

    fn record(&self, action: DriverAction) {
        log::info!("dry run: would {}", action);
        self.actions.borrow_mut().push(action);
    }
}

impl DriverControl for DryRunControl {
    fn bind(&self, sysname: &str) -> Result<()> {
        self.record(DriverAction::Bind(sysname.to_string()));
        Ok(())
    }

    fn unbind(&self, sysname: &str) -> Result<()> {
        self.record(DriverAction::Unbind(sysname.to_string()));
        Ok(())
    }
}
