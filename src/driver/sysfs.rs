//! Driver control through sysfs `bind`/`unbind` files.
//!
//! The kernel reacts to a device name written into
//! `/sys/bus/hid/drivers/<driver>/bind` or `.../unbind`. The files are opened
//! write-only and never created: a missing control file means the driver is not
//! loaded, which is reported as [`ArbiterError::DriverControl`].

use super::DriverControl;
use crate::config::DriverPaths;
use crate::error::{ArbiterError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Writes sysnames into a driver's sysfs control files
#[derive(Debug, Clone)]
pub struct SysfsDriverControl {
    paths: DriverPaths,
}

impl SysfsDriverControl {
    pub fn new(paths: DriverPaths) -> Self {
        Self { paths }
    }

    fn write(action: &'static str, path: &Path, sysname: &str) -> Result<()> {
        log::debug!("writing '{}' to {}", sysname, path.display());

        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| ArbiterError::driver_control(action, sysname, path, e))?;

        file.write_all(sysname.as_bytes())
            .map_err(|e| ArbiterError::driver_control(action, sysname, path, e))
    }
}

impl DriverControl for SysfsDriverControl {
    fn bind(&self, sysname: &str) -> Result<()> {
        Self::write("bind", &self.paths.bind, sysname)
    }

    fn unbind(&self, sysname: &str) -> Result<()> {
        Self::write("unbind", &self.paths.unbind, sysname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Lay out `<root>/bus/hid/drivers/hid-generic/{bind,unbind}` as empty files
    fn fake_sysfs() -> (TempDir, DriverPaths) {
        let root = TempDir::new().expect("Failed to create temp directory");
        let paths = DriverPaths::for_hid_driver(root.path(), "hid-generic");
        fs::create_dir_all(paths.bind.parent().unwrap()).unwrap();
        fs::write(&paths.bind, b"").unwrap();
        fs::write(&paths.unbind, b"").unwrap();
        (root, paths)
    }

    #[test]
    fn test_bind_writes_sysname() {
        let (_root, paths) = fake_sysfs();
        let control = SysfsDriverControl::new(paths.clone());

        control.bind("0003:045E:028E.0004").unwrap();

        assert_eq!(fs::read_to_string(&paths.bind).unwrap(), "0003:045E:028E.0004");
        assert_eq!(fs::read_to_string(&paths.unbind).unwrap(), "");
    }

    #[test]
    fn test_unbind_writes_sysname() {
        let (_root, paths) = fake_sysfs();
        let control = SysfsDriverControl::new(paths.clone());

        control.unbind("0003:046D:C21D.0001").unwrap();

        assert_eq!(fs::read_to_string(&paths.unbind).unwrap(), "0003:046D:C21D.0001");
    }

    #[test]
    fn test_missing_control_file_is_an_error() {
        let root = TempDir::new().expect("Failed to create temp directory");
        let paths = DriverPaths::for_hid_driver(root.path(), "hid-generic");
        let control = SysfsDriverControl::new(paths.clone());

        match control.unbind("hid0") {
            Err(ArbiterError::DriverControl {
                action,
                sysname,
                path,
                ..
            }) => {
                assert_eq!(action, "unbind");
                assert_eq!(sysname, "hid0");
                assert_eq!(path, paths.unbind);
            }
            other => panic!("Expected DriverControl error, got {other:?}"),
        }
        assert!(!paths.unbind.exists(), "control file must not be created");
    }
}
