/*
 * This file is part of Claptrap.
 *
 * Copyright (C) 2025 Claptrap contributors
 *
 * Claptrap is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Claptrap is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Claptrap. If not, see <https://www.gnu.org/licenses/>.
 */

//! Attribute storage.
//!
//! The device layer never touches files itself; it talks to an
//! [`AttributeStore`], which maps a device scope plus an attribute name to
//! a piece of text. [`SysfsStore`] is the implementation backed by the
//! ev3dev sysfs tree.
//!
//! # Sharing
//!
//! The store is the single source of truth. Nothing read through it is
//! cached, so a mode written by one owner is visible to every other owner
//! of the same port. No locking is done here: if several owners drive the
//! same port, their reads and writes interleave with no ordering guarantee.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::Ev3Config;
use crate::error::{Ev3Error, Result};
use crate::port::Port;

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class";

/// Kernel device class a port's device is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Sensor,
    TachoMotor,
}

impl DeviceClass {
    pub fn dir_name(self) -> &'static str {
        match self {
            DeviceClass::Sensor => "lego-sensor",
            DeviceClass::TachoMotor => "tacho-motor",
        }
    }

    fn device_prefix(self) -> &'static str {
        match self {
            DeviceClass::Sensor => "sensor",
            DeviceClass::TachoMotor => "motor",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Opaque handle to the attribute directory of one bound device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope(PathBuf);

impl Scope {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Scope(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn attribute_path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Textual key-value store of device attributes.
#[cfg_attr(test, mockall::automock)]
pub trait AttributeStore {
    /// Find the device of `class` attached to `port`, if any.
    fn locate(&self, class: DeviceClass, port: Port) -> Result<Option<Scope>>;

    /// Read an attribute. Surrounding whitespace is stripped.
    fn read(&self, scope: &Scope, name: &str) -> Result<String>;

    /// Replace an attribute's contents.
    fn write(&self, scope: &Scope, name: &str, value: &str) -> Result<()>;
}

impl<T: AttributeStore + ?Sized> AttributeStore for &T {
    fn locate(&self, class: DeviceClass, port: Port) -> Result<Option<Scope>> {
        (**self).locate(class, port)
    }

    fn read(&self, scope: &Scope, name: &str) -> Result<String> {
        (**self).read(scope, name)
    }

    fn write(&self, scope: &Scope, name: &str, value: &str) -> Result<()> {
        (**self).write(scope, name, value)
    }
}

/// A device found while scanning a class directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedDevice {
    pub address: String,
    pub driver_name: String,
    pub scope: Scope,
}

/// [`AttributeStore`] over `<root>/<class>/<device>/<attribute>` files.
#[derive(Debug, Clone)]
pub struct SysfsStore {
    root: PathBuf,
}

impl Default for SysfsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl SysfsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(cfg: &Ev3Config) -> Self {
        Self::new(&cfg.sysfs_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Device directories of a class, sorted by name. A missing class
    /// directory means no driver is loaded, which is not an error.
    fn device_dirs(&self, class: DeviceClass) -> Result<Vec<PathBuf>> {
        let class_dir = self.root.join(class.dir_name());
        let entries = match fs::read_dir(&class_dir) {
            Ok(it) => it,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(Ev3Error::AttributeRead {
                    path: class_dir,
                    source,
                })
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .filter(|ent| {
                ent.file_name()
                    .to_string_lossy()
                    .starts_with(class.device_prefix())
            })
            .map(|ent| ent.path())
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    /// Every device currently registered under `class`. Entries whose
    /// `address` or `driver_name` cannot be read are left out.
    pub fn connected(&self, class: DeviceClass) -> Result<Vec<ConnectedDevice>> {
        let mut out = Vec::new();
        for dir in self.device_dirs(class)? {
            let scope = Scope::new(dir);
            // devices can disappear between the scan and the read
            let Ok(address) = self.read(&scope, "address") else { continue };
            let Ok(driver_name) = self.read(&scope, "driver_name") else { continue };
            out.push(ConnectedDevice {
                address,
                driver_name,
                scope,
            });
        }
        Ok(out)
    }
}

impl AttributeStore for SysfsStore {
    fn locate(&self, class: DeviceClass, port: Port) -> Result<Option<Scope>> {
        for dir in self.device_dirs(class)? {
            let Ok(address) = read_trimmed(dir.join("address")) else { continue };
            if port.matches_address(&address) {
                return Ok(Some(Scope::new(dir)));
            }
        }
        Ok(None)
    }

    fn read(&self, scope: &Scope, name: &str) -> Result<String> {
        let path = scope.attribute_path(name);
        read_trimmed(&path).map_err(|source| Ev3Error::AttributeRead { path, source })
    }

    fn write(&self, scope: &Scope, name: &str, value: &str) -> Result<()> {
        let path = scope.attribute_path(name);
        fs::write(&path, value).map_err(|source| Ev3Error::AttributeWrite { path, source })
    }
}

fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    let mut s = String::new();
    fs::File::open(p)?.read_to_string(&mut s)?;
    Ok(s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{add_sensor, create_mock_sysfs};

    #[test]
    fn test_locate_by_prefixed_address() {
        let root = create_mock_sysfs();
        add_sensor(root.path(), 0, "ev3-ports:in2", "lego-ev3-touch", "TOUCH");
        let store = SysfsStore::new(root.path());

        let scope = store.locate(DeviceClass::Sensor, Port::In2).unwrap().unwrap();
        assert!(scope.path().ends_with("lego-sensor/sensor0"));
        assert!(store.locate(DeviceClass::Sensor, Port::In1).unwrap().is_none());
    }

    #[test]
    fn test_locate_missing_class_dir_is_none() {
        let root = tempfile::TempDir::new().unwrap();
        let store = SysfsStore::new(root.path());
        assert!(store.locate(DeviceClass::TachoMotor, Port::OutA).unwrap().is_none());
        assert!(store.connected(DeviceClass::Sensor).unwrap().is_empty());
    }

    #[test]
    fn test_read_trims_and_write_replaces() {
        let root = create_mock_sysfs();
        let dir = add_sensor(root.path(), 3, "ev3-ports:in1", "lego-nxt-light", "AMBIENT");
        fs::write(dir.join("value0"), "47\n").unwrap();
        let store = SysfsStore::new(root.path());
        let scope = Scope::new(&dir);

        assert_eq!(store.read(&scope, "value0").unwrap(), "47");
        store.write(&scope, "mode", "REFLECT").unwrap();
        assert_eq!(store.read(&scope, "mode").unwrap(), "REFLECT");
    }

    #[test]
    fn test_read_missing_attribute_reports_path() {
        let root = create_mock_sysfs();
        let dir = add_sensor(root.path(), 0, "ev3-ports:in1", "lego-nxt-light", "AMBIENT");
        let store = SysfsStore::new(root.path());

        let err = store.read(&Scope::new(&dir), "value7").unwrap_err();
        match err {
            Ev3Error::AttributeRead { path, .. } => assert!(path.ends_with("value7")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_connected_lists_devices_in_order() {
        let root = create_mock_sysfs();
        add_sensor(root.path(), 1, "ev3-ports:in3", "lego-ev3-us", "US-DIST-CM");
        add_sensor(root.path(), 0, "ev3-ports:in1", "lego-nxt-light", "AMBIENT");
        let store = SysfsStore::new(root.path());

        let devices = store.connected(DeviceClass::Sensor).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].address, "ev3-ports:in1");
        assert_eq!(devices[1].driver_name, "lego-ev3-us");
    }

    #[test]
    fn test_connected_skips_device_without_driver() {
        let root = create_mock_sysfs();
        add_sensor(root.path(), 0, "ev3-ports:in1", "lego-nxt-light", "AMBIENT");
        let half = add_sensor(root.path(), 1, "ev3-ports:in2", "lego-ev3-touch", "TOUCH");
        std::fs::remove_file(half.join("driver_name")).unwrap();
        let store = SysfsStore::new(root.path());

        let devices = store.connected(DeviceClass::Sensor).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].driver_name, "lego-nxt-light");
    }
}
