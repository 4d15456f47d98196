/*
 * Test utilities and mock helpers for Claptrap
 *
 * This module provides an in-memory attribute store and helpers that build
 * fake ev3dev sysfs trees in temporary directories.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::error::{Ev3Error, Result};
    use crate::port::Port;
    use crate::store::{AttributeStore, DeviceClass, Scope};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Attribute store kept in memory. Records every write.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        devices: RefCell<Vec<(DeviceClass, Scope)>>,
        attrs: RefCell<HashMap<Scope, HashMap<String, String>>>,
        writes: RefCell<Vec<(String, String)>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a device and return its scope.
        pub fn add_device(
            &self,
            class: DeviceClass,
            address: &str,
            driver: &str,
            mode: &str,
        ) -> Scope {
            let mut devices = self.devices.borrow_mut();
            let scope = Scope::new(format!("/sys/class/{}/dev{}", class.dir_name(), devices.len()));
            devices.push((class, scope.clone()));
            drop(devices);

            self.set(&scope, "address", address);
            self.set(&scope, "driver_name", driver);
            self.set(&scope, "mode", mode);
            scope
        }

        /// Set an attribute without recording it as a write.
        pub fn set(&self, scope: &Scope, name: &str, value: &str) {
            self.attrs
                .borrow_mut()
                .entry(scope.clone())
                .or_default()
                .insert(name.to_string(), value.to_string());
        }

        pub fn get(&self, scope: &Scope, name: &str) -> Option<String> {
            self.attrs.borrow().get(scope).and_then(|a| a.get(name).cloned())
        }

        /// All writes so far as (attribute, value).
        pub fn writes(&self) -> Vec<(String, String)> {
            self.writes.borrow().clone()
        }
    }

    impl AttributeStore for MemoryStore {
        fn locate(&self, class: DeviceClass, port: Port) -> Result<Option<Scope>> {
            let devices = self.devices.borrow();
            Ok(devices
                .iter()
                .filter(|(c, _)| *c == class)
                .find(|(_, scope)| {
                    self.get(scope, "address")
                        .is_some_and(|addr| port.matches_address(&addr))
                })
                .map(|(_, scope)| scope.clone()))
        }

        fn read(&self, scope: &Scope, name: &str) -> Result<String> {
            self.get(scope, name).ok_or_else(|| Ev3Error::AttributeRead {
                path: scope.attribute_path(name),
                source: io::Error::new(io::ErrorKind::NotFound, "no such attribute"),
            })
        }

        fn write(&self, scope: &Scope, name: &str, value: &str) -> Result<()> {
            self.writes
                .borrow_mut()
                .push((name.to_string(), value.to_string()));
            self.set(scope, name, value);
            Ok(())
        }
    }

    /// Creates a temporary directory with empty lego-sensor and tacho-motor classes
    pub fn create_mock_sysfs() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("lego-sensor")).unwrap();
        fs::create_dir_all(temp_dir.path().join("tacho-motor")).unwrap();
        temp_dir
    }

    /// Adds `lego-sensor/sensor<n>` with the given address, driver and mode
    pub fn add_sensor(root: &Path, n: usize, address: &str, driver: &str, mode: &str) -> PathBuf {
        let dir = root.join("lego-sensor").join(format!("sensor{}", n));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("address"), format!("{}\n", address)).unwrap();
        fs::write(dir.join("driver_name"), format!("{}\n", driver)).unwrap();
        fs::write(dir.join("mode"), format!("{}\n", mode)).unwrap();
        dir
    }

    /// Adds `tacho-motor/motor<n>`
    pub fn add_motor(root: &Path, n: usize, address: &str, driver: &str) -> PathBuf {
        let dir = root.join("tacho-motor").join(format!("motor{}", n));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("address"), format!("{}\n", address)).unwrap();
        fs::write(dir.join("driver_name"), format!("{}\n", driver)).unwrap();
        fs::write(
            dir.join("commands"),
            "run-forever run-to-abs-pos run-to-rel-pos run-timed run-direct stop reset\n",
        )
        .unwrap();
        dir
    }

    /// Asserts that two floating point numbers are approximately equal
    pub fn assert_approx_eq(a: f32, b: f32, tolerance: f32) {
        assert!(
            (a - b).abs() < tolerance,
            "Values {} and {} are not approximately equal (tolerance: {})",
            a, b, tolerance
        );
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use crate::port::Port;
    use crate::store::{AttributeStore, DeviceClass};

    #[test]
    fn test_memory_store_locates_by_class() {
        let store = MemoryStore::new();
        store.add_device(DeviceClass::TachoMotor, "ev3-ports:outA", "lego-ev3-l-motor", "");
        let scope = store.add_device(
            DeviceClass::Sensor,
            "ev3-ports:in1",
            "lego-nxt-light",
            "AMBIENT",
        );

        assert_eq!(store.locate(DeviceClass::Sensor, Port::In1).unwrap(), Some(scope));
        assert!(store.locate(DeviceClass::Sensor, Port::OutA).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_records_writes() {
        let store = MemoryStore::new();
        let scope = store.add_device(DeviceClass::Sensor, "in1", "lego-nxt-light", "AMBIENT");
        store.write(&scope, "mode", "REFLECT").unwrap();

        assert_eq!(store.writes(), vec![("mode".to_string(), "REFLECT".to_string())]);
        assert_eq!(store.read(&scope, "mode").unwrap(), "REFLECT");
        assert!(store.read(&scope, "value0").is_err());
    }

    #[test]
    fn test_mock_sysfs_layout() {
        let root = create_mock_sysfs();
        let dir = add_sensor(root.path(), 0, "ev3-ports:in1", "lego-nxt-light", "AMBIENT");
        assert!(dir.join("driver_name").exists());
        let motor = add_motor(root.path(), 0, "ev3-ports:outA", "lego-ev3-l-motor");
        assert!(motor.join("commands").exists());
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(47.0, 47.0001, 0.01);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.01);
    }
}
