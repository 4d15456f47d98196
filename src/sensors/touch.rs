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

//! EV3 and NXT touch sensors.

use crate::device::DeviceSpec;
use crate::error::Result;
use crate::measure::{Measurement, Sensor};
use crate::store::{AttributeStore, DeviceClass};

pub const MODE_TOUCH: &str = "TOUCH";

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "touch sensor",
    class: DeviceClass::Sensor,
    drivers: &["lego-ev3-touch", "lego-nxt-touch"],
    modes: &[MODE_TOUCH],
};

pub const PRESSED: Measurement = Measurement {
    name: "button state",
    mode: MODE_TOUCH,
    value_index: 0,
};

#[derive(Debug)]
pub struct TouchSensor<S>(Sensor<S>);

super::sensor_wrapper!(TouchSensor, SPEC);

impl<S: AttributeStore> TouchSensor<S> {
    pub fn is_pressed(&self) -> Result<bool> {
        Ok(self.measure(&PRESSED)?.value() != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Port;
    use crate::test_utils::test_utils::MemoryStore;

    #[test]
    fn test_both_drivers_accepted() {
        for (i, driver) in SPEC.drivers.iter().enumerate() {
            let store = MemoryStore::new();
            let scope = store.add_device(
                DeviceClass::Sensor,
                &format!("ev3-ports:in{}", i + 1),
                driver,
                MODE_TOUCH,
            );
            store.set(&scope, "value0", "1");
            let port = if i == 0 { Port::In1 } else { Port::In2 };

            let sensor = TouchSensor::new(&store, port).unwrap();
            assert!(sensor.is_pressed().unwrap());
        }
    }

    #[test]
    fn test_released() {
        let store = MemoryStore::new();
        let scope = store.add_device(
            DeviceClass::Sensor,
            "ev3-ports:in4",
            "lego-ev3-touch",
            MODE_TOUCH,
        );
        store.set(&scope, "value0", "0");

        let sensor = TouchSensor::new(&store, Port::In4).unwrap();
        assert!(!sensor.is_pressed().unwrap());
        assert!(store.writes().is_empty());
    }
}
