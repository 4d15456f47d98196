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

//! EV3 gyro sensor.

use crate::device::DeviceSpec;
use crate::error::Result;
use crate::measure::{Measurement, Sensor};
use crate::store::{AttributeStore, DeviceClass};

pub const MODE_GYRO_ANG: &str = "GYRO-ANG";
pub const MODE_GYRO_RATE: &str = "GYRO-RATE";
pub const MODE_GYRO_G_A: &str = "GYRO-G&A";

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "gyro sensor",
    class: DeviceClass::Sensor,
    drivers: &["lego-ev3-gyro"],
    modes: &[MODE_GYRO_ANG, MODE_GYRO_RATE, MODE_GYRO_G_A],
};

pub const ANGLE: Measurement = Measurement {
    name: "angle",
    mode: MODE_GYRO_ANG,
    value_index: 0,
};

pub const RATE: Measurement = Measurement {
    name: "rotational speed",
    mode: MODE_GYRO_RATE,
    value_index: 0,
};

#[derive(Debug)]
pub struct GyroSensor<S>(Sensor<S>);

super::sensor_wrapper!(GyroSensor, SPEC);

impl<S: AttributeStore> GyroSensor<S> {
    /// Accumulated angle in degrees.
    pub fn angle(&self) -> Result<f32> {
        Ok(self.measure(&ANGLE)?.value())
    }

    /// Rotational speed in degrees per second.
    pub fn rate(&self) -> Result<f32> {
        Ok(self.measure(&RATE)?.value())
    }

    /// Angle and rate in one read (`GYRO-G&A` exposes both).
    pub fn angle_and_rate(&self) -> Result<(f32, f32)> {
        let v = self.measure_all(MODE_GYRO_G_A, 0, 2)?;
        Ok((v[0], v[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Port;
    use crate::test_utils::test_utils::MemoryStore;

    #[test]
    fn test_negative_angle() {
        let store = MemoryStore::new();
        let scope = store.add_device(
            DeviceClass::Sensor,
            "ev3-ports:in2",
            "lego-ev3-gyro",
            MODE_GYRO_ANG,
        );
        store.set(&scope, "value0", "-90");

        let sensor = GyroSensor::new(&store, Port::In2).unwrap();
        assert_eq!(sensor.angle().unwrap(), -90.0);
    }

    #[test]
    fn test_angle_and_rate() {
        let store = MemoryStore::new();
        let scope = store.add_device(
            DeviceClass::Sensor,
            "ev3-ports:in2",
            "lego-ev3-gyro",
            MODE_GYRO_RATE,
        );
        store.set(&scope, "value0", "45");
        store.set(&scope, "value1", "3");

        let sensor = GyroSensor::new(&store, Port::In2).unwrap();
        assert_eq!(sensor.angle_and_rate().unwrap(), (45.0, 3.0));
        assert_eq!(store.writes(), vec![("mode".to_string(), "GYRO-G&A".to_string())]);
    }
}
