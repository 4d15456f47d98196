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

//! EV3 and NXT ultrasonic sensors.

use crate::device::DeviceSpec;
use crate::error::Result;
use crate::measure::{Measurement, Sensor};
use crate::store::{AttributeStore, DeviceClass};

pub const MODE_US_DIST_CM: &str = "US-DIST-CM";
pub const MODE_US_DIST_IN: &str = "US-DIST-IN";
pub const MODE_US_LISTEN: &str = "US-LISTEN";

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "ultrasonic sensor",
    class: DeviceClass::Sensor,
    drivers: &["lego-ev3-us", "lego-nxt-us"],
    modes: &[MODE_US_DIST_CM, MODE_US_DIST_IN, MODE_US_LISTEN],
};

pub const DISTANCE_CM: Measurement = Measurement {
    name: "distance (cm)",
    mode: MODE_US_DIST_CM,
    value_index: 0,
};

pub const DISTANCE_IN: Measurement = Measurement {
    name: "distance (in)",
    mode: MODE_US_DIST_IN,
    value_index: 0,
};

pub const LISTEN: Measurement = Measurement {
    name: "other sensor present",
    mode: MODE_US_LISTEN,
    value_index: 0,
};

#[derive(Debug)]
pub struct UltrasonicSensor<S>(Sensor<S>);

super::sensor_wrapper!(UltrasonicSensor, SPEC);

impl<S: AttributeStore> UltrasonicSensor<S> {
    /// Distance in centimeters. The raw value is in tenths of a centimeter.
    pub fn distance_centimeters(&self) -> Result<f32> {
        Ok(self.measure(&DISTANCE_CM)?.value() / 10.0)
    }

    /// Distance in inches. The raw value is in tenths of an inch.
    pub fn distance_inches(&self) -> Result<f32> {
        Ok(self.measure(&DISTANCE_IN)?.value() / 10.0)
    }

    /// Whether another ultrasonic sensor is transmitting nearby.
    pub fn other_sensor_present(&self) -> Result<bool> {
        Ok(self.measure(&LISTEN)?.value() != 0.0)
    }
}
