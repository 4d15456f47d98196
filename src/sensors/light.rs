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

//! LEGO NXT light sensor.

use crate::device::DeviceSpec;
use crate::error::Result;
use crate::measure::{Measurement, Sensor};
use crate::store::{AttributeStore, DeviceClass};

pub const DRIVER_NAME: &str = "lego-nxt-light";

pub const MODE_REFLECT: &str = "REFLECT";
pub const MODE_AMBIENT: &str = "AMBIENT";

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "light sensor",
    class: DeviceClass::Sensor,
    drivers: &[DRIVER_NAME],
    modes: &[MODE_REFLECT, MODE_AMBIENT],
};

pub const REFLECTED: Measurement = Measurement {
    name: "reflected light intensity",
    mode: MODE_REFLECT,
    value_index: 0,
};

pub const AMBIENT: Measurement = Measurement {
    name: "ambient light intensity",
    mode: MODE_AMBIENT,
    value_index: 0,
};

#[derive(Debug)]
pub struct LightSensor<S>(Sensor<S>);

super::sensor_wrapper!(LightSensor, SPEC);

impl<S: AttributeStore> LightSensor<S> {
    /// Reflected light intensity, as a percentage. The sensor's LED is lit
    /// in this mode.
    pub fn reflected_light_intensity(&self) -> Result<f32> {
        Ok(self.measure(&REFLECTED)?.value())
    }

    /// Ambient light intensity, as a percentage. The LED is off.
    pub fn ambient_light_intensity(&self) -> Result<f32> {
        Ok(self.measure(&AMBIENT)?.value())
    }
}
