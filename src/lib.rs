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

//! Claptrap - port-bound device layer for ev3dev motors and sensors
//!
//! Devices are exposed by the kernel as directories of text attributes.
//! This library binds a logical port to the device plugged into it, checks
//! that the device is of the expected type, and takes readings only while
//! the device is in the mode that produces them.
//!
//! ```no_run
//! use claptrap::{LightSensor, Port, SysfsStore};
//!
//! let sensor = LightSensor::new(SysfsStore::default(), Port::In1)?;
//! let pct = sensor.reflected_light_intensity()?;
//! # Ok::<(), claptrap::Ev3Error>(())
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod logger;
pub mod measure;
pub mod motor;
pub mod port;
pub mod sensors;
pub mod store;

pub use config::Ev3Config;
pub use device::{Device, DeviceSpec};
pub use error::{ErrorKind, Ev3Error, ModeError, Result};
pub use measure::{Measurement, Reading, Sensor};
pub use motor::TachoMotor;
pub use port::{Port, PortBinding};
pub use sensors::{Color, ColorSensor, GyroSensor, LightSensor, TouchSensor, UltrasonicSensor};
pub use store::{AttributeStore, ConnectedDevice, DeviceClass, Scope, SysfsStore};

#[cfg(test)]
pub mod test_utils;
