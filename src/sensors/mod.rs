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

//! Concrete sensor types.
//!
//! Each type is a [`DeviceSpec`] constant, a few [`Measurement`] constants
//! and typed accessors over the shared [`Sensor`] core. The wrappers deref
//! to [`Sensor`], so the auto-switch accessors and raw device access are
//! available on every type.
//!
//! [`DeviceSpec`]: crate::device::DeviceSpec
//! [`Measurement`]: crate::measure::Measurement

pub mod color;
pub mod gyro;
pub mod light;
pub mod touch;
pub mod ultrasonic;

pub use color::{Color, ColorSensor};
pub use gyro::GyroSensor;
pub use light::LightSensor;
pub use touch::TouchSensor;
pub use ultrasonic::UltrasonicSensor;

use crate::config::Ev3Config;
use crate::device::{Device, DeviceSpec};
use crate::error::Result;
use crate::measure::Sensor;
use crate::port::Port;
use crate::store::AttributeStore;

/// Bind `port`, check the driver against `spec`, and apply the configured
/// auto-switch default.
pub(crate) fn open<S: AttributeStore>(
    store: S,
    port: Port,
    spec: DeviceSpec,
    cfg: Option<&Ev3Config>,
) -> Result<Sensor<S>> {
    let mut sensor = Sensor::new(Device::connect(store, port, spec)?);
    if let Some(cfg) = cfg {
        sensor.set_auto_switch_mode(cfg.auto_switch_mode);
    }
    Ok(sensor)
}

macro_rules! sensor_wrapper {
    ($ty:ident, $spec:expr) => {
        impl<S: $crate::store::AttributeStore> $ty<S> {
            /// Bind to the sensor on `port`. Fails if nothing is connected or
            /// the connected sensor is of another type.
            pub fn new(store: S, port: $crate::port::Port) -> $crate::error::Result<Self> {
                Ok(Self($crate::sensors::open(store, port, $spec, None)?))
            }

            /// Like [`Self::new`], with the auto-switch default taken from `cfg`.
            pub fn with_config(
                store: S,
                port: $crate::port::Port,
                cfg: &$crate::config::Ev3Config,
            ) -> $crate::error::Result<Self> {
                Ok(Self($crate::sensors::open(store, port, $spec, Some(cfg))?))
            }

            pub fn into_inner(self) -> $crate::measure::Sensor<S> {
                self.0
            }
        }

        impl<S> std::ops::Deref for $ty<S> {
            type Target = $crate::measure::Sensor<S>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<S> std::ops::DerefMut for $ty<S> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

pub(crate) use sensor_wrapper;
