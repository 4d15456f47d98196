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

//! Mode-gated measurements.
//!
//! A sensor value is only meaningful while the sensor is in the mode that
//! produces it. [`Sensor::measure`] checks the live mode before every read
//! and either switches it (auto-switch on, the default) or fails with
//! [`Ev3Error::InvalidMode`] without writing anything (auto-switch off).
//!
//! The check and the switch are two separate attribute accesses. Another
//! owner of the same port can change the mode in between; callers that
//! share a port must serialise access themselves.

use serde_json::json;

use crate::device::Device;
use crate::error::{Ev3Error, Result};
use crate::logger;
use crate::store::AttributeStore;

/// One kind of reading a sensor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub name: &'static str,
    /// Mode the sensor must be in for the value to be valid.
    pub mode: &'static str,
    /// Index N of the `valueN` attribute holding the reading.
    pub value_index: usize,
}

impl Measurement {
    pub fn attribute(&self) -> String {
        value_attribute(self.value_index)
    }
}

pub fn value_attribute(index: usize) -> String {
    format!("value{}", index)
}

/// Outcome of a successful measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// The sensor was already in the required mode.
    Measured(f32),
    /// The sensor was switched to the required mode first.
    ModeCorrected(f32),
}

impl Reading {
    pub fn value(self) -> f32 {
        match self {
            Reading::Measured(v) | Reading::ModeCorrected(v) => v,
        }
    }

    pub fn mode_corrected(self) -> bool {
        matches!(self, Reading::ModeCorrected(_))
    }
}

/// A [`Device`] plus the auto-switch policy.
#[derive(Debug)]
pub struct Sensor<S> {
    device: Device<S>,
    auto_switch: bool,
}

impl<S: AttributeStore> Sensor<S> {
    pub fn new(device: Device<S>) -> Self {
        Self {
            device,
            auto_switch: true,
        }
    }

    pub fn device(&self) -> &Device<S> {
        &self.device
    }

    pub fn into_device(self) -> Device<S> {
        self.device
    }

    pub fn set_auto_switch_mode(&mut self, enabled: bool) {
        self.auto_switch = enabled;
    }

    pub fn is_auto_switch_mode(&self) -> bool {
        self.auto_switch
    }

    /// Put the sensor in `required` mode, or fail if auto-switch is off.
    /// Returns true when a mode write happened.
    pub fn ensure_mode(&self, required: &str) -> Result<bool> {
        let current = self.device.mode()?;
        if current == required {
            return Ok(false);
        }

        if !self.auto_switch {
            logger::log_event(
                "mode_mismatch",
                json!({
                    "port": self.device.port().name(),
                    "required": required,
                    "actual": current,
                }),
            );
            return Err(Ev3Error::mode_mismatch(required, current));
        }

        self.device.set_mode(required)?;
        logger::log_event(
            "mode_switch",
            json!({
                "port": self.device.port().name(),
                "from": current,
                "to": required,
            }),
        );
        Ok(true)
    }

    /// Take one reading. Every call hits the device.
    pub fn measure(&self, kind: &Measurement) -> Result<Reading> {
        let corrected = self.ensure_mode(kind.mode)?;
        let value = self.device.float_attribute(&kind.attribute())?;
        Ok(if corrected {
            Reading::ModeCorrected(value)
        } else {
            Reading::Measured(value)
        })
    }

    /// Read several consecutive values (`valueN`, `valueN+1`, ...) produced
    /// by one mode. A range running past `usize::MAX` is rejected before
    /// the mode is touched.
    pub fn measure_all(
        &self,
        mode: &'static str,
        first_index: usize,
        count: usize,
    ) -> Result<Vec<f32>> {
        let end = first_index
            .checked_add(count)
            .ok_or_else(|| Ev3Error::UnexpectedValue {
                attribute: format!("{}..", value_attribute(first_index)),
                raw: count.to_string(),
            })?;
        self.ensure_mode(mode)?;
        (first_index..end)
            .map(|i| self.device.float_attribute(&value_attribute(i)))
            .collect()
    }
}
