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

//! Tacho motor binding.
//!
//! Only the device layer: binding, driver validation and raw attribute
//! access. Speed regulation and position holding are done by the kernel
//! driver, not here.

use crate::device::{Device, DeviceSpec};
use crate::error::{Ev3Error, Result};
use crate::port::Port;
use crate::store::{AttributeStore, DeviceClass};

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "tacho motor",
    class: DeviceClass::TachoMotor,
    drivers: &["lego-ev3-l-motor", "lego-ev3-m-motor", "lego-nxt-motor"],
    modes: &[],
};

pub const STOP_ACTIONS: &[&str] = &["coast", "brake", "hold"];

#[derive(Debug)]
pub struct TachoMotor<S> {
    device: Device<S>,
}

impl<S: AttributeStore> TachoMotor<S> {
    pub fn new(store: S, port: Port) -> Result<Self> {
        Ok(Self {
            device: Device::connect(store, port, SPEC)?,
        })
    }

    pub fn device(&self) -> &Device<S> {
        &self.device
    }

    /// Tacho count since the last reset.
    pub fn position(&self) -> Result<i32> {
        self.device.int_attribute("position")
    }

    /// Current speed in tacho counts per second.
    pub fn speed(&self) -> Result<i32> {
        self.device.int_attribute("speed")
    }

    pub fn duty_cycle(&self) -> Result<i32> {
        self.device.int_attribute("duty_cycle")
    }

    /// State flags, e.g. `running`, `stalled`.
    pub fn state(&self) -> Result<Vec<String>> {
        Ok(self
            .device
            .attribute("state")?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    pub fn set_speed_sp(&self, speed: i32) -> Result<()> {
        self.device.set_attribute("speed_sp", &speed.to_string())
    }

    pub fn set_stop_action(&self, action: &str) -> Result<()> {
        if !STOP_ACTIONS.contains(&action) {
            return Err(Ev3Error::UnexpectedValue {
                attribute: "stop_action".to_string(),
                raw: action.to_string(),
            });
        }
        self.device.set_attribute("stop_action", action)
    }

    pub fn run_forever(&self) -> Result<()> {
        self.device.send_command("run-forever")
    }

    pub fn stop(&self) -> Result<()> {
        self.device.send_command("stop")
    }

    pub fn reset(&self) -> Result<()> {
        self.device.send_command("reset")
    }
}
