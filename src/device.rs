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

//! Generic port-bound device.
//!
//! A [`Device`] is a [`PortBinding`] whose driver has been checked against a
//! [`DeviceSpec`]. Concrete device types (light sensor, touch sensor, tacho
//! motor, ...) are nothing more than a `DeviceSpec` constant plus typed
//! accessors on top of this struct.
//!
//! Mode is never cached: [`Device::mode`] reads the `mode` attribute every
//! time, because other processes and the hardware itself may change it.

use serde_json::json;

use crate::error::{Ev3Error, Result};
use crate::logger;
use crate::port::{Port, PortBinding};
use crate::store::{AttributeStore, DeviceClass, Scope};

/// Capabilities of a device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSpec {
    /// Human readable type name, used in diagnostics.
    pub name: &'static str,
    pub class: DeviceClass,
    /// Driver names accepted at construction.
    pub drivers: &'static [&'static str],
    /// Modes `set_mode` accepts. Empty for devices without modes.
    pub modes: &'static [&'static str],
}

impl DeviceSpec {
    pub fn accepts_driver(&self, driver: &str) -> bool {
        self.drivers.contains(&driver)
    }

    pub fn supports_mode(&self, mode: &str) -> bool {
        self.modes.contains(&mode)
    }
}

/// A bound device whose driver matches its [`DeviceSpec`].
#[derive(Debug)]
pub struct Device<S> {
    binding: PortBinding<S>,
    spec: DeviceSpec,
}

impl<S: AttributeStore> Device<S> {
    /// Bind `port` and verify the attached driver.
    pub fn connect(store: S, port: Port, spec: DeviceSpec) -> Result<Self> {
        let binding = PortBinding::bind(store, port, spec.class)?;
        Self::new(binding, spec)
    }

    /// Wrap an existing binding. Fails with [`Ev3Error::InvalidSensor`] when
    /// the bound driver is not one of `spec.drivers`; the binding is dropped
    /// in that case.
    pub fn new(binding: PortBinding<S>, spec: DeviceSpec) -> Result<Self> {
        let driver = binding.driver_name();
        if !spec.accepts_driver(driver) {
            logger::log_event(
                "driver_rejected",
                json!({
                    "port": binding.port().name(),
                    "device": spec.name,
                    "expected": spec.drivers,
                    "actual": driver,
                }),
            );
            return Err(Ev3Error::InvalidSensor {
                port: binding.port().name().to_string(),
                expected: spec.drivers.iter().map(|d| d.to_string()).collect(),
                actual: driver.to_string(),
            });
        }
        Ok(Self { binding, spec })
    }

    pub fn spec(&self) -> &DeviceSpec {
        &self.spec
    }

    pub fn port(&self) -> Port {
        self.binding.port()
    }

    pub fn driver_name(&self) -> &str {
        self.binding.driver_name()
    }

    pub fn scope(&self) -> &Scope {
        self.binding.scope()
    }

    pub fn binding(&self) -> &PortBinding<S> {
        &self.binding
    }

    pub fn address(&self) -> Result<String> {
        self.binding.address()
    }

    /// Current mode, read from the device.
    pub fn mode(&self) -> Result<String> {
        self.binding.attribute("mode")
    }

    /// Switch mode. Modes not declared by the device type are rejected
    /// without touching the device.
    pub fn set_mode(&self, mode: &str) -> Result<()> {
        if !self.spec.supports_mode(mode) {
            return Err(Ev3Error::unsupported_mode(mode, self.spec.modes));
        }
        self.binding.set_attribute("mode", mode)?;
        logger::log_event(
            "mode_set",
            json!({ "port": self.port().name(), "mode": mode }),
        );
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Result<String> {
        self.binding.attribute(name)
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.binding.set_attribute(name, value)
    }

    /// Read an attribute as a float. Non-numeric text is an error.
    pub fn float_attribute(&self, name: &str) -> Result<f32> {
        let raw = self.attribute(name)?;
        raw.parse::<f32>().map_err(|source| Ev3Error::ParseValue {
            attribute: name.to_string(),
            raw,
            source,
        })
    }

    pub fn int_attribute(&self, name: &str) -> Result<i32> {
        let raw = self.attribute(name)?;
        raw.parse::<i32>().map_err(|_| Ev3Error::UnexpectedValue {
            attribute: name.to_string(),
            raw,
        })
    }

    fn list_attribute(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .attribute(name)?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    // ------------------------------------------------------------------
    // Generic ev3dev attributes
    // ------------------------------------------------------------------

    /// Modes the driver itself advertises.
    pub fn modes(&self) -> Result<Vec<String>> {
        self.list_attribute("modes")
    }

    pub fn commands(&self) -> Result<Vec<String>> {
        self.list_attribute("commands")
    }

    /// Number of `valueN` attributes valid in the current mode.
    pub fn num_values(&self) -> Result<usize> {
        let n = self.int_attribute("num_values")?;
        usize::try_from(n).map_err(|_| Ev3Error::UnexpectedValue {
            attribute: "num_values".to_string(),
            raw: n.to_string(),
        })
    }

    pub fn decimals(&self) -> Result<i32> {
        self.int_attribute("decimals")
    }

    pub fn units(&self) -> Result<String> {
        self.attribute("units")
    }

    /// Send a command, checking it against the advertised `commands` list.
    pub fn send_command(&self, command: &str) -> Result<()> {
        let available = self.commands()?;
        if !available.iter().any(|c| c == command) {
            return Err(Ev3Error::UnexpectedValue {
                attribute: "command".to_string(),
                raw: command.to_string(),
            });
        }
        self.set_attribute("command", command)
    }
}
