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

//! Logical ports and the binding of a port to the device plugged into it.

use std::fmt;
use std::str::FromStr;

use serde_json::json;

use crate::error::{Ev3Error, Result};
use crate::logger;
use crate::store::{AttributeStore, DeviceClass, Scope};

const ADDRESS_PREFIX: &str = "ev3-ports:";

/// Physical attachment point on the brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    In1,
    In2,
    In3,
    In4,
    OutA,
    OutB,
    OutC,
    OutD,
}

impl Port {
    pub const ALL: [Port; 8] = [
        Port::In1,
        Port::In2,
        Port::In3,
        Port::In4,
        Port::OutA,
        Port::OutB,
        Port::OutC,
        Port::OutD,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Port::In1 => "in1",
            Port::In2 => "in2",
            Port::In3 => "in3",
            Port::In4 => "in4",
            Port::OutA => "outA",
            Port::OutB => "outB",
            Port::OutC => "outC",
            Port::OutD => "outD",
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, Port::In1 | Port::In2 | Port::In3 | Port::In4)
    }

    /// The device class normally found on this port.
    pub fn default_class(self) -> DeviceClass {
        if self.is_input() {
            DeviceClass::Sensor
        } else {
            DeviceClass::TachoMotor
        }
    }

    /// Whether a sysfs `address` value refers to this port. The bare form
    /// (`in1`), the prefixed form (`ev3-ports:in1`) and I2C addresses
    /// (`ev3-ports:in1:i2c1`) are accepted.
    pub fn matches_address(self, address: &str) -> bool {
        let name = self.name();
        address.split(':').any(|segment| segment == name)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Port {
    type Err = Ev3Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix(ADDRESS_PREFIX).unwrap_or(trimmed);
        Port::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(bare))
            .ok_or_else(|| Ev3Error::invalid_port(s, "unknown port name"))
    }
}

/// A port resolved to a live device.
///
/// The driver name is read once at bind time and kept for the lifetime of
/// the binding; every other attribute goes straight to the store.
#[derive(Debug)]
pub struct PortBinding<S> {
    store: S,
    port: Port,
    class: DeviceClass,
    scope: Scope,
    driver_name: String,
}

impl<S: AttributeStore> PortBinding<S> {
    /// Resolve `port` to the device of `class` attached to it.
    ///
    /// Fails with [`Ev3Error::InvalidPort`] when nothing is attached or the
    /// device reports no driver name.
    pub fn bind(store: S, port: Port, class: DeviceClass) -> Result<Self> {
        let scope = store.locate(class, port)?.ok_or_else(|| {
            Ev3Error::invalid_port(port.name(), format!("no {} connected", class))
        })?;

        let driver_name = match store.read(&scope, "driver_name") {
            Ok(name) => name,
            Err(e) if e.is_not_found() => String::new(),
            Err(e) => return Err(e),
        };
        if driver_name.is_empty() {
            return Err(Ev3Error::invalid_port(
                port.name(),
                "device reports no driver (unbound)",
            ));
        }

        logger::log_event(
            "port_bound",
            json!({
                "port": port.name(),
                "class": class.dir_name(),
                "driver": driver_name,
                "scope": scope.to_string(),
            }),
        );

        Ok(Self {
            store,
            port,
            class,
            scope,
            driver_name,
        })
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// The `address` attribute as currently reported by the device.
    pub fn address(&self) -> Result<String> {
        self.attribute("address")
    }

    pub fn attribute(&self, name: &str) -> Result<String> {
        self.store.read(&self.scope, name)
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.store.write(&self.scope, name, value)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
