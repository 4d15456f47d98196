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

use std::process;

use anyhow::{anyhow, bail, Context};
use serde_json::json;

use claptrap::config::load_config;
use claptrap::sensors::light;
use claptrap::{
    logger, AttributeStore, DeviceClass, Ev3Error, LightSensor, PortBinding, Reading, Sensor,
    SysfsStore,
};

const USAGE: &str = "usage: claptrap [--logging] <command>

commands:
  list                                 show connected sensors and motors
  mode <port> [MODE]                   print or set a sensor's mode
  light <port> reflect|ambient [--manual]
                                       read the NXT light sensor";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        let denied = err
            .downcast_ref::<Ev3Error>()
            .is_some_and(Ev3Error::is_permission_denied);
        if denied && unsafe { libc::geteuid() } != 0 {
            eprintln!(
                "hint: writing device attributes needs root or membership in the ev3dev group"
            );
        }
        logger::log_event("fatal_error", json!({ "error": err.to_string() }));
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = load_config().context("loading configuration")?;

    let logging_enabled = cfg.logging || args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event("startup", json!({ "args": args }));
    }

    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .collect();
    let manual = args.iter().any(|a| a == "--manual");
    let store = SysfsStore::from_config(&cfg);

    match positional.as_slice() {
        ["list"] => list(&store),
        ["mode", port] => {
            let binding = PortBinding::bind(&store, port.parse()?, DeviceClass::Sensor)?;
            println!("{}", binding.attribute("mode")?);
            Ok(())
        }
        ["mode", port, mode] => {
            // any sensor driver is fine here; the driver's own mode list decides
            let binding = PortBinding::bind(&store, port.parse()?, DeviceClass::Sensor)?;
            let advertised = binding.attribute("modes")?;
            if !advertised.split_whitespace().any(|m| m == *mode) {
                bail!(
                    "{} ({}) does not support mode {} (modes: {})",
                    port,
                    binding.driver_name(),
                    mode,
                    advertised
                );
            }
            binding.set_attribute("mode", mode)?;
            logger::log_event("mode_set", json!({ "port": binding.port().name(), "mode": mode }));
            Ok(())
        }
        ["light", port, which] => {
            let mut sensor = LightSensor::with_config(&store, port.parse()?, &cfg)?;
            if manual {
                sensor.set_auto_switch_mode(false);
            }
            let kind = match *which {
                "reflect" => light::REFLECTED,
                "ambient" => light::AMBIENT,
                other => return Err(anyhow!("unknown light measurement {other:?}\n\n{USAGE}")),
            };
            print_reading(&*sensor, kind.name, sensor.measure(&kind)?);
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            process::exit(2);
        }
    }
}

fn list(store: &SysfsStore) -> anyhow::Result<()> {
    for class in [DeviceClass::Sensor, DeviceClass::TachoMotor] {
        for dev in store.connected(class)? {
            println!(
                "{:<16} {:<12} {:<20} {}",
                dev.address,
                class.dir_name(),
                dev.driver_name,
                dev.scope
            );
        }
    }
    Ok(())
}

fn print_reading<S: AttributeStore>(sensor: &Sensor<S>, name: &str, reading: Reading) {
    let suffix = if reading.mode_corrected() { " (mode switched)" } else { "" };
    println!("{}: {}: {}{}", sensor.device().port(), name, reading.value(), suffix);
}
