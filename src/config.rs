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

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Ev3Error, Result};
use crate::store::DEFAULT_SYSFS_ROOT;

fn default_sysfs_root() -> PathBuf { PathBuf::from(DEFAULT_SYSFS_ROOT) }
fn default_auto_switch() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ev3Config {
    /// Directory holding the `lego-sensor` and `tacho-motor` classes
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,
    /// Initial auto-switch setting for sensors opened with this config
    #[serde(default = "default_auto_switch")]
    pub auto_switch_mode: bool,
    /// Write the JSON event log
    #[serde(default)]
    pub logging: bool,
}

impl Default for Ev3Config {
    fn default() -> Self {
        Self {
            sysfs_root: default_sysfs_root(),
            auto_switch_mode: default_auto_switch(),
            logging: false,
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(explicit) = env::var("CLAPTRAP_CONFIG") {
        return PathBuf::from(explicit);
    }
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("claptrap").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("claptrap")
            .join("config.json");
    }
    PathBuf::from("/etc/claptrap/config.json")
}

pub fn validate_config(cfg: &Ev3Config) -> Result<()> {
    if !cfg.sysfs_root.is_absolute() {
        return Err(Ev3Error::config(format!(
            "sysfs_root must be an absolute path, got {}",
            cfg.sysfs_root.display()
        )));
    }
    Ok(())
}

/// Load and validate a config file. A missing file yields the defaults.
pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Ev3Config> {
    let path = path.as_ref();
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Ev3Config::default()),
        Err(e) => {
            return Err(Ev3Error::config(format!("cannot read {}: {}", path.display(), e)))
        }
    };
    let cfg: Ev3Config = serde_json::from_str(&data)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn load_config() -> Result<Ev3Config> {
    load_config_from(config_path())
}

pub fn save_config<P: AsRef<Path>>(path: P, cfg: &Ev3Config) -> Result<()> {
    validate_config(cfg)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json)
        .map_err(|e| Ev3Error::config(format!("cannot write {}: {}", path.display(), e)))
}
