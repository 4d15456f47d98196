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

//! EV3 color sensor.

use std::fmt;

use crate::device::DeviceSpec;
use crate::error::{Ev3Error, Result};
use crate::measure::{Measurement, Sensor};
use crate::store::{AttributeStore, DeviceClass};

pub const MODE_COL_REFLECT: &str = "COL-REFLECT";
pub const MODE_COL_AMBIENT: &str = "COL-AMBIENT";
pub const MODE_COL_COLOR: &str = "COL-COLOR";
pub const MODE_REF_RAW: &str = "REF-RAW";
pub const MODE_RGB_RAW: &str = "RGB-RAW";

pub const SPEC: DeviceSpec = DeviceSpec {
    name: "color sensor",
    class: DeviceClass::Sensor,
    drivers: &["lego-ev3-color"],
    modes: &[
        MODE_COL_REFLECT,
        MODE_COL_AMBIENT,
        MODE_COL_COLOR,
        MODE_REF_RAW,
        MODE_RGB_RAW,
    ],
};

pub const REFLECTED: Measurement = Measurement {
    name: "reflected light intensity",
    mode: MODE_COL_REFLECT,
    value_index: 0,
};

pub const AMBIENT: Measurement = Measurement {
    name: "ambient light intensity",
    mode: MODE_COL_AMBIENT,
    value_index: 0,
};

pub const COLOR: Measurement = Measurement {
    name: "detected color",
    mode: MODE_COL_COLOR,
    value_index: 0,
};

/// Colors reported in `COL-COLOR` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    None,
    Black,
    Blue,
    Green,
    Yellow,
    Red,
    White,
    Brown,
}

impl Color {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Color::None,
            1 => Color::Black,
            2 => Color::Blue,
            3 => Color::Green,
            4 => Color::Yellow,
            5 => Color::Red,
            6 => Color::White,
            7 => Color::Brown,
            _ => return None,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Color::None => "none",
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::White => "white",
            Color::Brown => "brown",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub struct ColorSensor<S>(Sensor<S>);

super::sensor_wrapper!(ColorSensor, SPEC);

impl<S: AttributeStore> ColorSensor<S> {
    pub fn reflected_light_intensity(&self) -> Result<f32> {
        Ok(self.measure(&REFLECTED)?.value())
    }

    pub fn ambient_light_intensity(&self) -> Result<f32> {
        Ok(self.measure(&AMBIENT)?.value())
    }

    pub fn color(&self) -> Result<Color> {
        let raw = self.measure(&COLOR)?.value();
        let unexpected = || Ev3Error::UnexpectedValue {
            attribute: COLOR.attribute(),
            raw: raw.to_string(),
        };
        if !raw.is_finite() || raw.fract() != 0.0 {
            return Err(unexpected());
        }
        Color::from_code(raw as i64).ok_or_else(unexpected)
    }

    /// Raw red, green and blue components (value0..value2 in `RGB-RAW`).
    pub fn rgb(&self) -> Result<(f32, f32, f32)> {
        let v = self.measure_all(MODE_RGB_RAW, 0, 3)?;
        Ok((v[0], v[1], v[2]))
    }
}
