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

//! Unified error handling for Claptrap
//!
//! Every fallible operation in the crate returns [`Ev3Error`]. Errors are
//! never retried or swallowed inside the library; they travel back to the
//! direct caller with a message that is useful on its own.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

/// Result type alias using Ev3Error
pub type Result<T> = std::result::Result<T, Ev3Error>;

/// Coarse classification of an [`Ev3Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing bindable is connected to the requested port
    InvalidPort,
    /// The connected device is not the requested device type
    InvalidSensor,
    /// The device is not in (or cannot enter) the required mode
    InvalidMode,
    /// Attribute I/O, parse or configuration failure
    Library,
}

/// Why a mode requirement could not be met.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("[auto-switch is off] device must be in mode {required}, but it is in mode {actual}")]
    Mismatch { required: String, actual: String },

    #[error("mode {requested} is not supported (supported: {})", display_list(.supported))]
    Unsupported {
        requested: String,
        supported: Vec<String>,
    },
}

/// Unified error type for all Claptrap operations
#[derive(thiserror::Error, Debug)]
pub enum Ev3Error {
    // ============================================================================
    // Binding Errors
    // ============================================================================
    #[error("Invalid port {port}: {reason}")]
    InvalidPort { port: String, reason: String },

    #[error(
        "Invalid sensor on port {port}: expected driver {}, found {actual}",
        display_list(.expected)
    )]
    InvalidSensor {
        port: String,
        expected: Vec<String>,
        actual: String,
    },

    // ============================================================================
    // Mode Errors
    // ============================================================================
    #[error("Invalid mode: {0}")]
    InvalidMode(#[from] ModeError),

    // ============================================================================
    // Attribute I/O Errors
    // ============================================================================
    #[error("Failed to read attribute {path}: {source}")]
    AttributeRead { path: PathBuf, source: io::Error },

    #[error("Failed to write attribute {path}: {source}")]
    AttributeWrite { path: PathBuf, source: io::Error },

    #[error("Attribute {attribute} holds non-numeric value {raw:?}: {source}")]
    ParseValue {
        attribute: String,
        raw: String,
        source: ParseFloatError,
    },

    #[error("Attribute {attribute} holds unexpected value {raw:?}")]
    UnexpectedValue { attribute: String, raw: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Ev3Error {
    /// Create an invalid port error
    pub fn invalid_port(port: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPort {
            port: port.into(),
            reason: reason.into(),
        }
    }

    /// Create a mode mismatch error naming both the required and the observed mode
    pub fn mode_mismatch(required: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidMode(ModeError::Mismatch {
            required: required.into(),
            actual: actual.into(),
        })
    }

    /// Create an unsupported mode error
    pub fn unsupported_mode(requested: impl Into<String>, supported: &[&str]) -> Self {
        Self::InvalidMode(ModeError::Unsupported {
            requested: requested.into(),
            supported: supported.iter().map(|m| m.to_string()).collect(),
        })
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPort { .. } => ErrorKind::InvalidPort,
            Self::InvalidSensor { .. } => ErrorKind::InvalidSensor,
            Self::InvalidMode(_) => ErrorKind::InvalidMode,
            Self::AttributeRead { .. }
            | Self::AttributeWrite { .. }
            | Self::ParseValue { .. }
            | Self::UnexpectedValue { .. }
            | Self::Config(_)
            | Self::JsonParse(_) => ErrorKind::Library,
        }
    }

    /// True when the underlying I/O failure was a permission fault
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::AttributeRead { source, .. } | Self::AttributeWrite { source, .. } => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// True when the underlying I/O failure was a missing file
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::AttributeRead { source, .. } | Self::AttributeWrite { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

fn display_list(items: &[String]) -> String {
    match items {
        [] => "<none>".to_string(),
        [one] => one.clone(),
        many => format!("one of [{}]", many.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_both_modes() {
        let err = Ev3Error::mode_mismatch("REFLECT", "AMBIENT");
        let msg = err.to_string();
        assert!(msg.contains("REFLECT"));
        assert!(msg.contains("AMBIENT"));
        assert_eq!(err.kind(), ErrorKind::InvalidMode);
    }

    #[test]
    fn test_invalid_sensor_message() {
        let err = Ev3Error::InvalidSensor {
            port: "in1".into(),
            expected: vec!["lego-nxt-light".into()],
            actual: "lego-ev3-color".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid sensor on port in1: expected driver lego-nxt-light, found lego-ev3-color"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidSensor);
    }

    #[test]
    fn test_unsupported_lists_modes() {
        let err = Ev3Error::unsupported_mode("FOO", &["REFLECT", "AMBIENT"]);
        assert!(err.to_string().contains("one of [REFLECT, AMBIENT]"));
    }

    #[test]
    fn test_io_errors_are_library_kind() {
        let err = Ev3Error::AttributeRead {
            path: PathBuf::from("/sys/class/lego-sensor/sensor0/mode"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::Library);
        assert!(err.is_permission_denied());
        assert!(!Ev3Error::config("x").is_permission_denied());
        assert!(!err.is_not_found());

        let missing = Ev3Error::AttributeRead {
            path: PathBuf::from("/sys/class/lego-sensor/sensor0/driver_name"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(missing.is_not_found());
    }
}
