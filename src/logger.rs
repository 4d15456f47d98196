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

//! JSON-lines event log for binding and mode transitions.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

const DEFAULT_LOG_PATH: &str = "/var/log/claptrap/events.json";
const FALLBACK_LOG_PATH: &str = "/tmp/claptrap_events.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Start logging to the default location, falling back to /tmp when
/// /var/log is not writable.
pub fn init_logging() {
    let file = open_append(Path::new(DEFAULT_LOG_PATH))
        .or_else(|_| open_append(Path::new(FALLBACK_LOG_PATH)));
    if let Ok(f) = file {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(f);
        }
    }
}

/// Start logging to an explicit file.
pub fn init_logging_at<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let f = open_append(path.as_ref())?;
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(f);
    }
    Ok(())
}

/// Stop logging. Subsequent events are dropped.
pub fn shutdown_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Append one event line. No-op until logging has been initialised.
pub fn log_event(event: &str, data: Value) {
    let Ok(mut guard) = LOG_FILE.lock() else { return };
    let Some(f) = guard.as_mut() else { return };

    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();
    let _ = writeln!(f, "{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_events_written_as_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("events.json");
        init_logging_at(&path).unwrap();
        assert!(is_enabled());

        log_event("logger_test_first", json!({ "from": "AMBIENT", "to": "REFLECT" }));
        log_event("logger_test_second", json!({ "port": "in1" }));
        shutdown_logging();

        // other tests may log concurrently; only look at ours
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .filter(|v: &Value| {
                v["event"]
                    .as_str()
                    .is_some_and(|e| e.starts_with("logger_test_"))
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "logger_test_first");
        assert_eq!(lines[0]["data"]["to"], "REFLECT");
        assert!(lines[0]["ts_ms"].is_u64());
        assert_eq!(lines[1]["data"]["port"], "in1");
    }

    #[test]
    #[serial]
    fn test_disabled_logger_drops_events() {
        shutdown_logging();
        assert!(!is_enabled());
        // must not panic or create files
        log_event("ignored", json!({}));
    }
}
