/*
 * This file is part of deskclock-settings.
 *
 * Copyright (C) 2025 deskclock-settings contributors
 *
 * deskclock-settings is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * deskclock-settings is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with deskclock-settings. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use lazy_static::lazy_static;
use serde_json::{json, Value};

const FALLBACK_LOG_PATH: &str = "/tmp/deskclock_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

/// JSON-lines log location, following XDG state dir conventions.
pub fn log_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_STATE_HOME") {
        return Path::new(&xdg).join("deskclock").join("logs.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".local")
            .join("state")
            .join("deskclock")
            .join("logs.json");
    }
    PathBuf::from(FALLBACK_LOG_PATH)
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

pub fn init_logging() {
    init_logging_at(&log_path());
}

pub fn init_logging_at(path: &Path) {
    let file = open_append(path).or_else(|| open_append(Path::new(FALLBACK_LOG_PATH)));
    if let Some(f) = file {
        match LOG_FILE.lock() {
            Ok(mut guard) => *guard = Some(f),
            Err(poisoned) => *poisoned.into_inner() = Some(f),
        }
    }
}

pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

pub fn format_event(event: &str, data: &Value) -> String {
    json!({
        "ts_ms": Utc::now().timestamp_millis(),
        "event": event,
        "data": data,
    })
    .to_string()
}

/// Append one event. Without `init_logging` events are dropped, except
/// errors which still land in the /tmp fallback.
pub fn log_event(event: &str, data: Value) {
    let line = format_event(event, &data);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
        }
    }
}

pub fn log_error(event: &str, data: Value) {
    let line = format_event(event, &data);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
            return;
        }
    }
    if let Some(mut f) = open_append(Path::new(FALLBACK_LOG_PATH)) {
        let _ = writeln!(f, "{}", line);
    }
}
