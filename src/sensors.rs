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

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait SensorProbe {
    fn has_accelerometer(&self) -> bool;
    fn has_orientation(&self) -> bool;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SensorAvailability {
    pub accelerometer: bool,
    pub orientation: bool,
}

impl SensorAvailability {
    pub fn query(probe: &dyn SensorProbe) -> Self {
        Self {
            accelerometer: probe.has_accelerometer(),
            orientation: probe.has_orientation(),
        }
    }
}

/// Fixed answers, used for `--no-accel` / `--no-orientation` and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensors(pub SensorAvailability);

impl SensorProbe for FixedSensors {
    fn has_accelerometer(&self) -> bool { self.0.accelerometer }
    fn has_orientation(&self) -> bool { self.0.orientation }
}

/// Linux IIO devices under `<root>/sys/bus/iio/devices`.
#[derive(Debug, Clone)]
pub struct SysfsSensorProbe {
    root: PathBuf,
}

impl SysfsSensorProbe {
    pub fn new() -> Self { Self { root: PathBuf::from("/") } }

    pub fn with_root(root: &Path) -> Self { Self { root: root.to_path_buf() } }

    fn devices_dir(&self) -> PathBuf {
        self.root.join("sys").join("bus").join("iio").join("devices")
    }

    /// Whether any IIO device exposes an attribute starting with one of
    /// `prefixes`. Missing tree means no sensors.
    fn any_attribute(&self, prefixes: &[&str]) -> bool {
        scan_attributes(&self.devices_dir(), prefixes).unwrap_or(false)
    }
}

impl Default for SysfsSensorProbe {
    fn default() -> Self { Self::new() }
}

fn scan_attributes(dir: &Path, prefixes: &[&str]) -> io::Result<bool> {
    let entries = match fs::read_dir(dir) {
        Ok(it) => it,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    for dev in entries.flatten() {
        let Ok(attrs) = fs::read_dir(dev.path()) else { continue };
        for attr in attrs.flatten() {
            let name = attr.file_name();
            let name = name.to_string_lossy();
            if prefixes.iter().any(|p| name.starts_with(p)) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

impl SensorProbe for SysfsSensorProbe {
    fn has_accelerometer(&self) -> bool {
        self.any_attribute(&["in_accel_"])
    }

    fn has_orientation(&self) -> bool {
        self.any_attribute(&["in_rot_", "in_incli_"])
    }
}
