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
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

use crate::logger;
use crate::resources::RINGTONE_SILENT;

const AUDIO_EXTENSIONS: &[&str] = &["ogg", "mp3", "wav", "flac"];

/// Resolves stored tone references to titles.
#[cfg_attr(test, mockall::automock)]
pub trait RingtoneLookup: Send + Sync {
    /// Reference of the system default alarm tone, if there is one.
    fn default_alarm_uri(&self) -> Option<String>;
    fn title(&self, uri: &str) -> Option<String>;
    /// (reference, title) pairs offered by the tone picker.
    fn available(&self) -> Vec<(String, String)>;
}

/// Summary of the timer alarm row.
///
/// Without a custom tone an empty reference means the default alarm tone;
/// with a custom tone an empty reference means no tone at all.
pub fn timer_alarm_summary(lookup: &dyn RingtoneLookup, stored: &str, custom: bool) -> String {
    let uri = if stored.is_empty() {
        if custom { None } else { lookup.default_alarm_uri() }
    } else {
        Some(stored.to_string())
    };
    uri.and_then(|u| lookup.title(&u))
        .unwrap_or_else(|| RINGTONE_SILENT.to_string())
}

/// Audio files in one directory; the reference is the file path.
#[derive(Debug, Clone)]
pub struct DirRingtoneLookup {
    dir: PathBuf,
}

impl DirRingtoneLookup {
    pub fn new(dir: &Path) -> Self { Self { dir: dir.to_path_buf() } }

    fn tones(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.dir) else { return Vec::new() };
        let mut tones: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_audio(p))
            .collect();
        tones.sort();
        tones
    }
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// "morning_glory-2.ogg" -> "morning glory 2"
pub fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let title: String = stem.chars().map(|c| if c == '_' || c == '-' { ' ' } else { c }).collect();
    let title = title.trim().to_string();
    if title.is_empty() { None } else { Some(title) }
}

impl RingtoneLookup for DirRingtoneLookup {
    fn default_alarm_uri(&self) -> Option<String> {
        self.tones().first().map(|p| p.display().to_string())
    }

    fn title(&self, uri: &str) -> Option<String> {
        let path = Path::new(uri);
        if path.is_file() && is_audio(path) {
            title_from_path(path)
        } else {
            None
        }
    }

    fn available(&self) -> Vec<(String, String)> {
        self.tones()
            .iter()
            .filter_map(|p| title_from_path(p).map(|t| (p.display().to_string(), t)))
            .collect()
    }
}

/// No tone service available; every summary reads silent.
pub struct NoRingtones;

impl RingtoneLookup for NoRingtones {
    fn default_alarm_uri(&self) -> Option<String> { None }
    fn title(&self, _uri: &str) -> Option<String> { None }
    fn available(&self) -> Vec<(String, String)> { Vec::new() }
}

/// Background summary lookup; the UI thread polls for the result.
pub struct RingtoneSummaryTask {
    result: Arc<Mutex<Option<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RingtoneSummaryTask {
    pub fn spawn(lookup: Arc<dyn RingtoneLookup>, stored: String, custom: bool) -> Self {
        let result = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        let handle = thread::spawn(move || {
            let summary = timer_alarm_summary(lookup.as_ref(), &stored, custom);
            match slot.lock() {
                Ok(mut guard) => *guard = Some(summary),
                Err(poisoned) => {
                    *poisoned.into_inner() = Some(summary);
                    logger::log_error("ringtone_lookup", json!({ "warning": "recovered poisoned result slot" }));
                }
            }
        });
        Self { result, handle: Some(handle) }
    }

    /// Takes the summary once it is ready.
    pub fn poll(&self) -> Option<String> {
        match self.result.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    /// Block until the worker finishes, then take the summary.
    pub fn wait(mut self) -> Option<String> {
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
        self.poll()
    }
}
