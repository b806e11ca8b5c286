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

//! Change notifications for components outside the settings screen
//! (world clock display, theme engine). Listeners subscribe explicitly.

use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::logger;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Home time zone or automatic home clock changed.
    WorldClockUpdate,
    ColorThemeUpdate,
}

impl SettingsEvent {
    pub fn name(self) -> &'static str {
        match self {
            SettingsEvent::WorldClockUpdate => "world_clock_update",
            SettingsEvent::ColorThemeUpdate => "color_theme_update",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SettingsListener: Send + Sync {
    fn on_settings_event(&self, event: SettingsEvent);
}

#[derive(Default, Clone)]
pub struct Notifier {
    listeners: Vec<Arc<dyn SettingsListener>>,
}

impl Notifier {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&mut self, listener: Arc<dyn SettingsListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize { self.listeners.len() }

    /// Deliver to every listener in subscription order.
    pub fn publish(&self, event: SettingsEvent) {
        for l in &self.listeners {
            l.on_settings_event(event);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("listeners", &self.listeners.len()).finish()
    }
}

/// Writes every event to the JSON log.
pub struct EventLogListener;

impl SettingsListener for EventLogListener {
    fn on_settings_event(&self, event: SettingsEvent) {
        logger::log_event("settings_notification", json!({ "event": event.name() }));
    }
}

/// Collects events until the host drains them.
#[derive(Default)]
pub struct EventQueue {
    pending: Mutex<Vec<SettingsEvent>>,
}

impl EventQueue {
    pub fn new() -> Self { Self::default() }

    pub fn drain(&self) -> Vec<SettingsEvent> {
        match self.pending.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl SettingsListener for EventQueue {
    fn on_settings_event(&self, event: SettingsEvent) {
        match self.pending.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
