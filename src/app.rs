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

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::notify::{EventQueue, SettingsEvent};
use crate::screen::SettingsScreen;
use crate::settings::{Preference, SettingKey};

pub const DEFAULT_STATUS: &str =
    "↑/↓: move | Enter/Space: change | s: save | q: quit";

pub struct App {
    pub screen: SettingsScreen,
    /// Receives world clock and theme notifications from the screen.
    pub events: Arc<EventQueue>,
    pub prefs_path: PathBuf,
    pub last_refresh: Instant,
    pub refresh_interval: Duration,
    pub status: String,
    // index into visible_keys()
    pub selected: usize,
    // list picker popup
    pub show_list_popup: bool,
    pub list_popup_key: Option<SettingKey>,
    pub list_popup_idx: usize,
    // ringtone picker popup: (reference, title)
    pub show_ringtone_popup: bool,
    pub ringtone_choices: Vec<(String, String)>,
    pub ringtone_idx: usize,
    pub show_confirm_quit_popup: bool,
    pub show_warning_popup: bool,
    pub warning_message: String,
    /// Color theme value the UI currently renders with.
    pub theme: String,
    pub world_clock_updates: usize,
}

impl App {
    pub fn new(screen: SettingsScreen, events: Arc<EventQueue>, prefs_path: PathBuf) -> Self {
        let theme = screen.preferences().color_theme.clone();
        Self {
            screen,
            events,
            prefs_path,
            last_refresh: Instant::now(),
            refresh_interval: Duration::from_millis(250),
            status: DEFAULT_STATUS.to_string(),
            selected: 0,
            show_list_popup: false,
            list_popup_key: None,
            list_popup_idx: 0,
            show_ringtone_popup: false,
            ringtone_choices: Vec::new(),
            ringtone_idx: 0,
            show_confirm_quit_popup: false,
            show_warning_popup: false,
            warning_message: String::new(),
            theme,
            world_clock_updates: 0,
        }
    }

    /// Keys of the rows currently shown, in display order.
    pub fn visible_keys(&self) -> Vec<SettingKey> {
        self.screen.rows().map(|p| p.key).collect()
    }

    pub fn selected_key(&self) -> Option<SettingKey> {
        self.visible_keys().get(self.selected).copied()
    }

    pub fn selected_row(&self) -> Option<&Preference> {
        self.selected_key().and_then(|k| self.screen.row(k))
    }

    /// Apply background results and pending notifications.
    pub fn refresh(&mut self) {
        self.screen.poll_background();
        for event in self.events.drain() {
            match event {
                SettingsEvent::ColorThemeUpdate => {
                    self.theme = self.screen.preferences().color_theme.clone();
                }
                SettingsEvent::WorldClockUpdate => self.world_clock_updates += 1,
            }
        }
        self.last_refresh = Instant::now();
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.warning_message = message.into();
        self.show_warning_popup = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrefValue;
    use crate::test_utils::test_utils::*;

    #[test]
    fn test_refresh_applies_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        assert_eq!(app.theme, "0");

        app.screen.on_preference_change(SettingKey::ColorTheme, PrefValue::from("3")).unwrap();
        app.screen.on_preference_change(SettingKey::HomeTimeZone, PrefValue::from("UTC")).unwrap();
        assert_eq!(app.theme, "0");

        app.refresh();
        assert_eq!(app.theme, "3");
        assert_eq!(app.world_clock_updates, 1);
        assert!(app.events.drain().is_empty());
    }

    #[test]
    fn test_selected_row_follows_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        let keys = app.visible_keys();
        app.selected = 1;
        assert_eq!(app.selected_row().map(|r| r.key), Some(keys[1]));
        app.selected = keys.len();
        assert!(app.selected_row().is_none());
    }
}
