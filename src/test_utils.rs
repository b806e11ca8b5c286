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

#[cfg(test)]
pub mod test_utils {
    use std::path::Path;
    use std::sync::Arc;

    use crate::app::App;
    use crate::config::{DeviceOptions, SavedPreferences};
    use crate::notify::{EventQueue, Notifier};
    use crate::resources::TimezoneResources;
    use crate::ringtone::RingtoneLookup;
    use crate::screen::{Session, SettingsScreen};
    use crate::sensors::{FixedSensors, SensorAvailability};
    use crate::timezones::TimezoneCatalog;

    /// 2024-01-15T12:00:00Z, outside of European summer time.
    pub const WINTER_MS: i64 = 1_705_320_000_000;

    pub const TEST_DEFAULT_URI: &str = "tone://default";
    pub const TEST_CHIME_URI: &str = "tone://chime";

    /// Fixed tone service: one default tone and one extra.
    pub struct FixedRingtones;

    impl RingtoneLookup for FixedRingtones {
        fn default_alarm_uri(&self) -> Option<String> { Some(TEST_DEFAULT_URI.to_string()) }

        fn title(&self, uri: &str) -> Option<String> {
            match uri {
                TEST_DEFAULT_URI => Some("Default Tone".to_string()),
                TEST_CHIME_URI => Some("Chime".to_string()),
                _ => None,
            }
        }

        fn available(&self) -> Vec<(String, String)> {
            vec![(TEST_CHIME_URI.to_string(), "Chime".to_string())]
        }
    }

    /// London, Kolkata, UTC: ranks to London, UTC, Kolkata in winter.
    pub fn create_test_resources() -> TimezoneResources {
        TimezoneResources {
            values: Some(vec!["Europe/London".into(), "Asia/Kolkata".into(), "UTC".into()]),
            labels: Some(vec!["London".into(), "Kolkata".into(), "UTC".into()]),
        }
    }

    pub fn all_sensors() -> SensorAvailability {
        SensorAvailability { accelerometer: true, orientation: true }
    }

    pub fn no_sensors() -> SensorAvailability { SensorAvailability::default() }

    /// Session whose catalog is already ranked at `WINTER_MS`.
    pub fn create_test_session() -> Session {
        let catalog = TimezoneCatalog::new(create_test_resources());
        catalog.entries_at(WINTER_MS).unwrap();
        Session::with_parts(DeviceOptions::default(), catalog, Arc::new(FixedRingtones))
    }

    pub fn create_test_screen_with(
        prefs: SavedPreferences,
        sensors: SensorAvailability,
        options: &DeviceOptions,
        notifier: Notifier,
    ) -> SettingsScreen {
        let zones = crate::timezones::rank(
            create_test_resources().values.as_deref(),
            create_test_resources().labels.as_deref(),
            WINTER_MS,
        )
        .unwrap();
        SettingsScreen::new(prefs, &zones, sensors, options, notifier, Arc::new(FixedRingtones))
    }

    pub fn create_test_screen(sensors: SensorAvailability, options: &DeviceOptions, notifier: Notifier) -> SettingsScreen {
        create_test_screen_with(SavedPreferences::default(), sensors, options, notifier)
    }

    /// App over a fresh session; preferences are saved under `dir`.
    pub fn create_mock_app(dir: &Path) -> App {
        let mut session = create_test_session();
        let events = Arc::new(EventQueue::new());
        session.subscribe(events.clone());
        let screen = session
            .open_screen(SavedPreferences::default(), &FixedSensors(all_sensors()))
            .unwrap();
        App::new(screen, events, dir.join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use crate::settings::SettingKey;

    #[test]
    fn test_fixture_catalog_is_ranked_in_winter() {
        let session = create_test_session();
        assert_eq!(session.catalog().reference_instant(), Some(WINTER_MS));
        let ids: Vec<String> = session
            .catalog()
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.identifier.clone())
            .collect();
        assert_eq!(ids, vec!["Europe/London", "UTC", "Asia/Kolkata"]);
    }

    #[test]
    fn test_mock_app() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_mock_app(dir.path());
        assert_eq!(app.selected_key(), Some(SettingKey::ClockStyle));
        assert!(app.screen.is_shown(SettingKey::FlipAction));
        assert!(!app.screen.is_dirty());
    }
}
