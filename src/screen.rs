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

//! The settings screen model: rows built from stored preferences, edits
//! routed through the update rule table, notifications published on
//! zone and theme changes.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::config::{DeviceOptions, PrefValue, SavedPreferences};
use crate::logger;
use crate::notify::{Notifier, SettingsEvent, SettingsListener};
use crate::resources::{ListChoices, TimezoneResources};
use crate::ringtone::{timer_alarm_summary, DirRingtoneLookup, NoRingtones, RingtoneLookup, RingtoneSummaryTask};
use crate::sensors::{SensorAvailability, SensorProbe};
use crate::settings::{
    auto_silence_summary_for, choices_for, dispatch_table, Category, Preference, PreferenceKind,
    SettingKey, SettingsError, UpdateRule, LAYOUT,
};
use crate::timezones::{TimezoneCatalog, TimezoneEntry};

const WIRELESS_HEADER_SUMMARY: &str = "Flip and shake actions are ignored while charging wirelessly";

/// State that outlives a single visit to the settings screen: the ranked
/// zone list, the listeners and the tone service.
pub struct Session {
    pub options: DeviceOptions,
    catalog: TimezoneCatalog,
    notifier: Notifier,
    ringtones: Arc<dyn RingtoneLookup>,
}

impl Session {
    pub fn new(options: DeviceOptions) -> Self {
        let resources = TimezoneResources::load(options.timezones_file.as_deref());
        let ringtones: Arc<dyn RingtoneLookup> = match &options.ringtone_dir {
            Some(dir) => Arc::new(DirRingtoneLookup::new(dir)),
            None => Arc::new(NoRingtones),
        };
        Self::with_parts(options, TimezoneCatalog::new(resources), ringtones)
    }

    pub fn with_parts(
        options: DeviceOptions,
        catalog: TimezoneCatalog,
        ringtones: Arc<dyn RingtoneLookup>,
    ) -> Self {
        Self { options, catalog, notifier: Notifier::new(), ringtones }
    }

    pub fn subscribe(&mut self, listener: Arc<dyn SettingsListener>) {
        self.notifier.subscribe(listener);
    }

    pub fn catalog(&self) -> &TimezoneCatalog { &self.catalog }

    pub fn ringtones(&self) -> Arc<dyn RingtoneLookup> { Arc::clone(&self.ringtones) }

    pub fn open_screen(
        &self,
        prefs: SavedPreferences,
        probe: &dyn SensorProbe,
    ) -> Result<SettingsScreen, SettingsError> {
        let zones = self.catalog.entries()?;
        Ok(SettingsScreen::new(
            prefs,
            &zones,
            SensorAvailability::query(probe),
            &self.options,
            self.notifier.clone(),
            self.ringtones(),
        ))
    }
}

fn zone_choices(zones: &[TimezoneEntry]) -> ListChoices {
    ListChoices {
        entries: zones.iter().map(|z| z.formatted_label.clone()).collect(),
        values: zones.iter().map(|z| z.identifier.clone()).collect(),
    }
}

pub struct SettingsScreen {
    prefs: SavedPreferences,
    categories: Vec<Category>,
    rules: HashMap<SettingKey, UpdateRule>,
    sensors: SensorAvailability,
    notifier: Notifier,
    ringtones: Arc<dyn RingtoneLookup>,
    ringtone_task: Option<RingtoneSummaryTask>,
    dirty: bool,
}

impl SettingsScreen {
    pub fn new(
        prefs: SavedPreferences,
        zones: &[TimezoneEntry],
        sensors: SensorAvailability,
        options: &DeviceOptions,
        notifier: Notifier,
        ringtones: Arc<dyn RingtoneLookup>,
    ) -> Self {
        let mut categories: Vec<Category> = LAYOUT
            .iter()
            .map(|(id, keys)| Category {
                id: *id,
                rows: keys.iter().map(|k| build_row(*k, &prefs, zones)).collect(),
            })
            .collect();

        for cat in &mut categories {
            if !sensors.orientation {
                cat.remove_preference(SettingKey::FlipAction);
            }
            if !sensors.accelerometer {
                cat.remove_preference(SettingKey::ShakeAction);
            }
            if !options.disable_sensor_on_wireless_charging {
                cat.remove_preference(SettingKey::AlarmActionWirelessHeader);
            }
        }
        categories.retain(|c| !c.rows.is_empty());

        Self {
            prefs,
            categories,
            rules: dispatch_table(),
            sensors,
            notifier,
            ringtones,
            ringtone_task: None,
            dirty: false,
        }
    }

    pub fn categories(&self) -> &[Category] { &self.categories }

    pub fn rows(&self) -> impl Iterator<Item = &Preference> {
        self.categories.iter().flat_map(|c| c.rows.iter())
    }

    pub fn row(&self, key: SettingKey) -> Option<&Preference> {
        self.rows().find(|p| p.key == key)
    }

    fn row_mut(&mut self, key: SettingKey) -> Option<&mut Preference> {
        self.categories.iter_mut().flat_map(|c| c.rows.iter_mut()).find(|p| p.key == key)
    }

    pub fn is_shown(&self, key: SettingKey) -> bool { self.row(key).is_some() }

    pub fn preferences(&self) -> &SavedPreferences { &self.prefs }

    pub fn sensors(&self) -> SensorAvailability { self.sensors }

    /// Whether an edit was applied since the last `mark_saved`.
    pub fn is_dirty(&self) -> bool { self.dirty }

    pub fn mark_saved(&mut self) { self.dirty = false; }

    /// Apply a changed value. `Ok(true)` when the value was stored; errors
    /// leave both the row and the stored preferences untouched.
    pub fn on_preference_change(&mut self, key: SettingKey, value: PrefValue) -> Result<bool, SettingsError> {
        let rule = *self
            .rules
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.as_str().to_string()))?;
        if !self.is_shown(key) {
            return Err(SettingsError::Hidden(key));
        }

        match rule {
            UpdateRule::EntrySummary | UpdateRule::HomeZone | UpdateRule::ColorTheme => {
                let text = value.as_text().ok_or(SettingsError::TypeMismatch(key))?;
                self.apply_entry_summary(key, text)?;
            }
            UpdateRule::AutoSilence => {
                let text = value.as_text().ok_or(SettingsError::TypeMismatch(key))?;
                let summary = auto_silence_summary_for(text)?;
                let known = self.row(key).and_then(|r| r.find_index_of_value(text)).is_some();
                if !known {
                    return Err(SettingsError::UnknownValue { key, value: text.to_string() });
                }
                if let Some(row) = self.row_mut(key) {
                    if let PreferenceKind::List { value, .. } = &mut row.kind {
                        *value = text.to_string();
                    }
                    row.summary = summary;
                }
            }
            UpdateRule::AutoHomeClock => {
                let state = value.as_bool().ok_or(SettingsError::TypeMismatch(key))?;
                set_checked(self.row_mut(key), state);
                if let Some(zone) = self.row_mut(SettingKey::HomeTimeZone) {
                    zone.enabled = state;
                }
            }
            UpdateRule::Ringtone => {
                let text = value.as_text().ok_or(SettingsError::TypeMismatch(key))?;
                let summary = timer_alarm_summary(self.ringtones.as_ref(), text, self.prefs.timer_alarm_custom);
                if let Some(row) = self.row_mut(key) {
                    row.kind = PreferenceKind::Ringtone { value: text.to_string() };
                    row.summary = summary;
                }
            }
            UpdateRule::Persist => {
                let state = value.as_bool().ok_or(SettingsError::TypeMismatch(key))?;
                set_checked(self.row_mut(key), state);
            }
        }

        if !self.prefs.set_value(key, &value) {
            return Err(SettingsError::TypeMismatch(key));
        }
        self.dirty = true;
        logger::log_event("preference_change", json!({ "key": key.as_str(), "value": value }));

        match rule {
            UpdateRule::HomeZone | UpdateRule::AutoHomeClock => self.notifier.publish(SettingsEvent::WorldClockUpdate),
            UpdateRule::ColorTheme => self.notifier.publish(SettingsEvent::ColorThemeUpdate),
            _ => {}
        }
        Ok(true)
    }

    fn apply_entry_summary(&mut self, key: SettingKey, text: &str) -> Result<(), SettingsError> {
        let row = self.row_mut(key).ok_or(SettingsError::Hidden(key))?;
        let idx = row.find_index_of_value(text).ok_or_else(|| SettingsError::UnknownValue {
            key,
            value: text.to_string(),
        })?;
        if let PreferenceKind::List { entries, value, .. } = &mut row.kind {
            *value = text.to_string();
            row.summary = entries[idx].clone();
        }
        Ok(())
    }

    /// Row click outside of value edits. Only the custom timer alarm
    /// checkbox reacts, by refreshing the timer alarm summary.
    pub fn on_preference_click(&mut self, key: SettingKey) -> bool {
        if key == SettingKey::TimerAlarmCustom {
            self.refresh_timer_alarm_summary();
            return true;
        }
        false
    }

    pub fn refresh_timer_alarm_summary(&mut self) {
        let summary = timer_alarm_summary(
            self.ringtones.as_ref(),
            &self.prefs.timer_alarm,
            self.prefs.timer_alarm_custom,
        );
        if let Some(row) = self.row_mut(SettingKey::TimerAlarm) {
            row.summary = summary;
        }
    }

    /// Screen became visible again: look the tone title up off-thread.
    pub fn on_resume(&mut self) {
        self.ringtone_task = Some(RingtoneSummaryTask::spawn(
            self.ringtones(),
            self.prefs.timer_alarm.clone(),
            self.prefs.timer_alarm_custom,
        ));
    }

    /// Apply finished background work. Returns true when a row changed.
    pub fn poll_background(&mut self) -> bool {
        let Some(summary) = self.ringtone_task.as_ref().and_then(|t| t.poll()) else { return false };
        self.ringtone_task = None;
        if let Some(row) = self.row_mut(SettingKey::TimerAlarm) {
            row.summary = summary;
        }
        true
    }

    /// Wait for the pending tone lookup; used by non-interactive callers.
    pub fn finish_background(&mut self) {
        if let Some(task) = self.ringtone_task.take() {
            if let Some(summary) = task.wait() {
                if let Some(row) = self.row_mut(SettingKey::TimerAlarm) {
                    row.summary = summary;
                }
            }
        }
    }

    pub fn ringtones(&self) -> Arc<dyn RingtoneLookup> { Arc::clone(&self.ringtones) }
}

fn set_checked(row: Option<&mut Preference>, state: bool) {
    if let Some(row) = row {
        row.kind = PreferenceKind::CheckBox { checked: state };
    }
}

fn build_row(key: SettingKey, prefs: &SavedPreferences, zones: &[TimezoneEntry]) -> Preference {
    match key {
        SettingKey::HomeTimeZone => {
            let mut row = Preference::list(key, zone_choices(zones), &prefs.home_time_zone);
            row.summary = row.entry().unwrap_or_default().to_string();
            row.enabled = prefs.automatic_home_clock;
            row
        }
        SettingKey::AutoSilence => {
            let mut row = Preference::list(key, choices_for(key).unwrap_or_else(empty_choices), &prefs.auto_silence);
            row.summary = auto_silence_summary_for(&prefs.auto_silence).unwrap_or_else(|_| prefs.auto_silence.clone());
            row
        }
        SettingKey::TimerAlarm => Preference::ringtone(key, &prefs.timer_alarm),
        SettingKey::AlarmActionWirelessHeader => Preference::info(key, WIRELESS_HEADER_SUMMARY),
        _ => match (choices_for(key), prefs.value(key)) {
            (Some(choices), Some(PrefValue::Text(value))) => {
                let mut row = Preference::list(key, choices, &value);
                row.summary = row.entry().unwrap_or_default().to_string();
                row
            }
            (_, Some(PrefValue::Bool(checked))) => Preference::checkbox(key, checked),
            _ => Preference::info(key, ""),
        },
    }
}

fn empty_choices() -> ListChoices {
    ListChoices { entries: Vec::new(), values: Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockSettingsListener;
    use crate::sensors::FixedSensors;
    use crate::test_utils::test_utils::*;
    use mockall::predicate::eq;

    #[test]
    fn test_initial_summaries() {
        let screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert_eq!(screen.row(SettingKey::SnoozeDuration).unwrap().summary, "10 minutes");
        assert_eq!(screen.row(SettingKey::AutoSilence).unwrap().summary, "After 10 minutes");
        assert_eq!(screen.row(SettingKey::WeekStart).unwrap().summary, "Locale default");
        assert_eq!(screen.row(SettingKey::HomeTimeZone).unwrap().summary, "");
    }

    #[test]
    fn test_home_zone_row_uses_ranked_catalog() {
        let mut prefs = SavedPreferences::default();
        prefs.home_time_zone = "Asia/Kolkata".to_string();
        prefs.automatic_home_clock = false;
        let screen = create_test_screen_with(prefs, all_sensors(), &DeviceOptions::default(), Notifier::new());

        let row = screen.row(SettingKey::HomeTimeZone).unwrap();
        assert_eq!(row.summary, "(GMT+5:30) Kolkata");
        assert!(!row.enabled);
        match &row.kind {
            PreferenceKind::List { values, .. } => {
                assert_eq!(values, &vec!["Europe/London".to_string(), "UTC".to_string(), "Asia/Kolkata".to_string()]);
            }
            other => panic!("unexpected row kind {:?}", other),
        }
    }

    #[test]
    fn test_sensor_rows_omitted_without_sensors() {
        let screen = create_test_screen(no_sensors(), &DeviceOptions::default(), Notifier::new());
        assert!(!screen.is_shown(SettingKey::FlipAction));
        assert!(!screen.is_shown(SettingKey::ShakeAction));
        assert!(screen.is_shown(SettingKey::FullscreenAlarm));

        let only_accel = SensorAvailability { accelerometer: true, orientation: false };
        let screen = create_test_screen(only_accel, &DeviceOptions::default(), Notifier::new());
        assert!(!screen.is_shown(SettingKey::FlipAction));
        assert!(screen.is_shown(SettingKey::ShakeAction));
    }

    #[test]
    fn test_wireless_header_follows_device_option() {
        let screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert!(!screen.is_shown(SettingKey::AlarmActionWirelessHeader));
        assert!(screen.categories().iter().all(|c| c.id != crate::settings::CategoryId::AlarmActionCategory));

        let opts = DeviceOptions { disable_sensor_on_wireless_charging: true, ..Default::default() };
        let screen = create_test_screen(all_sensors(), &opts, Notifier::new());
        assert!(screen.is_shown(SettingKey::AlarmActionWirelessHeader));
    }

    #[test]
    fn test_change_entry_summary() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert!(screen.on_preference_change(SettingKey::SnoozeDuration, "5".into()).unwrap());
        assert_eq!(screen.row(SettingKey::SnoozeDuration).unwrap().summary, "5 minutes");
        assert_eq!(screen.preferences().snooze_duration_new, "5");
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_change_unknown_value_is_rejected() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        let err = screen.on_preference_change(SettingKey::SnoozeDuration, "7".into()).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownValue { .. }));
        assert_eq!(screen.preferences().snooze_duration_new, "10");
        assert_eq!(screen.row(SettingKey::SnoozeDuration).unwrap().summary, "10 minutes");
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_change_auto_silence() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        screen.on_preference_change(SettingKey::AutoSilence, "-1".into()).unwrap();
        assert_eq!(screen.row(SettingKey::AutoSilence).unwrap().summary, "Never");
        screen.on_preference_change(SettingKey::AutoSilence, "15".into()).unwrap();
        assert!(screen.row(SettingKey::AutoSilence).unwrap().summary.contains("15"));
        assert!(screen.on_preference_change(SettingKey::AutoSilence, "x".into()).is_err());
        assert_eq!(screen.preferences().auto_silence, "15");
    }

    #[test]
    fn test_home_zone_change_publishes_world_clock_update() {
        let mut listener = MockSettingsListener::new();
        listener
            .expect_on_settings_event()
            .with(eq(SettingsEvent::WorldClockUpdate))
            .times(1)
            .return_const(());
        let mut notifier = Notifier::new();
        notifier.subscribe(Arc::new(listener));

        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), notifier);
        screen.on_preference_change(SettingKey::HomeTimeZone, "UTC".into()).unwrap();
        assert_eq!(screen.row(SettingKey::HomeTimeZone).unwrap().summary, "(GMT+0:00) UTC");
    }

    #[test]
    fn test_theme_change_publishes_color_theme_update() {
        let mut listener = MockSettingsListener::new();
        listener
            .expect_on_settings_event()
            .with(eq(SettingsEvent::ColorThemeUpdate))
            .times(1)
            .return_const(());
        let mut notifier = Notifier::new();
        notifier.subscribe(Arc::new(listener));

        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), notifier);
        screen.on_preference_change(SettingKey::ColorTheme, "1".into()).unwrap();
        assert_eq!(screen.row(SettingKey::ColorTheme).unwrap().summary, "Light");
    }

    #[test]
    fn test_plain_changes_publish_nothing() {
        let mut listener = MockSettingsListener::new();
        listener.expect_on_settings_event().times(0);
        let mut notifier = Notifier::new();
        notifier.subscribe(Arc::new(listener));

        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), notifier);
        screen.on_preference_change(SettingKey::SnoozeCount, "3".into()).unwrap();
        screen.on_preference_change(SettingKey::KeepScreenOn, true.into()).unwrap();
    }

    #[test]
    fn test_auto_home_clock_toggles_zone_row() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert!(screen.row(SettingKey::HomeTimeZone).unwrap().enabled);

        screen.on_preference_change(SettingKey::AutoHomeClock, false.into()).unwrap();
        assert!(!screen.row(SettingKey::HomeTimeZone).unwrap().enabled);
        assert!(!screen.row(SettingKey::AutoHomeClock).unwrap().is_checked());
        assert!(!screen.preferences().automatic_home_clock);
    }

    #[test]
    fn test_type_mismatch() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert_eq!(
            screen.on_preference_change(SettingKey::KeepScreenOn, "1".into()),
            Err(SettingsError::TypeMismatch(SettingKey::KeepScreenOn))
        );
        assert_eq!(
            screen.on_preference_change(SettingKey::WeekStart, true.into()),
            Err(SettingsError::TypeMismatch(SettingKey::WeekStart))
        );
    }

    #[test]
    fn test_hidden_rows_reject_changes() {
        let mut screen = create_test_screen(no_sensors(), &DeviceOptions::default(), Notifier::new());
        assert_eq!(
            screen.on_preference_change(SettingKey::FlipAction, "1".into()),
            Err(SettingsError::Hidden(SettingKey::FlipAction))
        );
    }

    #[test]
    fn test_timer_alarm_summary_on_click_and_resume() {
        let mut screen = create_test_screen(all_sensors(), &DeviceOptions::default(), Notifier::new());
        assert!(!screen.on_preference_click(SettingKey::KeepScreenOn));

        screen.on_preference_change(SettingKey::TimerAlarmCustom, true.into()).unwrap();
        assert!(screen.on_preference_click(SettingKey::TimerAlarmCustom));
        assert_eq!(screen.row(SettingKey::TimerAlarm).unwrap().summary, "Silent");

        screen.on_preference_change(SettingKey::TimerAlarmCustom, false.into()).unwrap();
        screen.on_resume();
        screen.finish_background();
        assert_eq!(screen.row(SettingKey::TimerAlarm).unwrap().summary, "Default Tone");
    }

    #[test]
    fn test_session_memoizes_catalog_across_screens() {
        let session = create_test_session();
        let probe = FixedSensors(all_sensors());
        let first = session.open_screen(SavedPreferences::default(), &probe).unwrap();
        let at = session.catalog().reference_instant();
        let second = session.open_screen(SavedPreferences::default(), &probe).unwrap();
        assert_eq!(session.catalog().reference_instant(), at);
        assert_eq!(
            first.row(SettingKey::HomeTimeZone).unwrap().kind,
            second.row(SettingKey::HomeTimeZone).unwrap().kind
        );
    }

    #[test]
    fn test_session_missing_resources_is_error() {
        let session = Session::with_parts(
            DeviceOptions::default(),
            TimezoneCatalog::new(TimezoneResources { values: Some(vec![]), labels: None }),
            Arc::new(NoRingtones),
        );
        let err = session.open_screen(SavedPreferences::default(), &FixedSensors(all_sensors()));
        assert!(matches!(err, Err(SettingsError::Timezone(_))));
    }
}
