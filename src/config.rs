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
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{choices_for, SettingKey, DEFAULT_ALARM_ACTION};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// A stored preference value: list and ringtone rows store strings,
/// checkbox rows store booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Text(String),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            PrefValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefValue::Text(s) => Some(s),
            PrefValue::Bool(_) => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(b: bool) -> Self { PrefValue::Bool(b) }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self { PrefValue::Text(s.to_string()) }
}

impl From<String> for PrefValue {
    fn from(s: String) -> Self { PrefValue::Text(s) }
}

/// Persisted alarm clock preferences. Missing fields take the shipped defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SavedPreferences {
    pub alarm_in_silent_mode: bool,
    pub snooze_duration_new: String,
    pub volume_button_setting: String,
    pub auto_silence: String,
    pub clock_style: String,
    pub home_time_zone: String,
    pub automatic_home_clock: bool,
    pub flip_action_setting: String,
    pub snooze_count: String,
    pub shake_action_setting: String,
    pub keep_screen_on: bool,
    pub volume_increase_speed: String,
    pub pre_alarm_dismiss_all: bool,
    pub fullscreen_alarm: bool,
    /// Tone reference; empty means default tone (or silent when custom).
    pub timer_alarm: String,
    pub timer_alarm_custom: bool,
    pub timer_alarm_vibrate: bool,
    pub timer_alarm_increase_volume: bool,
    pub timer_alarm_increase_volume_speed: String,
    pub week_start: String,
    pub audio_stream: String,
    pub wear_notification: bool,
    pub pre_alarm_notification_time: String,
    pub pre_alarm_notification_show: bool,
    pub color_theme: String,
    pub make_screen_dark: bool,
    pub show_background_image: bool,
    pub vibrate_notification: bool,
}

impl Default for SavedPreferences {
    fn default() -> Self {
        Self {
            alarm_in_silent_mode: true,
            snooze_duration_new: "10".to_string(),
            volume_button_setting: DEFAULT_ALARM_ACTION.to_string(),
            auto_silence: "10".to_string(),
            clock_style: "digital".to_string(),
            home_time_zone: String::new(),
            automatic_home_clock: true,
            flip_action_setting: DEFAULT_ALARM_ACTION.to_string(),
            snooze_count: "0".to_string(),
            shake_action_setting: DEFAULT_ALARM_ACTION.to_string(),
            keep_screen_on: false,
            volume_increase_speed: "0".to_string(),
            pre_alarm_dismiss_all: false,
            fullscreen_alarm: false,
            timer_alarm: String::new(),
            timer_alarm_custom: false,
            timer_alarm_vibrate: false,
            timer_alarm_increase_volume: false,
            timer_alarm_increase_volume_speed: "0".to_string(),
            week_start: "0".to_string(),
            audio_stream: "4".to_string(),
            wear_notification: false,
            pre_alarm_notification_time: "30".to_string(),
            pre_alarm_notification_show: false,
            color_theme: "0".to_string(),
            make_screen_dark: false,
            show_background_image: true,
            vibrate_notification: false,
        }
    }
}

impl SavedPreferences {
    fn text_slot(&mut self, key: SettingKey) -> Option<&mut String> {
        use SettingKey::*;
        Some(match key {
            SnoozeDuration => &mut self.snooze_duration_new,
            VolumeButtons => &mut self.volume_button_setting,
            AutoSilence => &mut self.auto_silence,
            ClockStyle => &mut self.clock_style,
            HomeTimeZone => &mut self.home_time_zone,
            FlipAction => &mut self.flip_action_setting,
            SnoozeCount => &mut self.snooze_count,
            ShakeAction => &mut self.shake_action_setting,
            VolumeIncreaseSpeed => &mut self.volume_increase_speed,
            TimerAlarm => &mut self.timer_alarm,
            TimerAlarmIncreaseVolumeSpeed => &mut self.timer_alarm_increase_volume_speed,
            WeekStart => &mut self.week_start,
            AudioStream => &mut self.audio_stream,
            PreAlarmNotificationTime => &mut self.pre_alarm_notification_time,
            ColorTheme => &mut self.color_theme,
            _ => return None,
        })
    }

    fn bool_slot(&mut self, key: SettingKey) -> Option<&mut bool> {
        use SettingKey::*;
        Some(match key {
            AlarmInSilentMode => &mut self.alarm_in_silent_mode,
            AutoHomeClock => &mut self.automatic_home_clock,
            KeepScreenOn => &mut self.keep_screen_on,
            PreAlarmDismissAll => &mut self.pre_alarm_dismiss_all,
            FullscreenAlarm => &mut self.fullscreen_alarm,
            TimerAlarmCustom => &mut self.timer_alarm_custom,
            TimerAlarmVibrate => &mut self.timer_alarm_vibrate,
            TimerAlarmIncreaseVolume => &mut self.timer_alarm_increase_volume,
            WearNotifications => &mut self.wear_notification,
            PreAlarmNotificationShow => &mut self.pre_alarm_notification_show,
            MakeScreenDark => &mut self.make_screen_dark,
            ShowBackgroundImage => &mut self.show_background_image,
            VibrateNotification => &mut self.vibrate_notification,
            _ => return None,
        })
    }

    /// Stored value for `key`; `None` for keys that are not persisted.
    pub fn value(&self, key: SettingKey) -> Option<PrefValue> {
        use SettingKey::*;
        let text = match key {
            SnoozeDuration => &self.snooze_duration_new,
            VolumeButtons => &self.volume_button_setting,
            AutoSilence => &self.auto_silence,
            ClockStyle => &self.clock_style,
            HomeTimeZone => &self.home_time_zone,
            FlipAction => &self.flip_action_setting,
            SnoozeCount => &self.snooze_count,
            ShakeAction => &self.shake_action_setting,
            VolumeIncreaseSpeed => &self.volume_increase_speed,
            TimerAlarm => &self.timer_alarm,
            TimerAlarmIncreaseVolumeSpeed => &self.timer_alarm_increase_volume_speed,
            WeekStart => &self.week_start,
            AudioStream => &self.audio_stream,
            PreAlarmNotificationTime => &self.pre_alarm_notification_time,
            ColorTheme => &self.color_theme,
            _ => {
                let flag = match key {
                    AlarmInSilentMode => self.alarm_in_silent_mode,
                    AutoHomeClock => self.automatic_home_clock,
                    KeepScreenOn => self.keep_screen_on,
                    PreAlarmDismissAll => self.pre_alarm_dismiss_all,
                    FullscreenAlarm => self.fullscreen_alarm,
                    TimerAlarmCustom => self.timer_alarm_custom,
                    TimerAlarmVibrate => self.timer_alarm_vibrate,
                    TimerAlarmIncreaseVolume => self.timer_alarm_increase_volume,
                    WearNotifications => self.wear_notification,
                    PreAlarmNotificationShow => self.pre_alarm_notification_show,
                    MakeScreenDark => self.make_screen_dark,
                    ShowBackgroundImage => self.show_background_image,
                    VibrateNotification => self.vibrate_notification,
                    _ => return None,
                };
                return Some(PrefValue::Bool(flag));
            }
        };
        Some(PrefValue::Text(text.clone()))
    }

    pub fn text(&self, key: SettingKey) -> Option<String> {
        self.value(key).and_then(|v| v.as_text().map(str::to_string))
    }

    /// Store `value` under `key`. Returns false when the key is not persisted
    /// or the value has the wrong kind.
    pub fn set_value(&mut self, key: SettingKey, value: &PrefValue) -> bool {
        match value {
            PrefValue::Text(s) => match self.text_slot(key) {
                Some(slot) => {
                    *slot = s.clone();
                    true
                }
                None => false,
            },
            PrefValue::Bool(b) => match self.bool_slot(key) {
                Some(slot) => {
                    *slot = *b;
                    true
                }
                None => false,
            },
        }
    }
}

/// Device description: what the hardware offers and where resources live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceOptions {
    /// Show the "ignore sensors while charging wirelessly" row.
    pub disable_sensor_on_wireless_charging: bool,
    /// JSON file with `timezone_values` / `timezone_labels` arrays.
    pub timezones_file: Option<PathBuf>,
    /// Directory scanned for alarm tones.
    pub ringtone_dir: Option<PathBuf>,
    /// Prefix for the sysfs IIO tree, used for testing on fake trees.
    pub sensor_root: Option<PathBuf>,
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("deskclock").join("settings.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("deskclock")
            .join("settings.json");
    }
    PathBuf::from("/etc/deskclock/settings.json")
}

pub fn device_options_path() -> PathBuf { PathBuf::from("/etc/deskclock/device.json") }

pub fn validate_preferences(prefs: &SavedPreferences) -> Result<(), String> {
    for key in SettingKey::ALL {
        let Some(choices) = choices_for(*key) else { continue };
        let Some(value) = prefs.text(*key) else { continue };
        if !choices.values.iter().any(|v| v == &value) {
            return Err(format!("invalid value '{}' for {}", value, key.as_str()));
        }
    }
    let zone = &prefs.home_time_zone;
    if zone.len() > 64 || !zone.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-' | '+')) {
        return Err("invalid home_time_zone".to_string());
    }
    if prefs.timer_alarm.len() > 4096 {
        return Err("timer_alarm reference too long".to_string());
    }
    Ok(())
}

pub fn try_load_preferences(path: &Path) -> Result<SavedPreferences, ConfigError> {
    let data = fs::read_to_string(path)?;
    let prefs: SavedPreferences = serde_json::from_str(&data)?;
    validate_preferences(&prefs).map_err(ConfigError::Invalid)?;
    Ok(prefs)
}

pub fn load_saved_preferences() -> Option<SavedPreferences> {
    try_load_preferences(&config_path()).ok()
}

pub fn save_preferences_to(path: &Path, prefs: &SavedPreferences) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(prefs).unwrap_or_else(|_| "{}".to_string());
    fs::write(path, json)
}

pub fn save_preferences(prefs: &SavedPreferences) -> io::Result<()> {
    save_preferences_to(&config_path(), prefs)
}

pub fn try_load_device_options(path: &Path) -> Result<DeviceOptions, ConfigError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Device options from the system path; a missing file means defaults.
pub fn load_device_options() -> DeviceOptions {
    try_load_device_options(&device_options_path()).unwrap_or_default()
}
