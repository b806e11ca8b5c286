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

//! Preference rows, categories and the key -> update rule table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::resources::{self, ListChoices};
use crate::timezones::TimezoneError;

/// Alarm action values shared by volume buttons, flip and shake.
pub const ALARM_NO_ACTION: &str = "0";
pub const ALARM_SNOOZE: &str = "1";
pub const ALARM_DISMISS: &str = "2";
pub const DEFAULT_ALARM_ACTION: &str = ALARM_NO_ACTION;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),
    #[error("Value '{value}' is not a choice of {key}")]
    UnknownValue { key: SettingKey, value: String },
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: SettingKey, value: String },
    #[error("Wrong value type for {0}")]
    TypeMismatch(SettingKey),
    #[error("Setting {0} is not shown on this device")]
    Hidden(SettingKey),
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    AlarmInSilentMode,
    SnoozeDuration,
    VolumeButtons,
    AutoSilence,
    ClockStyle,
    HomeTimeZone,
    AutoHomeClock,
    FlipAction,
    SnoozeCount,
    ShakeAction,
    KeepScreenOn,
    VolumeIncreaseSpeed,
    PreAlarmDismissAll,
    FullscreenAlarm,
    TimerAlarm,
    TimerAlarmCustom,
    TimerAlarmVibrate,
    TimerAlarmIncreaseVolume,
    TimerAlarmIncreaseVolumeSpeed,
    WeekStart,
    AudioStream,
    WearNotifications,
    PreAlarmNotificationTime,
    PreAlarmNotificationShow,
    ColorTheme,
    MakeScreenDark,
    ShowBackgroundImage,
    VibrateNotification,
    AlarmActionWirelessHeader,
}

impl SettingKey {
    pub const ALL: &'static [SettingKey] = &[
        SettingKey::AlarmInSilentMode,
        SettingKey::SnoozeDuration,
        SettingKey::VolumeButtons,
        SettingKey::AutoSilence,
        SettingKey::ClockStyle,
        SettingKey::HomeTimeZone,
        SettingKey::AutoHomeClock,
        SettingKey::FlipAction,
        SettingKey::SnoozeCount,
        SettingKey::ShakeAction,
        SettingKey::KeepScreenOn,
        SettingKey::VolumeIncreaseSpeed,
        SettingKey::PreAlarmDismissAll,
        SettingKey::FullscreenAlarm,
        SettingKey::TimerAlarm,
        SettingKey::TimerAlarmCustom,
        SettingKey::TimerAlarmVibrate,
        SettingKey::TimerAlarmIncreaseVolume,
        SettingKey::TimerAlarmIncreaseVolumeSpeed,
        SettingKey::WeekStart,
        SettingKey::AudioStream,
        SettingKey::WearNotifications,
        SettingKey::PreAlarmNotificationTime,
        SettingKey::PreAlarmNotificationShow,
        SettingKey::ColorTheme,
        SettingKey::MakeScreenDark,
        SettingKey::ShowBackgroundImage,
        SettingKey::VibrateNotification,
        SettingKey::AlarmActionWirelessHeader,
    ];

    /// Storage key, identical to the field name in the preferences file.
    pub fn as_str(self) -> &'static str {
        use SettingKey::*;
        match self {
            AlarmInSilentMode => "alarm_in_silent_mode",
            SnoozeDuration => "snooze_duration_new",
            VolumeButtons => "volume_button_setting",
            AutoSilence => "auto_silence",
            ClockStyle => "clock_style",
            HomeTimeZone => "home_time_zone",
            AutoHomeClock => "automatic_home_clock",
            FlipAction => "flip_action_setting",
            SnoozeCount => "snooze_count",
            ShakeAction => "shake_action_setting",
            KeepScreenOn => "keep_screen_on",
            VolumeIncreaseSpeed => "volume_increase_speed",
            PreAlarmDismissAll => "pre_alarm_dismiss_all",
            FullscreenAlarm => "fullscreen_alarm",
            TimerAlarm => "timer_alarm",
            TimerAlarmCustom => "timer_alarm_custom",
            TimerAlarmVibrate => "timer_alarm_vibrate",
            TimerAlarmIncreaseVolume => "timer_alarm_increase_volume",
            TimerAlarmIncreaseVolumeSpeed => "timer_alarm_increase_volume_speed",
            WeekStart => "week_start",
            AudioStream => "audio_stream",
            WearNotifications => "wear_notification",
            PreAlarmNotificationTime => "pre_alarm_notification_time",
            PreAlarmNotificationShow => "pre_alarm_notification_show",
            ColorTheme => "color_theme",
            MakeScreenDark => "make_screen_dark",
            ShowBackgroundImage => "show_background_image",
            VibrateNotification => "vibrate_notification",
            AlarmActionWirelessHeader => "alarm_action_wireless_header",
        }
    }

    pub fn title(self) -> &'static str {
        use SettingKey::*;
        match self {
            AlarmInSilentMode => "Alarm in silent mode",
            SnoozeDuration => "Snooze length",
            VolumeButtons => "Volume buttons",
            AutoSilence => "Silence after",
            ClockStyle => "Style",
            HomeTimeZone => "Home time zone",
            AutoHomeClock => "Automatic home clock",
            FlipAction => "Flip action",
            SnoozeCount => "Snooze count",
            ShakeAction => "Shake action",
            KeepScreenOn => "Keep screen on",
            VolumeIncreaseSpeed => "Gradually increase volume",
            PreAlarmDismissAll => "Dismiss all pre-alarms",
            FullscreenAlarm => "Fullscreen alarm",
            TimerAlarm => "Timer alarm",
            TimerAlarmCustom => "Custom timer alarm",
            TimerAlarmVibrate => "Vibrate on timer alarm",
            TimerAlarmIncreaseVolume => "Increase timer alarm volume",
            TimerAlarmIncreaseVolumeSpeed => "Timer alarm volume speed",
            WeekStart => "Start week on",
            AudioStream => "Alarm audio stream",
            WearNotifications => "Wearable notifications",
            PreAlarmNotificationTime => "Pre-alarm notification time",
            PreAlarmNotificationShow => "Show pre-alarm notification",
            ColorTheme => "Color theme",
            MakeScreenDark => "Dark alarm screen",
            ShowBackgroundImage => "Background image",
            VibrateNotification => "Vibrate on notification",
            AlarmActionWirelessHeader => "Sensors while charging wirelessly",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

/// Fixed choices of a list key. The home time zone is built from the
/// ranked catalog instead and has no fixed choices.
pub fn choices_for(key: SettingKey) -> Option<ListChoices> {
    use SettingKey::*;
    Some(match key {
        SnoozeDuration => resources::snooze_duration_choices(),
        VolumeButtons => resources::volume_button_choices(),
        AutoSilence => resources::auto_silence_choices(),
        ClockStyle => resources::clock_style_choices(),
        FlipAction | ShakeAction => resources::alarm_action_choices(),
        SnoozeCount => resources::snooze_count_choices(),
        VolumeIncreaseSpeed | TimerAlarmIncreaseVolumeSpeed => resources::volume_increase_speed_choices(),
        WeekStart => resources::week_start_choices(),
        AudioStream => resources::audio_stream_choices(),
        PreAlarmNotificationTime => resources::pre_alarm_notification_time_choices(),
        ColorTheme => resources::color_theme_choices(),
        _ => return None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceKind {
    List { entries: Vec<String>, values: Vec<String>, value: String },
    CheckBox { checked: bool },
    Ringtone { value: String },
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub key: SettingKey,
    pub title: String,
    pub summary: String,
    pub enabled: bool,
    pub kind: PreferenceKind,
}

impl Preference {
    pub fn list(key: SettingKey, choices: ListChoices, value: &str) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            summary: String::new(),
            enabled: true,
            kind: PreferenceKind::List {
                entries: choices.entries,
                values: choices.values,
                value: value.to_string(),
            },
        }
    }

    pub fn checkbox(key: SettingKey, checked: bool) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            summary: String::new(),
            enabled: true,
            kind: PreferenceKind::CheckBox { checked },
        }
    }

    pub fn ringtone(key: SettingKey, value: &str) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            summary: String::new(),
            enabled: true,
            kind: PreferenceKind::Ringtone { value: value.to_string() },
        }
    }

    pub fn info(key: SettingKey, summary: &str) -> Self {
        Self {
            key,
            title: key.title().to_string(),
            summary: summary.to_string(),
            enabled: true,
            kind: PreferenceKind::Info,
        }
    }

    pub fn find_index_of_value(&self, value: &str) -> Option<usize> {
        match &self.kind {
            PreferenceKind::List { values, .. } => values.iter().position(|v| v == value),
            _ => None,
        }
    }

    /// Display entry of the current list value.
    pub fn entry(&self) -> Option<&str> {
        match &self.kind {
            PreferenceKind::List { entries, values, value } => values
                .iter()
                .position(|v| v == value)
                .and_then(|i| entries.get(i))
                .map(String::as_str),
            _ => None,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.kind, PreferenceKind::CheckBox { checked: true })
    }
}

/// How a changed value is turned into row state and side effects.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpdateRule {
    /// Summary becomes the entry matching the new value.
    EntrySummary,
    /// `-1` reads "Never", other minutes use the summary template.
    AutoSilence,
    /// Entry summary, then a world clock update.
    HomeZone,
    /// Enables the home zone row, then a world clock update.
    AutoHomeClock,
    /// Entry summary, then a color theme update.
    ColorTheme,
    /// Tone reference stored, summary looked up from the ringtone service.
    Ringtone,
    /// Value stored, nothing else changes.
    Persist,
}

pub fn dispatch_table() -> HashMap<SettingKey, UpdateRule> {
    use SettingKey::*;
    let mut table = HashMap::new();
    for key in [
        SnoozeDuration,
        VolumeButtons,
        ClockStyle,
        FlipAction,
        SnoozeCount,
        ShakeAction,
        VolumeIncreaseSpeed,
        TimerAlarmIncreaseVolumeSpeed,
        WeekStart,
        AudioStream,
        PreAlarmNotificationTime,
    ] {
        table.insert(key, UpdateRule::EntrySummary);
    }
    table.insert(AutoSilence, UpdateRule::AutoSilence);
    table.insert(HomeTimeZone, UpdateRule::HomeZone);
    table.insert(AutoHomeClock, UpdateRule::AutoHomeClock);
    table.insert(ColorTheme, UpdateRule::ColorTheme);
    table.insert(TimerAlarm, UpdateRule::Ringtone);
    for key in [
        AlarmInSilentMode,
        KeepScreenOn,
        PreAlarmDismissAll,
        FullscreenAlarm,
        TimerAlarmCustom,
        TimerAlarmVibrate,
        TimerAlarmIncreaseVolume,
        WearNotifications,
        PreAlarmNotificationShow,
        MakeScreenDark,
        ShowBackgroundImage,
        VibrateNotification,
    ] {
        table.insert(key, UpdateRule::Persist);
    }
    table
}

pub fn auto_silence_summary_for(value: &str) -> Result<String, SettingsError> {
    let minutes: i32 = value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        key: SettingKey::AutoSilence,
        value: value.to_string(),
    })?;
    if minutes == -1 {
        Ok(resources::AUTO_SILENCE_NEVER.to_string())
    } else {
        Ok(resources::auto_silence_summary(minutes))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CategoryId {
    Clock,
    Alarms,
    FullscreenAlarmSettings,
    AlarmActionCategory,
    Timers,
}

impl CategoryId {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Clock => "clock",
            CategoryId::Alarms => "alarms",
            CategoryId::FullscreenAlarmSettings => "fullscreen_alarm_settings",
            CategoryId::AlarmActionCategory => "alarm_action_category",
            CategoryId::Timers => "timers",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CategoryId::Clock => "Clock",
            CategoryId::Alarms => "Alarms",
            CategoryId::FullscreenAlarmSettings => "Fullscreen alarm",
            CategoryId::AlarmActionCategory => "Alarm actions",
            CategoryId::Timers => "Timers",
        }
    }
}

/// Screen layout: categories in display order with their row keys.
pub const LAYOUT: &[(CategoryId, &[SettingKey])] = &[
    (
        CategoryId::Clock,
        &[
            SettingKey::ClockStyle,
            SettingKey::AutoHomeClock,
            SettingKey::HomeTimeZone,
            SettingKey::WeekStart,
            SettingKey::ColorTheme,
            SettingKey::ShowBackgroundImage,
            SettingKey::KeepScreenOn,
        ],
    ),
    (
        CategoryId::Alarms,
        &[
            SettingKey::AlarmInSilentMode,
            SettingKey::AutoSilence,
            SettingKey::SnoozeDuration,
            SettingKey::SnoozeCount,
            SettingKey::VolumeButtons,
            SettingKey::VolumeIncreaseSpeed,
            SettingKey::AudioStream,
            SettingKey::PreAlarmNotificationShow,
            SettingKey::PreAlarmNotificationTime,
            SettingKey::PreAlarmDismissAll,
            SettingKey::WearNotifications,
            SettingKey::VibrateNotification,
        ],
    ),
    (
        CategoryId::FullscreenAlarmSettings,
        &[
            SettingKey::FullscreenAlarm,
            SettingKey::MakeScreenDark,
            SettingKey::FlipAction,
            SettingKey::ShakeAction,
        ],
    ),
    (CategoryId::AlarmActionCategory, &[SettingKey::AlarmActionWirelessHeader]),
    (
        CategoryId::Timers,
        &[
            SettingKey::TimerAlarm,
            SettingKey::TimerAlarmCustom,
            SettingKey::TimerAlarmVibrate,
            SettingKey::TimerAlarmIncreaseVolume,
            SettingKey::TimerAlarmIncreaseVolumeSpeed,
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub rows: Vec<Preference>,
}

impl Category {
    pub fn remove_preference(&mut self, key: SettingKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|p| p.key != key);
        self.rows.len() != before
    }
}
