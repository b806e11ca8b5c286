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

//! Built-in string arrays and strings shown by the settings screen.

use std::fs;
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::settings::{ALARM_DISMISS, ALARM_NO_ACTION, ALARM_SNOOZE};

pub const AUTO_SILENCE_NEVER: &str = "Never";
pub const RINGTONE_SILENT: &str = "Silent";
pub const DEFAULT_WEEK_START: &str = "Locale default";

pub fn auto_silence_summary(minutes: i32) -> String {
    format!("After {} minutes", minutes)
}

pub const TIMEZONE_VALUES: &[&str] = &[
    "Pacific/Majuro",
    "Pacific/Midway",
    "Pacific/Honolulu",
    "America/Anchorage",
    "America/Los_Angeles",
    "America/Tijuana",
    "America/Phoenix",
    "America/Chihuahua",
    "America/Denver",
    "America/Costa_Rica",
    "America/Chicago",
    "America/Mexico_City",
    "America/Regina",
    "America/Bogota",
    "America/New_York",
    "America/Caracas",
    "America/Barbados",
    "America/Halifax",
    "America/Manaus",
    "America/Santiago",
    "America/St_Johns",
    "America/Sao_Paulo",
    "America/Argentina/Buenos_Aires",
    "America/Nuuk",
    "America/Montevideo",
    "Atlantic/South_Georgia",
    "Atlantic/Azores",
    "Atlantic/Cape_Verde",
    "Africa/Casablanca",
    "Europe/London",
    "Europe/Amsterdam",
    "Europe/Belgrade",
    "Europe/Brussels",
    "Europe/Madrid",
    "Europe/Sarajevo",
    "Europe/Berlin",
    "Africa/Windhoek",
    "Africa/Brazzaville",
    "Asia/Amman",
    "Europe/Athens",
    "Europe/Istanbul",
    "Asia/Beirut",
    "Africa/Cairo",
    "Europe/Helsinki",
    "Asia/Jerusalem",
    "Africa/Harare",
    "Europe/Minsk",
    "Asia/Baghdad",
    "Europe/Moscow",
    "Asia/Kuwait",
    "Africa/Nairobi",
    "Asia/Tehran",
    "Asia/Baku",
    "Asia/Tbilisi",
    "Asia/Yerevan",
    "Asia/Dubai",
    "Asia/Kabul",
    "Asia/Karachi",
    "Asia/Oral",
    "Asia/Yekaterinburg",
    "Asia/Kolkata",
    "Asia/Colombo",
    "Asia/Kathmandu",
    "Asia/Almaty",
    "Asia/Yangon",
    "Asia/Krasnoyarsk",
    "Asia/Bangkok",
    "Asia/Jakarta",
    "Asia/Shanghai",
    "Asia/Hong_Kong",
    "Asia/Irkutsk",
    "Asia/Kuala_Lumpur",
    "Australia/Perth",
    "Asia/Taipei",
    "Asia/Seoul",
    "Asia/Tokyo",
    "Asia/Yakutsk",
    "Australia/Adelaide",
    "Australia/Darwin",
    "Australia/Brisbane",
    "Australia/Hobart",
    "Australia/Sydney",
    "Asia/Vladivostok",
    "Pacific/Guam",
    "Asia/Magadan",
    "Pacific/Noumea",
    "Pacific/Auckland",
    "Pacific/Fiji",
    "Pacific/Tongatapu",
];

pub const TIMEZONE_LABELS: &[&str] = &[
    "Marshall Islands",
    "Midway Island",
    "Hawaii",
    "Alaska",
    "Pacific Time",
    "Tijuana",
    "Arizona",
    "Chihuahua",
    "Mountain Time",
    "Central America",
    "Central Time",
    "Mexico City",
    "Saskatchewan",
    "Bogota",
    "Eastern Time",
    "Venezuela",
    "Atlantic Time (Barbados)",
    "Atlantic Time (Canada)",
    "Manaus",
    "Santiago",
    "Newfoundland",
    "Brasilia",
    "Buenos Aires",
    "Greenland",
    "Montevideo",
    "Mid-Atlantic",
    "Azores",
    "Cape Verde Islands",
    "Casablanca",
    "London, Dublin",
    "Amsterdam, Berlin",
    "Belgrade",
    "Brussels",
    "Madrid",
    "Sarajevo",
    "Berlin",
    "Windhoek",
    "W. Africa Time",
    "Amman, Jordan",
    "Athens",
    "Istanbul",
    "Beirut, Lebanon",
    "Cairo",
    "Helsinki",
    "Jerusalem",
    "Harare",
    "Minsk",
    "Baghdad",
    "Moscow",
    "Kuwait",
    "Nairobi",
    "Tehran",
    "Baku",
    "Tbilisi",
    "Yerevan",
    "Dubai",
    "Kabul",
    "Islamabad, Karachi",
    "Oral",
    "Ekaterinburg",
    "Kolkata",
    "Sri Lanka",
    "Kathmandu",
    "Astana",
    "Yangon",
    "Krasnoyarsk",
    "Bangkok",
    "Jakarta",
    "Beijing",
    "Hong Kong",
    "Irkutsk",
    "Kuala Lumpur",
    "Perth",
    "Taipei",
    "Seoul",
    "Tokyo, Osaka",
    "Yakutsk",
    "Adelaide",
    "Darwin",
    "Brisbane",
    "Hobart",
    "Sydney, Canberra",
    "Vladivostok",
    "Guam",
    "Magadan",
    "Solomon Islands",
    "Auckland",
    "Fiji",
    "Tonga",
];

/// Parallel zone id / label arrays. Either array may be missing when read
/// from an override file, which the ranker rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneResources {
    #[serde(rename = "timezone_values", default)]
    pub values: Option<Vec<String>>,
    #[serde(rename = "timezone_labels", default)]
    pub labels: Option<Vec<String>>,
}

impl TimezoneResources {
    pub fn builtin() -> Self {
        Self {
            values: Some(TIMEZONE_VALUES.iter().map(|s| s.to_string()).collect()),
            labels: Some(TIMEZONE_LABELS.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Override file when configured and readable, built-in arrays otherwise.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|e| {
                crate::logger::log_error(
                    "timezone_resources_error",
                    serde_json::json!({ "path": p.display().to_string(), "error": e.to_string() }),
                );
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }
}

/// Entries (display) and values (stored) of a list preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChoices {
    pub entries: Vec<String>,
    pub values: Vec<String>,
}

impl ListChoices {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs.iter().map(|(e, _)| e.to_string()).collect(),
            values: pairs.iter().map(|(_, v)| v.to_string()).collect(),
        }
    }
}

pub fn snooze_duration_choices() -> ListChoices {
    let minutes = [1, 2, 3, 4, 5, 10, 15, 20, 25, 30];
    ListChoices {
        entries: minutes
            .iter()
            .map(|m| if *m == 1 { "1 minute".to_string() } else { format!("{} minutes", m) })
            .collect(),
        values: minutes.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn snooze_count_choices() -> ListChoices {
    ListChoices::from_pairs(&[
        ("Unlimited", "0"),
        ("1 time", "1"),
        ("2 times", "2"),
        ("3 times", "3"),
        ("5 times", "5"),
        ("10 times", "10"),
    ])
}

pub fn auto_silence_choices() -> ListChoices {
    ListChoices::from_pairs(&[
        ("5 minutes", "5"),
        ("10 minutes", "10"),
        ("15 minutes", "15"),
        ("20 minutes", "20"),
        ("25 minutes", "25"),
        ("30 minutes", "30"),
        ("Never", "-1"),
    ])
}

pub fn clock_style_choices() -> ListChoices {
    ListChoices::from_pairs(&[("Analog", "analog"), ("Digital", "digital")])
}

pub fn volume_button_choices() -> ListChoices {
    ListChoices::from_pairs(&[("None", ALARM_NO_ACTION), ("Snooze", ALARM_SNOOZE), ("Dismiss", ALARM_DISMISS)])
}

/// Shared by flip and shake actions.
pub fn alarm_action_choices() -> ListChoices {
    ListChoices::from_pairs(&[("Do nothing", ALARM_NO_ACTION), ("Snooze", ALARM_SNOOZE), ("Dismiss", ALARM_DISMISS)])
}

pub fn volume_increase_speed_choices() -> ListChoices {
    ListChoices::from_pairs(&[
        ("Off", "0"),
        ("Fast (10 seconds)", "10"),
        ("Medium (30 seconds)", "30"),
        ("Slow (60 seconds)", "60"),
        ("Very slow (120 seconds)", "120"),
    ])
}

pub fn audio_stream_choices() -> ListChoices {
    ListChoices::from_pairs(&[("Alarm", "4"), ("Media", "3"), ("Notification", "5")])
}

pub fn pre_alarm_notification_time_choices() -> ListChoices {
    ListChoices::from_pairs(&[
        ("15 minutes", "15"),
        ("30 minutes", "30"),
        ("1 hour", "60"),
        ("2 hours", "120"),
    ])
}

pub fn color_theme_choices() -> ListChoices {
    ListChoices::from_pairs(&[("Dark", "0"), ("Light", "1"), ("Blue", "2"), ("Green", "3")])
}

/// Week start entries: a locale default at index 0, then Sunday..Saturday.
pub fn weekdays() -> Vec<String> {
    let mut days = vec![DEFAULT_WEEK_START.to_string()];
    let mut day = Weekday::Sun;
    for _ in 0..7 {
        days.push(weekday_name(day).to_string());
        day = day.succ();
    }
    days
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn week_start_choices() -> ListChoices {
    let entries = weekdays();
    let values = (0..entries.len()).map(|i| i.to_string()).collect();
    ListChoices { entries, values }
}
