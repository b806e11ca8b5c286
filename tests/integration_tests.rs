/*
 * Integration tests for deskclock-settings
 *
 * These tests drive the public API the way the binary does: a session
 * with a memoized zone catalog, a screen opened from stored preferences,
 * edits, notifications and saving.
 */

use std::fs;
use std::sync::Arc;

use deskclock_settings::config::{
    config_path, save_preferences_to, try_load_preferences, DeviceOptions, PrefValue, SavedPreferences,
};
use deskclock_settings::logger;
use deskclock_settings::notify::{EventQueue, SettingsEvent};
use deskclock_settings::resources::{weekdays, TimezoneResources, TIMEZONE_LABELS, TIMEZONE_VALUES};
use deskclock_settings::ringtone::{DirRingtoneLookup, NoRingtones};
use deskclock_settings::screen::Session;
use deskclock_settings::sensors::{FixedSensors, SensorAvailability, SysfsSensorProbe};
use deskclock_settings::settings::{PreferenceKind, SettingKey, SettingsError};
use deskclock_settings::timezones::{rank, TimezoneCatalog, TimezoneError};
use serial_test::serial;

/// 2024-01-15T12:00:00Z
const WINTER_MS: i64 = 1_705_320_000_000;
/// 2024-07-15T12:00:00Z
const SUMMER_MS: i64 = 1_721_044_800_000;

fn all_sensors() -> FixedSensors {
    FixedSensors(SensorAvailability { accelerometer: true, orientation: true })
}

fn session_at(reference_ms: i64) -> Session {
    let catalog = TimezoneCatalog::new(TimezoneResources::builtin());
    catalog.entries_at(reference_ms).unwrap();
    Session::with_parts(DeviceOptions::default(), catalog, Arc::new(NoRingtones))
}

#[test]
fn test_builtin_zones_rank_ascending_with_labels() {
    let rows = rank(Some(TIMEZONE_VALUES), Some(TIMEZONE_LABELS), WINTER_MS).unwrap();
    assert_eq!(rows.len(), TIMEZONE_VALUES.len());
    assert!(rows.windows(2).all(|w| w[0].utc_offset_millis <= w[1].utc_offset_millis));
    for row in &rows {
        assert!(row.formatted_label.starts_with("(GMT"));
        assert!(row.formatted_label.ends_with(&row.display_name));
    }
}

#[test]
fn test_dst_moves_london_after_utc() {
    let ids = ["Europe/London", "Asia/Kolkata", "UTC"];
    let names = ["London", "Kolkata", "UTC"];

    let winter: Vec<_> = rank(Some(&ids[..]), Some(&names[..]), WINTER_MS)
        .unwrap()
        .into_iter()
        .map(|r| r.identifier)
        .collect();
    assert_eq!(winter, vec!["Europe/London", "UTC", "Asia/Kolkata"]);

    let summer = rank(Some(&ids[..]), Some(&names[..]), SUMMER_MS).unwrap();
    assert_eq!(summer[0].identifier, "UTC");
    assert_eq!(summer[1].formatted_label, "(GMT+1:00) London");
    assert_eq!(summer[2].formatted_label, "(GMT+5:30) Kolkata");
}

#[test]
fn test_missing_array_is_reported() {
    let ids = ["UTC"];
    assert_eq!(
        rank(Some(&ids[..]), None, WINTER_MS),
        Err(TimezoneError::MissingArray("timezone_labels"))
    );
}

#[test]
fn test_timezone_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");
    fs::write(
        &path,
        r#"{ "timezone_values": ["Asia/Tokyo", "America/New_York"], "timezone_labels": ["Tokyo", "New York"] }"#,
    )
    .unwrap();

    let session = Session::new(DeviceOptions { timezones_file: Some(path), ..Default::default() });
    let zones = session.catalog().entries_at(WINTER_MS).unwrap();
    let labels: Vec<&str> = zones.iter().map(|z| z.formatted_label.as_str()).collect();
    assert_eq!(labels, vec!["(GMT-5:00) New York", "(GMT+9:00) Tokyo"]);
}

#[test]
fn test_override_without_labels_fails_screen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");
    fs::write(&path, r#"{ "timezone_values": ["UTC"] }"#).unwrap();

    let session = Session::new(DeviceOptions { timezones_file: Some(path), ..Default::default() });
    let err = session.open_screen(SavedPreferences::default(), &all_sensors()).err();
    assert_eq!(err, Some(SettingsError::Timezone(TimezoneError::MissingArray("timezone_labels"))));
}

#[test]
fn test_screen_edits_persist_and_notify() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut session = session_at(WINTER_MS);
    let queue = Arc::new(EventQueue::new());
    session.subscribe(queue.clone());

    let mut screen = session.open_screen(SavedPreferences::default(), &all_sensors()).unwrap();
    screen.on_preference_change(SettingKey::HomeTimeZone, "Asia/Tokyo".into()).unwrap();
    screen.on_preference_change(SettingKey::ColorTheme, "2".into()).unwrap();
    screen.on_preference_change(SettingKey::SnoozeDuration, "20".into()).unwrap();
    screen.on_preference_change(SettingKey::AutoSilence, "-1".into()).unwrap();

    assert_eq!(
        queue.drain(),
        vec![SettingsEvent::WorldClockUpdate, SettingsEvent::ColorThemeUpdate]
    );
    assert_eq!(screen.row(SettingKey::HomeTimeZone).unwrap().summary, "(GMT+9:00) Tokyo");
    assert_eq!(screen.row(SettingKey::AutoSilence).unwrap().summary, "Never");

    save_preferences_to(&path, screen.preferences()).unwrap();
    let loaded = try_load_preferences(&path).unwrap();
    assert_eq!(loaded.home_time_zone, "Asia/Tokyo");
    assert_eq!(loaded.color_theme, "2");
    assert_eq!(loaded.snooze_duration_new, "20");
    assert_eq!(loaded.auto_silence, "-1");

    // reopening from the saved file restores the summaries
    let reopened = session.open_screen(loaded, &all_sensors()).unwrap();
    assert_eq!(reopened.row(SettingKey::ColorTheme).unwrap().summary, "Blue");
    assert_eq!(reopened.row(SettingKey::SnoozeDuration).unwrap().summary, "20 minutes");
}

#[test]
fn test_week_start_row_uses_weekdays() {
    let session = session_at(WINTER_MS);
    let screen = session.open_screen(SavedPreferences::default(), &all_sensors()).unwrap();
    match &screen.row(SettingKey::WeekStart).unwrap().kind {
        PreferenceKind::List { entries, .. } => assert_eq!(entries, &weekdays()),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_sysfs_probe_drives_sensor_rows() {
    let root = tempfile::tempdir().unwrap();
    let dev = root.path().join("sys/bus/iio/devices/iio:device0");
    fs::create_dir_all(&dev).unwrap();
    fs::write(dev.join("in_accel_x_raw"), "12\n").unwrap();

    let session = session_at(WINTER_MS);
    let screen = session
        .open_screen(SavedPreferences::default(), &SysfsSensorProbe::with_root(root.path()))
        .unwrap();
    assert!(screen.is_shown(SettingKey::ShakeAction));
    assert!(!screen.is_shown(SettingKey::FlipAction));
}

#[test]
fn test_timer_alarm_summary_from_tone_directory() {
    let tones = tempfile::tempdir().unwrap();
    fs::write(tones.path().join("gentle_morning.ogg"), b"x").unwrap();
    fs::write(tones.path().join("zz-bell.wav"), b"x").unwrap();

    let catalog = TimezoneCatalog::new(TimezoneResources::builtin());
    let session = Session::with_parts(
        DeviceOptions::default(),
        catalog,
        Arc::new(DirRingtoneLookup::new(tones.path())),
    );
    let mut screen = session.open_screen(SavedPreferences::default(), &all_sensors()).unwrap();
    screen.on_resume();
    screen.finish_background();
    assert_eq!(screen.row(SettingKey::TimerAlarm).unwrap().summary, "gentle morning");

    let bell = tones.path().join("zz-bell.wav").display().to_string();
    screen.on_preference_change(SettingKey::TimerAlarm, PrefValue::Text(bell)).unwrap();
    assert_eq!(screen.row(SettingKey::TimerAlarm).unwrap().summary, "zz bell");

    screen.on_preference_change(SettingKey::TimerAlarm, "".into()).unwrap();
    screen.on_preference_change(SettingKey::TimerAlarmCustom, true.into()).unwrap();
    assert!(screen.on_preference_click(SettingKey::TimerAlarmCustom));
    assert_eq!(screen.row(SettingKey::TimerAlarm).unwrap().summary, "Silent");
}

#[test]
#[serial]
fn test_config_path_follows_xdg() {
    std::env::set_var("XDG_CONFIG_HOME", "/tmp/deskclock-xdg");
    assert_eq!(
        config_path(),
        std::path::PathBuf::from("/tmp/deskclock-xdg/deskclock/settings.json")
    );
    std::env::remove_var("XDG_CONFIG_HOME");
}

#[test]
#[serial]
fn test_logging_records_preference_changes() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs.json");
    logger::init_logging_at(&log);

    let session = session_at(WINTER_MS);
    let mut screen = session.open_screen(SavedPreferences::default(), &all_sensors()).unwrap();
    screen.on_preference_change(SettingKey::KeepScreenOn, true.into()).unwrap();

    let content = fs::read_to_string(&log).unwrap();
    let line = content
        .lines()
        .find(|l| l.contains("\"preference_change\"") && l.contains("keep_screen_on"))
        .expect("change was logged");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["data"]["key"], "keep_screen_on");
    assert_eq!(value["data"]["value"], true);
}
