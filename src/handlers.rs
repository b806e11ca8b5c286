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

use serde_json::json;

use crate::app::{App, DEFAULT_STATUS};
use crate::config::{save_preferences_to, PrefValue};
use crate::logger;
use crate::resources::RINGTONE_SILENT;
use crate::settings::{PreferenceKind, SettingKey, SettingsError};

pub fn move_up(app: &mut App) {
    if app.selected > 0 {
        app.selected -= 1;
    }
}

pub fn move_down(app: &mut App) {
    if app.selected + 1 < app.visible_keys().len() {
        app.selected += 1;
    }
}

pub fn move_first(app: &mut App) { app.selected = 0; }

pub fn move_last(app: &mut App) {
    app.selected = app.visible_keys().len().saturating_sub(1);
}

/// Enter/Space on the selected row: open a picker or flip a checkbox.
pub fn activate_selected(app: &mut App) {
    let Some(row) = app.selected_row().cloned() else { return };
    if !row.enabled {
        app.status = format!("{} is disabled", row.title);
        return;
    }
    match row.kind {
        PreferenceKind::List { values, value, .. } => {
            app.list_popup_key = Some(row.key);
            app.list_popup_idx = values.iter().position(|v| *v == value).unwrap_or(0);
            app.show_list_popup = true;
        }
        PreferenceKind::CheckBox { checked } => {
            if apply_change(app, row.key, PrefValue::Bool(!checked)) {
                app.screen.on_preference_click(row.key);
            }
        }
        PreferenceKind::Ringtone { value } => start_ringtone_picker(app, &value),
        PreferenceKind::Info => {}
    }
}

/// Route a change through the screen; errors become a warning popup.
pub fn apply_change(app: &mut App, key: SettingKey, value: PrefValue) -> bool {
    match app.screen.on_preference_change(key, value) {
        Ok(_) => {
            if let Some(row) = app.screen.row(key) {
                app.status = format!("{}: {}", row.title, display_value(&row.kind, &row.summary));
            }
            true
        }
        Err(e) => {
            report_error(app, &e);
            false
        }
    }
}

fn display_value(kind: &PreferenceKind, summary: &str) -> String {
    match kind {
        PreferenceKind::CheckBox { checked } => if *checked { "on" } else { "off" }.to_string(),
        _ => summary.to_string(),
    }
}

fn report_error(app: &mut App, err: &SettingsError) {
    logger::log_error("preference_change_error", json!({ "error": err.to_string() }));
    app.show_warning(err.to_string());
}

// ===== List picker popup =====
pub fn list_popup_len(app: &App) -> usize {
    app.list_popup_key
        .and_then(|k| app.screen.row(k))
        .map(|row| match &row.kind {
            PreferenceKind::List { values, .. } => values.len(),
            _ => 0,
        })
        .unwrap_or(0)
}

pub fn list_popup_move(app: &mut App, delta: i32) {
    let len = list_popup_len(app);
    if len == 0 { return; }
    let next = (app.list_popup_idx as i64 + delta as i64).clamp(0, len as i64 - 1);
    app.list_popup_idx = next as usize;
}

pub fn apply_list_popup(app: &mut App) {
    let Some(key) = app.list_popup_key else {
        cancel_list_popup(app);
        return;
    };
    let chosen = app.screen.row(key).and_then(|row| match &row.kind {
        PreferenceKind::List { values, .. } => values.get(app.list_popup_idx).cloned(),
        _ => None,
    });
    cancel_list_popup(app);
    if let Some(v) = chosen {
        apply_change(app, key, PrefValue::Text(v));
    }
}

pub fn cancel_list_popup(app: &mut App) {
    app.show_list_popup = false;
    app.list_popup_key = None;
    app.list_popup_idx = 0;
}

// ===== Ringtone picker popup =====
pub fn start_ringtone_picker(app: &mut App, current: &str) {
    // an empty reference means no tone once a custom tone is in use
    let empty_label = if app.screen.preferences().timer_alarm_custom { RINGTONE_SILENT } else { "Default" };
    let mut choices = vec![(String::new(), empty_label.to_string())];
    choices.extend(app.screen.ringtones().available());
    app.ringtone_idx = choices.iter().position(|(uri, _)| uri == current).unwrap_or(0);
    app.ringtone_choices = choices;
    app.show_ringtone_popup = true;
}

pub fn ringtone_popup_move(app: &mut App, delta: i32) {
    if app.ringtone_choices.is_empty() { return; }
    let last = app.ringtone_choices.len() as i64 - 1;
    app.ringtone_idx = (app.ringtone_idx as i64 + delta as i64).clamp(0, last) as usize;
}

pub fn apply_ringtone_popup(app: &mut App) {
    let chosen = app.ringtone_choices.get(app.ringtone_idx).map(|(uri, _)| uri.clone());
    cancel_ringtone_popup(app);
    if let Some(uri) = chosen {
        apply_change(app, SettingKey::TimerAlarm, PrefValue::Text(uri));
    }
}

pub fn cancel_ringtone_popup(app: &mut App) {
    app.show_ringtone_popup = false;
    app.ringtone_choices.clear();
    app.ringtone_idx = 0;
}

// ===== Saving and quitting =====
pub fn save_preferences(app: &mut App) {
    match save_preferences_to(&app.prefs_path, app.screen.preferences()) {
        Ok(()) => {
            app.screen.mark_saved();
            app.status = format!("Saved to {}", app.prefs_path.display());
            logger::log_event("preferences_saved", json!({ "path": app.prefs_path.display().to_string() }));
        }
        Err(e) => {
            logger::log_error("preferences_save_error", json!({ "error": e.to_string() }));
            app.show_warning(format!("Failed to save: {}", e));
        }
    }
}

/// Returns true when the app may exit right away.
pub fn request_quit(app: &mut App) -> bool {
    if app.screen.is_dirty() {
        app.show_confirm_quit_popup = true;
        app.status = "Unsaved changes: Enter save and quit | d discard | Esc cancel".to_string();
        return false;
    }
    true
}

/// Save, then quit only if the save went through.
pub fn confirm_quit_save(app: &mut App) -> bool {
    app.show_confirm_quit_popup = false;
    save_preferences(app);
    !app.screen.is_dirty()
}

pub fn cancel_quit(app: &mut App) {
    app.show_confirm_quit_popup = false;
    app.status = DEFAULT_STATUS.to_string();
}

pub fn dismiss_warning(app: &mut App) {
    app.show_warning_popup = false;
    app.warning_message.clear();
}
