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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::handlers::*;

/// Main event handler. Returns true when the app should exit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // Popups first (highest priority)
    if let Some(quit) = handle_popup_events(app, code)? {
        return Ok(quit);
    }

    handle_global_events(app, code)
}

/// `Some(quit)` when a popup consumed the key.
fn handle_popup_events(app: &mut App, code: KeyCode) -> anyhow::Result<Option<bool>> {
    if app.show_warning_popup {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            dismiss_warning(app);
        }
        return Ok(Some(false));
    }

    if app.show_confirm_quit_popup {
        let quit = match code {
            KeyCode::Enter => confirm_quit_save(app),
            KeyCode::Char('d') => true,
            KeyCode::Esc => {
                cancel_quit(app);
                false
            }
            _ => false,
        };
        return Ok(Some(quit));
    }

    if app.show_list_popup {
        match code {
            KeyCode::Esc => cancel_list_popup(app),
            KeyCode::Enter | KeyCode::Char(' ') => apply_list_popup(app),
            KeyCode::Up | KeyCode::Char('k') => list_popup_move(app, -1),
            KeyCode::Down | KeyCode::Char('j') => list_popup_move(app, 1),
            KeyCode::PageUp => list_popup_move(app, -10),
            KeyCode::PageDown => list_popup_move(app, 10),
            _ => {}
        }
        return Ok(Some(false));
    }

    if app.show_ringtone_popup {
        match code {
            KeyCode::Esc => cancel_ringtone_popup(app),
            KeyCode::Enter | KeyCode::Char(' ') => apply_ringtone_popup(app),
            KeyCode::Up | KeyCode::Char('k') => ringtone_popup_move(app, -1),
            KeyCode::Down | KeyCode::Char('j') => ringtone_popup_move(app, 1),
            _ => {}
        }
        return Ok(Some(false));
    }

    Ok(None)
}

fn handle_global_events(app: &mut App, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(request_quit(app)),
        KeyCode::Up | KeyCode::Char('k') => move_up(app),
        KeyCode::Down | KeyCode::Char('j') => move_down(app),
        KeyCode::Home | KeyCode::Char('g') => move_first(app),
        KeyCode::End | KeyCode::Char('G') => move_last(app),
        KeyCode::Enter | KeyCode::Char(' ') => activate_selected(app),
        KeyCode::Char('s') => save_preferences(app),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingKey;
    use crate::test_utils::test_utils::*;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_quit_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        app.show_list_popup = true;
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut app, ev).unwrap());
    }

    #[test]
    fn test_popup_swallows_quit_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        // first row is the clock style list
        assert!(!press(&mut app, KeyCode::Enter));
        assert!(app.show_list_popup);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.show_list_popup);
    }

    #[test]
    fn test_dirty_quit_discard() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_mock_app(dir.path());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen.preferences().clock_style, "analog");
        assert_eq!(app.selected_key(), Some(SettingKey::ClockStyle));

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.show_confirm_quit_popup);
        assert!(press(&mut app, KeyCode::Char('d')));
        assert!(!app.prefs_path.exists());
    }
}
