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

use std::io::stdout;
use std::path::Path;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;

use deskclock_settings::app::App;
use deskclock_settings::config::{
    config_path, load_device_options, try_load_preferences, ConfigError, PrefValue, SavedPreferences,
};
use deskclock_settings::events::handle_key_event;
use deskclock_settings::logger;
use deskclock_settings::notify::{EventLogListener, EventQueue};
use deskclock_settings::screen::Session;
use deskclock_settings::sensors::{FixedSensors, SensorAvailability, SysfsSensorProbe};
use deskclock_settings::settings::SettingKey;
use deskclock_settings::ui::ui;

/// Stored preferences; a missing file means defaults, a broken one is
/// reported and replaced by defaults.
fn load_preferences(path: &Path) -> (SavedPreferences, Option<String>) {
    match try_load_preferences(path) {
        Ok(p) => (p, None),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => (SavedPreferences::default(), None),
        Err(e) => {
            logger::log_error("preferences_load_error", serde_json::json!({
                "path": path.display().to_string(),
                "error": e.to_string(),
            }));
            (SavedPreferences::default(), Some(format!("Ignored {}: {}", path.display(), e)))
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Gather args once
    let args: Vec<String> = std::env::args().collect();

    let logging_enabled = args.iter().any(|a| a == "--logging");
    if logging_enabled {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({
            "mode": "cli",
            "args": args,
        }));
    }

    let options = load_device_options();
    let prefs_path = config_path();
    let mut session = Session::new(options);

    // `deskclock-settings timezones`: ranked home zone list, one per line
    if args.get(1).map(|s| s.as_str()) == Some("timezones") {
        for zone in session.catalog().entries()?.iter() {
            println!("{}\t{}", zone.identifier, zone.formatted_label);
        }
        return Ok(());
    }

    // `deskclock-settings get <key>`
    if args.get(1).map(|s| s.as_str()) == Some("get") {
        let Some(name) = args.get(2) else {
            eprintln!("usage: deskclock-settings get <key>");
            std::process::exit(2);
        };
        let key: SettingKey = match name.parse() {
            Ok(k) => k,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        let (prefs, warning) = load_preferences(&prefs_path);
        if let Some(w) = warning {
            eprintln!("{}", w);
        }
        match prefs.value(key) {
            Some(PrefValue::Text(s)) => println!("{}", s),
            Some(PrefValue::Bool(b)) => println!("{}", b),
            None => {
                eprintln!("{} is not a stored setting", key);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Sensor presence, narrowed by --no-accel / --no-orientation
    let probe = match &session.options.sensor_root {
        Some(root) => SysfsSensorProbe::with_root(root),
        None => SysfsSensorProbe::new(),
    };
    let mut sensors = SensorAvailability::query(&probe);
    if args.iter().any(|a| a == "--no-accel") {
        sensors.accelerometer = false;
    }
    if args.iter().any(|a| a == "--no-orientation") {
        sensors.orientation = false;
    }

    let events = Arc::new(EventQueue::new());
    session.subscribe(events.clone());
    if logging_enabled {
        session.subscribe(Arc::new(EventLogListener));
    }

    let (prefs, warning) = load_preferences(&prefs_path);
    let mut screen = session.open_screen(prefs, &FixedSensors(sensors))?;
    screen.on_resume();
    let mut app = App::new(screen, events, prefs_path);
    if let Some(w) = warning {
        app.show_warning(w);
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if logging_enabled {
        logger::log_event("tui_start", serde_json::json!({ "sensors": {
            "accelerometer": sensors.accelerometer,
            "orientation": sensors.orientation,
        }}));
    }
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
        if logging_enabled {
            logger::log_event("fatal_error", serde_json::json!({ "error": err.to_string() }));
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app.refresh_interval.saturating_sub(app.last_refresh.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(app, key_event)? {
                    return Ok(());
                }
            }
        }

        if app.last_refresh.elapsed() >= app.refresh_interval {
            app.refresh();
        }
    }
}
