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

mod ui_components;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;
use crate::settings::{Preference, PreferenceKind};

pub use ui_components::{centered_rect, Palette};
use ui_components::{render_confirm_quit_popup, render_list_popup, render_ringtone_popup, render_warning_popup};

fn row_line(row: &Preference, palette: Palette) -> Line<'static> {
    let base = if row.enabled {
        Style::default().fg(palette.text)
    } else {
        Style::default().fg(palette.muted).add_modifier(Modifier::DIM)
    };
    let value = match &row.kind {
        PreferenceKind::CheckBox { checked } => if *checked { "[x]" } else { "[ ]" }.to_string(),
        _ => row.summary.clone(),
    };
    Line::from(vec![
        Span::styled(format!("    {: <34}", row.title), base),
        Span::styled(value, base.fg(if row.enabled { palette.accent } else { palette.muted })),
    ])
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let palette = Palette::for_theme(&app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(size);

    // Header
    let sensors = app.screen.sensors();
    let header_text = format!(
        "Alarm clock settings  |  accelerometer: {}  orientation: {}{}",
        if sensors.accelerometer { "yes" } else { "no" },
        if sensors.orientation { "yes" } else { "no" },
        if app.screen.is_dirty() { "  |  modified" } else { "" },
    );
    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" deskclock-settings "),
    );
    f.render_widget(header, chunks[0]);

    // Rows grouped under category headers; headers are not selectable
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = None;
    let mut row_idx = 0usize;
    for cat in app.screen.categories() {
        items.push(ListItem::new(Line::from(Span::styled(
            cat.id.title().to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ))));
        for row in &cat.rows {
            if row_idx == app.selected {
                selected_item = Some(items.len());
            }
            items.push(ListItem::new(row_line(row, palette)));
            row_idx += 1;
        }
    }

    let mut state = ListState::default();
    state.select(selected_item);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Settings ")
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(Style::default().bg(palette.highlight_bg));
    f.render_stateful_widget(list, chunks[1], &mut state);

    // Footer
    let footer = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(footer, chunks[2]);

    if app.show_list_popup {
        render_list_popup(f, app, size, palette);
    }
    if app.show_ringtone_popup {
        render_ringtone_popup(f, app, size, palette);
    }
    if app.show_confirm_quit_popup {
        render_confirm_quit_popup(f, size, palette);
    }
    if app.show_warning_popup {
        render_warning_popup(f, app, size);
    }
}
