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

use ratatui::layout::Rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::settings::PreferenceKind;

/// Colors derived from the color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub highlight_bg: Color,
}

impl Palette {
    /// "0" dark, "1" light, "2" blue, "3" green; anything else is dark.
    pub fn for_theme(value: &str) -> Self {
        match value {
            "1" => Self { accent: Color::Blue, text: Color::Black, muted: Color::DarkGray, highlight_bg: Color::Gray },
            "2" => Self { accent: Color::LightBlue, text: Color::White, muted: Color::Gray, highlight_bg: Color::Blue },
            "3" => Self { accent: Color::LightGreen, text: Color::White, muted: Color::Gray, highlight_bg: Color::Green },
            _ => Self { accent: Color::Cyan, text: Color::White, muted: Color::Gray, highlight_bg: Color::DarkGray },
        }
    }
}

/// Helper function to create a centered rectangle for popups
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_picker(f: &mut Frame, size: Rect, title: &str, items: Vec<ListItem>, selected: usize, palette: Palette) {
    let area = centered_rect(60, 60, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(selected.min(items.len() - 1)));
    }
    let list = List::new(items)
        .highlight_style(Style::default().bg(palette.highlight_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    let help = Paragraph::new("↑/↓ select  |  Enter apply  |  Esc cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted));
    f.render_widget(help, chunks[1]);
}

/// Choices of the list row being edited; the stored value is marked.
pub fn render_list_popup(f: &mut Frame, app: &App, size: Rect, palette: Palette) {
    let Some(row) = app.list_popup_key.and_then(|k| app.screen.row(k)) else { return };
    let PreferenceKind::List { entries, values, value } = &row.kind else { return };
    let items: Vec<ListItem> = entries
        .iter()
        .zip(values.iter())
        .map(|(entry, v)| {
            let mark = if v == value { "(•) " } else { "( ) " };
            ListItem::new(format!("{}{}", mark, entry))
        })
        .collect();
    render_picker(f, size, &row.title, items, app.list_popup_idx, palette);
}

pub fn render_ringtone_popup(f: &mut Frame, app: &App, size: Rect, palette: Palette) {
    let items: Vec<ListItem> = app
        .ringtone_choices
        .iter()
        .map(|(_, title)| ListItem::new(title.clone()))
        .collect();
    render_picker(f, size, "Timer alarm", items, app.ringtone_idx, palette);
}

fn render_message_popup(f: &mut Frame, size: Rect, title: &str, message: &str, help: &str, border: Color) {
    let popup_area = centered_rect(50, 30, size);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let body = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(body, chunks[0]);

    let instructions = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(instructions, chunks[1]);
}

pub fn render_warning_popup(f: &mut Frame, app: &App, size: Rect) {
    render_message_popup(f, size, "Warning", &app.warning_message, "Press Enter to dismiss", Color::Yellow);
}

pub fn render_confirm_quit_popup(f: &mut Frame, size: Rect, palette: Palette) {
    render_message_popup(
        f,
        size,
        "Unsaved changes",
        "Save preferences before leaving?",
        "Enter save and quit, d discard, Esc cancel",
        palette.accent,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_for_theme() {
        assert_eq!(Palette::for_theme("0").accent, Color::Cyan);
        assert_eq!(Palette::for_theme("1").text, Color::Black);
        assert_eq!(Palette::for_theme("bogus"), Palette::for_theme("0"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let r = centered_rect(50, 50, outer);
        assert_eq!(r.width, 50);
        assert_eq!(r.height, 20);
        assert_eq!(r.x, 25);
        assert_eq!(r.y, 10);
    }
}
