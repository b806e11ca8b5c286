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

//! deskclock-settings - alarm clock settings screen for the terminal
//!
//! This library provides the settings model of a desk clock: the ranked
//! home time zone list, preference rows with their summaries, change
//! notifications and preference storage.

pub mod app;
pub mod config;
pub mod events;
pub mod handlers;
pub mod logger;
pub mod notify;
pub mod resources;
pub mod ringtone;
pub mod screen;
pub mod sensors;
pub mod settings;
pub mod timezones;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
