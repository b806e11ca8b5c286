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

//! Home time zone list: resolves each zone's UTC offset at one shared
//! instant, labels it as `(GMT+H:MM) Name` and orders the list by offset.

use std::sync::Arc;

use chrono::{Offset, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use serde_json::json;
use thiserror::Error;

use crate::logger;
use crate::resources::TimezoneResources;

const MILLIS_PER_MINUTE: i32 = 60_000;
const MILLIS_PER_HOUR: i32 = 60 * MILLIS_PER_MINUTE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("missing timezone array: {0}")]
    MissingArray(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneEntry {
    pub identifier: String,
    pub display_name: String,
    pub utc_offset_millis: i32,
    pub formatted_label: String,
}

impl TimezoneEntry {
    pub fn new(identifier: &str, display_name: &str, reference_ms: i64) -> Self {
        let utc_offset_millis = resolve_offset_millis(identifier, reference_ms);
        Self {
            identifier: identifier.to_string(),
            display_name: display_name.to_string(),
            utc_offset_millis,
            formatted_label: format_gmt_label(utc_offset_millis, display_name),
        }
    }
}

/// Total offset (standard plus DST) of `identifier` at `reference_ms`.
/// Identifiers chrono-tz does not know resolve to 0, like an unknown zone
/// falling back to GMT.
pub fn resolve_offset_millis(identifier: &str, reference_ms: i64) -> i32 {
    let Ok(tz) = identifier.parse::<Tz>() else { return 0 };
    let Some(instant) = Utc.timestamp_millis_opt(reference_ms).single() else { return 0 };
    instant.with_timezone(&tz).offset().fix().local_minus_utc() * 1000
}

pub fn format_gmt_label(offset_millis: i32, display_name: &str) -> String {
    let sign = if offset_millis < 0 { '-' } else { '+' };
    let p = offset_millis.unsigned_abs();
    let hours = p / MILLIS_PER_HOUR as u32;
    let minutes = (p / MILLIS_PER_MINUTE as u32) % 60;
    format!("(GMT{}{}:{:02}) {}", sign, hours, minutes, display_name)
}

/// Rank parallel identifier/name arrays by UTC offset at `reference_ms`.
///
/// Only the common prefix of the two arrays is used; a length mismatch is
/// logged and otherwise ignored. Equal offsets keep their input order.
pub fn rank<S: AsRef<str>>(
    identifiers: Option<&[S]>,
    names: Option<&[S]>,
    reference_ms: i64,
) -> Result<Vec<TimezoneEntry>, TimezoneError> {
    let ids = identifiers.ok_or(TimezoneError::MissingArray("timezone_values"))?;
    let labels = names.ok_or(TimezoneError::MissingArray("timezone_labels"))?;

    if ids.len() != labels.len() {
        logger::log_error(
            "timezone_length_mismatch",
            json!({ "ids": ids.len(), "labels": labels.len() }),
        );
    }

    let mut rows: Vec<TimezoneEntry> = ids
        .iter()
        .zip(labels.iter())
        .map(|(id, name)| TimezoneEntry::new(id.as_ref(), name.as_ref(), reference_ms))
        .collect();
    rows.sort_by_key(|row| row.utc_offset_millis);
    Ok(rows)
}

/// Ranked zone list for one session. Computed on first access, with the
/// reference instant captured at that moment, and reused afterwards.
#[derive(Debug)]
pub struct TimezoneCatalog {
    resources: TimezoneResources,
    ranked: OnceCell<(i64, Arc<[TimezoneEntry]>)>,
}

impl TimezoneCatalog {
    pub fn new(resources: TimezoneResources) -> Self {
        Self { resources, ranked: OnceCell::new() }
    }

    pub fn entries(&self) -> Result<Arc<[TimezoneEntry]>, TimezoneError> {
        self.entries_at(Utc::now().timestamp_millis())
    }

    /// `now_ms` is only used by the call that performs the computation.
    pub fn entries_at(&self, now_ms: i64) -> Result<Arc<[TimezoneEntry]>, TimezoneError> {
        let (_, rows) = self.ranked.get_or_try_init(|| {
            let rows = rank(
                self.resources.values.as_deref(),
                self.resources.labels.as_deref(),
                now_ms,
            )?;
            Ok::<_, TimezoneError>((now_ms, Arc::from(rows)))
        })?;
        Ok(Arc::clone(rows))
    }

    pub fn reference_instant(&self) -> Option<i64> {
        self.ranked.get().map(|(at, _)| *at)
    }
}
