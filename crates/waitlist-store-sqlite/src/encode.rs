//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that lexical
//! order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use waitlist_core::entry::{EntryId, WaitlistEntry};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `waitlist` row as read from SQLite, before timestamp decoding.
pub struct RawEntry {
  pub id:         i64,
  pub name:       String,
  pub country:    String,
  pub email:      String,
  pub created_at: String,
}

impl RawEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      country:    row.get(2)?,
      email:      row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_entry(self) -> Result<WaitlistEntry> {
    Ok(WaitlistEntry {
      id:         EntryId(self.id),
      name:       self.name,
      country:    self.country,
      email:      self.email,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
