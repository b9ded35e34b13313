//! CSV rendering of waitlist entries for the admin export.

use chrono::{NaiveDate, SecondsFormat};

use crate::entry::WaitlistEntry;

pub const CSV_HEADER: &str = "ID,Name,Country,Email,Created At";

/// Render `entries` as CSV, in the order given.
///
/// Every field is double-quoted with embedded quotes doubled. Rows are
/// joined by `\n` with no trailing newline; an empty slice yields only the
/// header line.
pub fn to_csv(entries: &[WaitlistEntry]) -> String {
  let mut out = String::from(CSV_HEADER);
  for e in entries {
    let created_at = e.created_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let row = [
      quote(&e.id.to_string()),
      quote(&e.name),
      quote(&e.country),
      quote(&e.email),
      quote(&created_at),
    ]
    .join(",");
    out.push('\n');
    out.push_str(&row);
  }
  out
}

/// Download filename for an export taken on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
  format!("waitlist_entries_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String { format!("\"{}\"", field.replace('"', "\"\"")) }

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::entry::EntryId;

  fn entry(id: i64, name: &str) -> WaitlistEntry {
    WaitlistEntry {
      id:         EntryId(id),
      name:       name.into(),
      country:    "Portugal".into(),
      email:      format!("{id}@example.com"),
      created_at: Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap(),
    }
  }

  #[test]
  fn empty_export_is_header_only() {
    assert_eq!(to_csv(&[]), CSV_HEADER);
  }

  #[test]
  fn rows_are_quoted_in_order() {
    let csv = to_csv(&[entry(2, "Bea"), entry(1, "Al")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
      lines[1],
      r#""2","Bea","Portugal","2@example.com","2026-03-04T05:06:07Z""#
    );
    assert!(lines[2].starts_with(r#""1","Al""#));
    assert!(!csv.ends_with('\n'));
  }

  #[test]
  fn embedded_quotes_and_commas_are_escaped() {
    let csv = to_csv(&[entry(1, r#"Jo "JJ", Jr"#)]);
    assert!(csv.contains(r#""Jo ""JJ"", Jr""#), "{csv}");
  }

  #[test]
  fn filename_includes_date() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(csv_filename(date), "waitlist_entries_2026-10-19.csv");
  }
}
