//! Plain-text table rendering for `waitlist list`.

use waitlist_core::entry::WaitlistEntry;

const HEADERS: [&str; 5] = ["ID", "Name", "Country", "Email", "Created At"];

/// Render `entries` as a left-aligned, space-padded table followed by a
/// count line.
pub fn render(entries: &[WaitlistEntry]) -> String {
  let rows: Vec<[String; 5]> = entries
    .iter()
    .map(|e| {
      [
        e.id.to_string(),
        e.name.clone(),
        e.country.clone(),
        e.email.clone(),
        e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
      ]
    })
    .collect();

  let mut widths = HEADERS.map(|h| h.chars().count());
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_line(&mut out, &HEADERS.map(str::to_owned), &widths);
  push_line(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
  for row in &rows {
    push_line(&mut out, row, &widths);
  }
  let noun = if entries.len() == 1 { "entry" } else { "entries" };
  out.push_str(&format!("{} {noun}\n", entries.len()));
  out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(cell, &w)| format!("{cell:<w$}"))
    .collect::<Vec<_>>()
    .join("  ");
  out.push_str(line.trim_end());
  out.push('\n');
}
