//! Waitlist entries and submission validation.
//!
//! A [`NewEntry`] can only be built through [`NewEntry::parse`], so every
//! value that reaches a store is already trimmed, lower-cased where required
//! and length-checked.

use std::{fmt, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const NAME_MAX_LEN: usize = 100;
pub const COUNTRY_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned identifier of a waitlist entry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

// ─── Persisted entry ─────────────────────────────────────────────────────────

/// A single signup record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
  pub id:         EntryId,
  pub name:       String,
  pub country:    String,
  pub email:      String,
  pub created_at: DateTime<Utc>,
}

// ─── Validated submission ────────────────────────────────────────────────────

/// A validated, normalised submission ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
  name:    String,
  country: String,
  email:   String,
}

impl NewEntry {
  /// Validate and normalise raw form input.
  ///
  /// Every field must be present and non-empty after trimming. The email is
  /// lower-cased and must match the basic `local@domain.tld` shape.
  pub fn parse(
    name: Option<&str>,
    country: Option<&str>,
    email: Option<&str>,
  ) -> Result<Self> {
    let name    = required(name)?;
    let country = required(country)?;
    let email   = required(email)?;

    if !is_valid_email(email) {
      return Err(Error::InvalidEmail);
    }

    // Lower-casing can grow a string, so the limit applies to the stored form.
    let email = email.to_lowercase();

    check_len("name", name, NAME_MAX_LEN)?;
    check_len("country", country, COUNTRY_MAX_LEN)?;
    check_len("email", &email, EMAIL_MAX_LEN)?;

    Ok(Self {
      name:    name.to_owned(),
      country: country.to_owned(),
      email,
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn country(&self) -> &str { &self.country }

  pub fn email(&self) -> &str { &self.email }
}

/// Returns `true` if `email` has the accepted syntactic shape.
pub fn is_valid_email(email: &str) -> bool { EMAIL_PATTERN.is_match(email.trim()) }

fn required(value: Option<&str>) -> Result<&str> {
  match value.map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v),
    _ => Err(Error::MissingFields),
  }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<()> {
  if value.chars().count() > max {
    return Err(Error::TooLong { field, max });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_trims_and_lowercases() {
    let entry =
      NewEntry::parse(Some("  Ada Lovelace "), Some(" UK "), Some(" Ada@Example.COM "))
        .unwrap();
    assert_eq!(entry.name(), "Ada Lovelace");
    assert_eq!(entry.country(), "UK");
    assert_eq!(entry.email(), "ada@example.com");
  }

  #[test]
  fn missing_or_blank_fields_are_rejected() {
    let cases = [
      (None, Some("UK"), Some("a@b.co")),
      (Some("Ada"), None, Some("a@b.co")),
      (Some("Ada"), Some("UK"), None),
      (Some("   "), Some("UK"), Some("a@b.co")),
      (Some("Ada"), Some(""), Some("a@b.co")),
      (Some("Ada"), Some("UK"), Some("\t")),
    ];
    for (name, country, email) in cases {
      assert_eq!(
        NewEntry::parse(name, country, email),
        Err(Error::MissingFields),
        "{name:?} {country:?} {email:?}",
      );
    }
  }

  #[test]
  fn missing_fields_message() {
    assert_eq!(Error::MissingFields.to_string(), "All fields are required");
  }

  #[test]
  fn malformed_email_is_rejected() {
    let err = NewEntry::parse(Some("Ada"), Some("UK"), Some("not-an-email")).unwrap_err();
    assert_eq!(err, Error::InvalidEmail);
    assert_eq!(err.to_string(), "Invalid email format");
  }

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("user+tag@mail.example.org"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a@@b.co"));
    assert!(!is_valid_email("a b@c.io"));
  }

  #[test]
  fn overlong_fields_are_rejected() {
    let long = "x".repeat(NAME_MAX_LEN + 1);
    assert_eq!(
      NewEntry::parse(Some(&long), Some("UK"), Some("a@b.co")),
      Err(Error::TooLong { field: "name", max: NAME_MAX_LEN }),
    );

    let exact = "x".repeat(COUNTRY_MAX_LEN);
    assert!(NewEntry::parse(Some("Ada"), Some(&exact), Some("a@b.co")).is_ok());

    let email = format!("{}@b.co", "x".repeat(EMAIL_MAX_LEN));
    assert_eq!(
      NewEntry::parse(Some("Ada"), Some("UK"), Some(&email)),
      Err(Error::TooLong { field: "email", max: EMAIL_MAX_LEN }),
    );
  }

  #[test]
  fn email_limit_applies_after_lowercasing() {
    // 255 characters as submitted; `İ` lower-cases to two characters.
    let email = format!("{}@b.co", "\u{130}".repeat(250));
    assert_eq!(email.chars().count(), EMAIL_MAX_LEN);
    assert_eq!(
      NewEntry::parse(Some("Ada"), Some("UK"), Some(&email)),
      Err(Error::TooLong { field: "email", max: EMAIL_MAX_LEN }),
    );

    let fits = format!("{}@b.co", "A".repeat(250));
    let entry = NewEntry::parse(Some("Ada"), Some("UK"), Some(&fits)).unwrap();
    assert_eq!(entry.email().chars().count(), EMAIL_MAX_LEN);
  }

  #[test]
  fn entry_serialises_camel_case() {
    let entry = WaitlistEntry {
      id:         EntryId(7),
      name:       "Ada".into(),
      country:    "UK".into(),
      email:      "ada@example.com".into(),
      created_at: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
        .unwrap()
        .with_timezone(&Utc),
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["createdAt"], "2026-01-02T03:04:05Z");
    assert!(json.get("created_at").is_none());
  }
}
