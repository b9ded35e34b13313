//! Error types for `waitlist-core`.

use thiserror::Error;

/// A submission that failed validation.
///
/// The `Display` text is user-facing; it is returned verbatim in the
/// `{"error": ...}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("All fields are required")]
  MissingFields,

  #[error("Invalid email format")]
  InvalidEmail,

  #[error("{field} must be at most {max} characters")]
  TooLong { field: &'static str, max: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
