//! Error type for `waitlist-store-sqlite`.

use std::time::Duration;

use rusqlite::ErrorCode;
use thiserror::Error;
use waitlist_core::store::{FailureKind, StoreFailure};

#[derive(Debug, Error)]
pub enum Error {
  /// Opening the database file or applying the schema failed.
  #[error("failed to open database: {0}")]
  Open(#[source] tokio_rusqlite::Error),

  #[error("timed out after {0:?} establishing database connection")]
  ConnectTimeout(Duration),

  #[error("email already exists: {0}")]
  DuplicateEmail(String),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl StoreFailure for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::Open(_) | Error::ConnectTimeout(_) => FailureKind::Unavailable,
      Error::DuplicateEmail(_) => FailureKind::DuplicateKey,
      Error::Database(e) => classify(e),
      Error::DateParse(_) => FailureKind::Other,
    }
  }
}

/// Returns `true` if `err` is a violation of a `UNIQUE` constraint.
pub(crate) fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

fn classify(err: &tokio_rusqlite::Error) -> FailureKind {
  if is_unique_violation(err) {
    return FailureKind::DuplicateKey;
  }
  match err {
    tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
      FailureKind::Unavailable
    }
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) => {
      match e.code {
        ErrorCode::CannotOpen
        | ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::SystemIoFailure
        | ErrorCode::NotADatabase => FailureKind::Unavailable,
        _ => FailureKind::Other,
      }
    }
    _ => FailureKind::Other,
  }
}
