//! [`WaitlistService`] — request validation and store-error classification.
//!
//! Transport-agnostic: the axum handlers in [`crate::join`] are thin wrappers
//! around these methods.

use std::sync::Arc;

use serde::Deserialize;
use waitlist_core::{
  entry::{EntryId, NewEntry, WaitlistEntry},
  export,
  store::WaitlistStore,
};

use crate::error::ApiError;

/// Raw signup payload. Every field is optional so that absence is reported
/// as a validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinRequest {
  pub name:    Option<String>,
  pub country: Option<String>,
  pub email:   Option<String>,
}

/// All entries, newest first, with their count.
#[derive(Debug, Clone)]
pub struct Listing {
  pub entries: Vec<WaitlistEntry>,
  pub count:   usize,
}

pub struct WaitlistService<S> {
  store: Arc<S>,
}

impl<S: WaitlistStore> WaitlistService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate `req` and insert it. No write happens if validation fails.
  pub async fn create(&self, req: JoinRequest) -> Result<EntryId, ApiError> {
    let entry = NewEntry::parse(
      req.name.as_deref(),
      req.country.as_deref(),
      req.email.as_deref(),
    )?;

    let id = self.store.insert(entry).await.map_err(ApiError::from_store)?;
    tracing::info!(%id, "waitlist entry created");
    Ok(id)
  }

  pub async fn list(&self) -> Result<Listing, ApiError> {
    let entries = self.store.list_all().await.map_err(ApiError::from_store)?;
    let count = entries.len();
    tracing::info!(count, "listed waitlist entries");
    Ok(Listing { entries, count })
  }

  /// The full listing rendered as CSV.
  pub async fn export_csv(&self) -> Result<String, ApiError> {
    let listing = self.list().await?;
    Ok(export::to_csv(&listing.entries))
  }
}

#[cfg(test)]
mod tests {
  use std::fmt;

  use waitlist_core::store::{FailureKind, StoreFailure};
  use waitlist_store_sqlite::SqliteStore;

  use super::*;

  fn service() -> WaitlistService<SqliteStore> {
    WaitlistService::new(Arc::new(SqliteStore::in_memory()))
  }

  fn req(name: &str, country: &str, email: &str) -> JoinRequest {
    JoinRequest {
      name:    Some(name.into()),
      country: Some(country.into()),
      email:   Some(email.into()),
    }
  }

  /// A store whose every call fails with an unclassified error.
  struct BrokenStore;

  #[derive(Debug)]
  struct Broken;

  impl fmt::Display for Broken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("disk on fire") }
  }

  impl std::error::Error for Broken {}

  impl StoreFailure for Broken {
    fn kind(&self) -> FailureKind { FailureKind::Other }
  }

  impl WaitlistStore for BrokenStore {
    type Error = Broken;

    async fn insert(&self, _entry: NewEntry) -> Result<EntryId, Broken> { Err(Broken) }

    async fn list_all(&self) -> Result<Vec<WaitlistEntry>, Broken> { Err(Broken) }
  }

  #[tokio::test]
  async fn create_then_list_shows_normalised_entry_once() {
    let svc = service();
    let id = svc
      .create(req("  Grace Hopper ", " United States ", " Grace@Navy.MIL "))
      .await
      .unwrap();

    let listing = svc.list().await.unwrap();
    assert_eq!(listing.count, 1);
    let entry = &listing.entries[0];
    assert_eq!(entry.id, id);
    assert_eq!(entry.name, "Grace Hopper");
    assert_eq!(entry.country, "United States");
    assert_eq!(entry.email, "grace@navy.mil");
  }

  #[tokio::test]
  async fn duplicate_email_is_conflict() {
    let svc = service();
    svc.create(req("A", "X", "dup@example.com")).await.unwrap();

    let err = svc.create(req("B", "Y", "DUP@Example.com")).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.to_string(), "Email already exists in waitlist");
    assert_eq!(svc.list().await.unwrap().count, 1);
  }

  #[tokio::test]
  async fn missing_field_is_validation_error_without_write() {
    let svc = service();
    let mut body = req("A", "X", "a@example.com");
    body.country = None;

    let err = svc.create(body).await.unwrap_err();
    assert!(matches!(&err, ApiError::Validation(m) if m == "All fields are required"));

    let err = svc.create(req("A", "   ", "a@example.com")).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert_eq!(svc.list().await.unwrap().count, 0);
  }

  #[tokio::test]
  async fn bad_email_is_validation_error() {
    let svc = service();
    let err = svc.create(req("A", "X", "not-an-email")).await.unwrap_err();
    assert!(matches!(&err, ApiError::Validation(m) if m == "Invalid email format"));

    svc.create(req("A", "X", "a@b.co")).await.unwrap();
  }

  #[tokio::test]
  async fn empty_list_has_zero_count() {
    let listing = service().list().await.unwrap();
    assert!(listing.entries.is_empty());
    assert_eq!(listing.count, 0);
  }

  #[tokio::test]
  async fn list_is_newest_first() {
    let svc = service();
    for name in ["A", "B", "C"] {
      svc
        .create(req(name, "X", &format!("{name}@example.com")))
        .await
        .unwrap();
    }
    let names: Vec<_> = svc
      .list()
      .await
      .unwrap()
      .entries
      .into_iter()
      .map(|e| e.name)
      .collect();
    assert_eq!(names, ["C", "B", "A"]);
  }

  #[tokio::test]
  async fn unreachable_store_is_service_unavailable() {
    let svc = WaitlistService::new(Arc::new(SqliteStore::new(
      "/nonexistent-waitlist-dir/nested/waitlist.db",
    )));

    let err = svc.create(req("A", "X", "a@example.com")).await.unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable(_)));

    let err = svc.list().await.unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable(_)));
  }

  #[tokio::test]
  async fn other_store_failures_are_internal() {
    let svc = WaitlistService::new(Arc::new(BrokenStore));

    let err = svc.create(req("A", "X", "a@example.com")).await.unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
    assert_eq!(err.to_string(), "Internal server error");

    let err = svc.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
  }

  #[tokio::test]
  async fn export_renders_listing() {
    let svc = service();
    svc.create(req("Ada", "UK", "ada@example.com")).await.unwrap();

    let csv = svc.export_csv().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(export::CSV_HEADER));
    assert!(lines.next().unwrap().contains(r#""Ada","UK","ada@example.com""#));
  }
}
