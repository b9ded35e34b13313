//! The `WaitlistStore` trait and store-failure classification.
//!
//! The trait is implemented by storage backends (e.g. `waitlist-store-sqlite`).
//! Higher layers (`waitlist-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::entry::{EntryId, NewEntry, WaitlistEntry};

// ─── Failure classification ──────────────────────────────────────────────────

/// Backend-independent category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// The email uniqueness constraint rejected the write.
  DuplicateKey,
  /// The backing store could not be reached or opened.
  Unavailable,
  Other,
}

/// Implemented by store error types so callers can classify failures without
/// knowing which storage engine produced them.
pub trait StoreFailure {
  fn kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a waitlist storage backend.
///
/// The store is append-only: entries are inserted once and never updated or
/// deleted. Email uniqueness must be enforced atomically by the backend.
pub trait WaitlistStore: Send + Sync {
  type Error: std::error::Error + StoreFailure + Send + Sync + 'static;

  /// Persist a new entry. The store assigns `id` and `created_at`.
  ///
  /// Fails with a [`FailureKind::DuplicateKey`] error if an entry with the
  /// same (case-insensitive) email already exists.
  fn insert(
    &self,
    entry: NewEntry,
  ) -> impl Future<Output = Result<EntryId, Self::Error>> + Send + '_;

  /// Return every entry, newest first. An empty store yields an empty vec.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<WaitlistEntry>, Self::Error>> + Send + '_;
}
