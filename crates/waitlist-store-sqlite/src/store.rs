//! [`SqliteStore`] — the SQLite implementation of [`WaitlistStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use chrono::Utc;
use tokio::sync::Mutex;
use waitlist_core::{
  entry::{EntryId, NewEntry, WaitlistEntry},
  store::WaitlistStore,
};

use crate::{
  encode::{encode_dt, RawEntry},
  error::is_unique_violation,
  schema::SCHEMA,
  Error, Result,
};

/// Upper bound on opening the database and applying the schema.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
enum Location {
  File(PathBuf),
  Memory,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A waitlist store backed by a single SQLite file.
///
/// The connection is established on first use, not on construction. A
/// failed attempt is not cached, so the next operation tries again. If the
/// connection is later found closed, the failing operation reports it and
/// the next one reconnects. An in-memory store starts empty after a
/// reconnect.
///
/// Cloning is cheap — every clone shares the same lazily-opened connection.
#[derive(Clone)]
pub struct SqliteStore {
  location:        Location,
  connect_timeout: Duration,
  conn:            Arc<Mutex<Option<tokio_rusqlite::Connection>>>,
}

impl SqliteStore {
  /// A store that will open (or create) the database at `path` on first use.
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self::with_location(Location::File(path.as_ref().to_path_buf()))
  }

  /// A store backed by a private in-memory database — useful for testing.
  pub fn in_memory() -> Self { Self::with_location(Location::Memory) }

  /// Open (or create) a store at `path` and establish the connection now.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self::new(path);
    store.connection().await?;
    Ok(store)
  }

  /// Override the connection-establishment timeout.
  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  fn with_location(location: Location) -> Self {
    Self {
      location,
      connect_timeout: DEFAULT_CONNECT_TIMEOUT,
      conn: Arc::new(Mutex::new(None)),
    }
  }

  /// The shared connection, establishing it if none is cached.
  ///
  /// The lock is held while connecting, so concurrent first callers share a
  /// single attempt.
  pub(crate) async fn connection(&self) -> Result<tokio_rusqlite::Connection> {
    let mut slot = self.conn.lock().await;
    if let Some(conn) = slot.as_ref() {
      return Ok(conn.clone());
    }

    let conn = match tokio::time::timeout(self.connect_timeout, self.connect()).await {
      Ok(conn) => conn?,
      Err(_) => return Err(Error::ConnectTimeout(self.connect_timeout)),
    };
    *slot = Some(conn.clone());
    Ok(conn)
  }

  /// Drop the cached connection if `err` says it has been closed.
  async fn forget_if_closed(&self, err: &tokio_rusqlite::Error) {
    if matches!(
      err,
      tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_)
    ) {
      tracing::warn!(location = ?self.location, "database connection closed; will reconnect");
      self.conn.lock().await.take();
    }
  }

  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    let conn = match &self.location {
      Location::File(path) => tokio_rusqlite::Connection::open(path).await,
      Location::Memory => tokio_rusqlite::Connection::open_in_memory().await,
    }
    .map_err(Error::Open)?;

    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(Error::Open)?;

    tracing::debug!(location = ?self.location, "database connection established");
    Ok(conn)
  }
}

// ─── WaitlistStore impl ──────────────────────────────────────────────────────

impl WaitlistStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, entry: NewEntry) -> Result<EntryId> {
    let conn = self.connection().await?;

    let name       = entry.name().to_owned();
    let country    = entry.country().to_owned();
    let email      = entry.email().to_owned();
    let created_at = encode_dt(Utc::now());

    let result = conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO waitlist (name, country, email, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, country, email, created_at],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    match result {
      Ok(id) => Ok(EntryId(id)),
      Err(e) if is_unique_violation(&e) => {
        Err(Error::DuplicateEmail(entry.email().to_owned()))
      }
      Err(e) => {
        self.forget_if_closed(&e).await;
        Err(e.into())
      }
    }
  }

  async fn list_all(&self) -> Result<Vec<WaitlistEntry>> {
    let conn = self.connection().await?;

    let result = conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, country, email, created_at
           FROM waitlist
           ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
          .query_map([], RawEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await;

    let raws: Vec<RawEntry> = match result {
      Ok(raws) => raws,
      Err(e) => {
        self.forget_if_closed(&e).await;
        return Err(e.into());
      }
    };

    raws.into_iter().map(RawEntry::into_entry).collect()
  }
}
