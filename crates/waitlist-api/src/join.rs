//! Handlers for `/join` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/join` | Body: `{"name","country","email"}`; returns 201 + id |
//! | `GET`  | `/join` | All entries, newest first, with count |
//! | `GET`  | `/join/export` | Same listing as a CSV attachment |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;
use waitlist_core::{
  entry::{EntryId, WaitlistEntry},
  export,
  store::WaitlistStore,
};

use crate::{
  error::ApiError,
  service::{JoinRequest, WaitlistService},
};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct JoinResponse {
  pub success: bool,
  pub message: &'static str,
  pub id:      EntryId,
}

/// `POST /join` — returns 201 + `{"success":true,"message":...,"id":...}`.
pub async fn create<S>(
  State(service): State<Arc<WaitlistService<S>>>,
  body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WaitlistStore,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  let id = service.create(body).await?;
  Ok((
    StatusCode::CREATED,
    Json(JoinResponse {
      success: true,
      message: "Successfully added to waitlist",
      id,
    }),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub success: bool,
  pub data:    Vec<WaitlistEntry>,
  pub count:   usize,
}

/// `GET /join`
pub async fn list<S>(
  State(service): State<Arc<WaitlistService<S>>>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: WaitlistStore,
{
  let listing = service.list().await?;
  Ok(Json(ListResponse {
    success: true,
    data:    listing.entries,
    count:   listing.count,
  }))
}

// ─── Export ───────────────────────────────────────────────────────────────────

/// `GET /join/export` — `text/csv` attachment named after today's date.
pub async fn export<S>(
  State(service): State<Arc<WaitlistService<S>>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WaitlistStore,
{
  let csv = service.export_csv().await?;
  let filename = export::csv_filename(Utc::now().date_naive());
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{filename}\""),
      ),
    ],
    csv,
  ))
}
