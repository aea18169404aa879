//! Announcement board pages.

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::{info, instrument};

use notice_board_core::{Deadline, EntryId, NonEmptyText};

use crate::db::{EntryRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{Entry, NewEntry};
use crate::state::AppState;

// =============================================================================
// Form Inputs
// =============================================================================

/// Form data for creating an entry.
#[derive(Debug, Deserialize)]
pub struct NewEntryForm {
    pub title: String,
    /// `YYYY-MM-DD` from `<input type="date">`.
    pub deadline: String,
    pub body: String,
}

impl TryFrom<NewEntryForm> for NewEntry {
    type Error = AppError;

    fn try_from(form: NewEntryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            title: NonEmptyText::parse(&form.title, "title")
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            deadline: Deadline::from_iso_date(&form.deadline)
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            body: NonEmptyText::parse(&form.body, "body")
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        })
    }
}

/// Form data for deleting an entry.
#[derive(Debug, Deserialize)]
pub struct DeleteEntryForm {
    pub id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Entry row as shown on the index page.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub id: i32,
    pub title: String,
    pub deadline: String,
    pub body: String,
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id.as_i32(),
            title: entry.title,
            deadline: entry.deadline.into_inner(),
            body: entry.body,
        }
    }
}

/// Board index page.
#[derive(Template)]
#[template(path = "entries/index.html")]
pub struct EntriesIndexTemplate {
    pub entries: Vec<EntryView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// List entries with the create form.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries = EntryRepository::new(state.pool())
        .list_ordered_by_deadline()
        .await?;

    let template = EntriesIndexTemplate {
        entries: entries.into_iter().map(EntryView::from).collect(),
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    ))
}

/// Create an entry.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewEntryForm>,
) -> Result<Redirect, AppError> {
    let new_entry = NewEntry::try_from(form)?;

    let entry = EntryRepository::new(state.pool()).create(&new_entry).await?;
    info!(entry_id = %entry.id, "Entry created");

    Ok(Redirect::to("/"))
}

/// Delete an entry. Deleting an ID that no longer exists is not an error.
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    Form(form): Form<DeleteEntryForm>,
) -> Result<Redirect, AppError> {
    let result = EntryRepository::new(state.pool())
        .delete(EntryId::new(form.id))
        .await;
    deletion_outcome(form.id, result)?;

    Ok(Redirect::to("/"))
}

/// A missing entry counts as deleted.
fn deletion_outcome(id: i32, result: Result<(), RepositoryError>) -> Result<(), AppError> {
    match result {
        Ok(()) => info!(entry_id = id, "Entry deleted"),
        Err(RepositoryError::NotFound) => info!(entry_id = id, "Entry already gone"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
