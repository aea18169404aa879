//! Database operations for announcement entries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use notice_board_core::{Deadline, EntryId};

use super::RepositoryError;
use crate::models::{Entry, NewEntry};
use crate::webhook::EntrySource;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` entry queries.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: i32,
    title: String,
    deadline: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: EntryId::new(row.id),
            title: row.title,
            deadline: Deadline::from_stored(row.deadline),
            body: row.body,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for entry database operations.
pub struct EntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EntryRepository<'a> {
    /// Create a new entry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all entries, earliest deadline first.
    ///
    /// Ties on the deadline keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_ordered_by_deadline(&self) -> Result<Vec<Entry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, title, deadline, body, created_at
            FROM entries
            ORDER BY deadline ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    /// Insert a new entry and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, entry), fields(title = %entry.title))]
    pub async fn create(&self, entry: &NewEntry) -> Result<Entry, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            INSERT INTO entries (title, deadline, body)
            VALUES ($1, $2, $3)
            RETURNING id, title, deadline, body, created_at
            ",
        )
        .bind(entry.title.as_str())
        .bind(entry.deadline.as_str())
        .bind(entry.body.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry has this ID, or
    /// `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: EntryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

impl EntrySource for PgPool {
    async fn list_by_deadline(&self) -> Result<Vec<Entry>, RepositoryError> {
        EntryRepository::new(self).list_ordered_by_deadline().await
    }
}

#[cfg(test)]
mod tests {
    use notice_board_core::NonEmptyText;

    use super::*;

    fn new_entry(title: &str, deadline: &str) -> NewEntry {
        NewEntry {
            title: NonEmptyText::parse(title, "title").expect("valid title"),
            deadline: Deadline::from_iso_date(deadline).expect("valid deadline"),
            body: NonEmptyText::parse(&format!("{title} body"), "body").expect("valid body"),
        }
    }

    #[sqlx::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_create_returns_stored_entry(pool: PgPool) {
        let repo = EntryRepository::new(&pool);

        let entry = repo
            .create(&new_entry("健康診断", "2024-03-05"))
            .await
            .expect("create entry");

        assert_eq!(entry.title, "健康診断");
        assert_eq!(entry.deadline.as_str(), "2024年03月05日");
        assert_eq!(entry.body, "健康診断 body");

        let listed = repo.list_ordered_by_deadline().await.expect("list entries");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, entry.id);
    }

    #[sqlx::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_list_orders_by_deadline_then_id(pool: PgPool) {
        let repo = EntryRepository::new(&pool);
        for (title, deadline) in [
            ("late", "2024-12-01"),
            ("tie first", "2024-02-10"),
            ("early", "2024-01-15"),
            ("tie second", "2024-02-10"),
        ] {
            repo.create(&new_entry(title, deadline))
                .await
                .expect("create entry");
        }

        let titles: Vec<String> = repo
            .list_ordered_by_deadline()
            .await
            .expect("list entries")
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["early", "tie first", "tie second", "late"]);
    }

    #[sqlx::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_delete_removes_entry(pool: PgPool) {
        let repo = EntryRepository::new(&pool);
        let entry = repo
            .create(&new_entry("一時", "2024-05-01"))
            .await
            .expect("create entry");

        repo.delete(entry.id).await.expect("delete entry");

        assert!(
            repo.list_ordered_by_deadline()
                .await
                .expect("list entries")
                .is_empty()
        );
    }

    #[sqlx::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_delete_missing_entry_is_not_found(pool: PgPool) {
        let repo = EntryRepository::new(&pool);

        let result = repo.delete(EntryId::new(9_999)).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[sqlx::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn test_pool_serves_entries_to_webhook(pool: PgPool) {
        let repo = EntryRepository::new(&pool);
        repo.create(&new_entry("B", "2024-02-01"))
            .await
            .expect("create entry");
        repo.create(&new_entry("A", "2024-01-01"))
            .await
            .expect("create entry");

        let entries = pool.list_by_deadline().await.expect("list entries");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "A");
    }
}
