//! Demo data for local development.

use chrono::{Days, NaiveDate, Utc};
use tracing::info;

use notice_board::db::{self, EntryRepository};
use notice_board::models::NewEntry;
use notice_board_core::{Deadline, NonEmptyText};

use super::{CommandError, database_url};

/// Insert `count` demo entries due on consecutive days from tomorrow.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn demo_entries(count: u32) -> Result<(), CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = EntryRepository::new(&pool);
    let today = Utc::now().date_naive();

    for n in 1..=count {
        let entry = repo.create(&demo_entry(today, n)?).await?;
        info!(entry_id = %entry.id, deadline = %entry.deadline, "Seeded entry");
    }

    info!(count, "Seeding complete");
    Ok(())
}

/// The `n`th demo entry, due `n` days after `today`.
fn demo_entry(today: NaiveDate, n: u32) -> Result<NewEntry, CommandError> {
    let due = today
        .checked_add_days(Days::new(u64::from(n)))
        .ok_or_else(|| CommandError::InvalidEntry(format!("deadline {n} days out of range")))?;

    let text = |raw: String, field| {
        NonEmptyText::parse(&raw, field).map_err(|e| CommandError::InvalidEntry(e.to_string()))
    };

    Ok(NewEntry {
        title: text(format!("サンプル周知事項 {n}"), "title")?,
        deadline: Deadline::from_date(due),
        body: text(
            format!("これは動作確認用の周知事項です（{n}件目）。"),
            "body",
        )?,
    })
}
