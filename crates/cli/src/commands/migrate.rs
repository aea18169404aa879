//! Database migration command.
//!
//! Migrations live in `crates/board/migrations/` and are embedded at build
//! time. The server never runs them itself.

use tracing::info;

use notice_board::db;

use super::{CommandError, database_url};

/// Apply pending board migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    info!("Connecting to board database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running board migrations...");
    sqlx::migrate!("../board/migrations").run(&pool).await?;

    info!("Board migrations complete!");
    Ok(())
}
