//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::BoardConfig;
use crate::line::LineClient;
use crate::webhook::{CarouselFormatter, CommandTable, WebhookDispatcher};

/// Webhook dispatcher wired to the database and the LINE API.
pub type BoardDispatcher = WebhookDispatcher<PgPool, LineClient>;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build LINE HTTP client: {0}")]
    LineClient(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Nothing inside is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BoardConfig,
    pool: PgPool,
    webhook: BoardDispatcher,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The command table is fixed here; the dispatcher owns it from then on.
    ///
    /// # Errors
    ///
    /// Returns an error if the LINE HTTP client cannot be built.
    pub fn new(config: BoardConfig, pool: PgPool) -> Result<Self, StateError> {
        let line = LineClient::new(config.line())?;
        let webhook = WebhookDispatcher::new(
            config.line().channel_secret.clone(),
            CommandTable::standard(),
            pool.clone(),
            line,
            CarouselFormatter::new(config.base_url.clone()),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                webhook,
            }),
        })
    }

    /// Get a reference to the board configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the webhook dispatcher.
    #[must_use]
    pub fn webhook(&self) -> &BoardDispatcher {
        &self.inner.webhook
    }
}
