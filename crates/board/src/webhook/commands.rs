//! Literal-text chat commands.

use std::collections::HashMap;

/// Message that asks for the announcement list.
pub const LIST_ENTRIES_TEXT: &str = "周知事項を教えて";

/// Message for a command that is still being built.
pub const UNDER_CONSTRUCTION_TEXT: &str = "ただいま工事中です";

/// Reply to [`Command::UnderConstruction`].
pub const UNDER_CONSTRUCTION_REPLY: &str = "その命令は工事中です。しばらくお待ちください。";

/// Reply to any text that is not a known command.
pub const UNKNOWN_COMMAND_REPLY: &str = "その命令には対応していません。";

/// Reply when the announcement list cannot be loaded.
pub const ENTRIES_UNAVAILABLE_REPLY: &str =
    "周知事項を取得できませんでした。時間をおいて再度お試しください。";

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reply with the announcement carousel.
    ListEntries,
    /// Reply with the under-construction notice.
    UnderConstruction,
}

/// Exact-match table from message text to command.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: HashMap<String, Command>,
}

impl CommandTable {
    /// An empty table. Every message resolves to `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The board's command set.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(LIST_ENTRIES_TEXT, Command::ListEntries)
            .with(UNDER_CONSTRUCTION_TEXT, Command::UnderConstruction)
    }

    /// Add or replace a command.
    #[must_use]
    pub fn with(mut self, text: impl Into<String>, command: Command) -> Self {
        self.commands.insert(text.into(), command);
        self
    }

    /// Look up a message. Surrounding whitespace is ignored.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<Command> {
        self.commands.get(text.trim()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
