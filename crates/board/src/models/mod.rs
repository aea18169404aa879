//! Domain models for the board.

pub mod entry;

pub use entry::{Entry, NewEntry};
