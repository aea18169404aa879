//! Core types for the notice board.
//!
//! This module provides type-safe wrappers for the announcement domain.

pub mod deadline;
pub mod id;
pub mod text;

pub use deadline::{Deadline, DeadlineError};
pub use id::*;
pub use text::{NonEmptyText, TextError};
