//! Notice Board Core - Shared domain types.
//!
//! This crate provides the types shared by the notice board components:
//! - `board` - Web application and LINE webhook
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database integration for IDs is behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for entry IDs, deadlines, and validated text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
