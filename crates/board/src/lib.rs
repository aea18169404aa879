//! Notice board library.
//!
//! An announcement board with a web form for posting and deleting entries,
//! and a LINE Messaging API webhook that answers chat commands with the
//! current entries.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod line;
pub mod models;
pub mod routes;
pub mod state;
pub mod webhook;
