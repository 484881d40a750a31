//! Storage layer
//!
//! Uses SQLite (embedded) through a bounded `sqlx` pool. Every operation is
//! a single positionally-bound statement.

pub mod db;
pub mod search;

pub use db::Database;
