/*!
 * Database module for persistent content records.
 *
 * This module provides SQLite-based persistence for content records: one
 * row per submitted URL with its processing status, title and audio count,
 * so previously created content can be listed and replayed.
 */

// Allow dead code - database types are for library consumers
#![allow(dead_code)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{ContentRecord, ContentStatus};
pub use repository::Repository;
