//! Error type for `pulse-store-sqlite`.

use thiserror::Error;

/// Covers connection failures, rejected queries, and row-decode failures
/// (the latter surface as conversion errors from the rusqlite layer).
#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
