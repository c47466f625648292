//! SQLite backends for the two Pulse databases.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. One connection wrapper per
//! database: [`EngagementDb`] for the social-activity store,
//! [`IdentityDb`] for the profile store. Every query is parametrized;
//! dynamic IN-lists are bound with `params_from_iter`, never interpolated.

mod engagement;
mod identity;
mod schema;

pub mod error;

pub use engagement::EngagementDb;
pub use error::{Error, Result};
pub use identity::IdentityDb;

#[cfg(test)]
mod tests;
