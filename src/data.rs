//! Shared state attached to the framework.

use crate::db::DbManager;

/// State every command invocation can reach through its context.
#[derive(Debug)]
pub struct Data {
    /// The shared guild-settings store, constructed once in `main`.
    pub db: DbManager,
}
