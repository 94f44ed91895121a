//! Record store: the authoritative collection of user records.
//!
//! [`RecordStore`] is the seam between the list coordination and whatever
//! holds the data. [`MemoryStore`] keeps everything in process memory and
//! starts from a fixed seed list.

mod memory;

pub use memory::{MemoryStore, seed_users};

use async_trait::async_trait;

use crate::error::Result;

/// One user in the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub display_name: String,
    pub is_active: bool,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_active,
        }
    }
}

/// Data source behind the user list.
///
/// Object-safe and async so a remote implementation can replace the
/// in-memory one without touching the query side.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record, in store order.
    async fn list(&self) -> Vec<UserRecord>;
    /// Load a record by id.
    async fn find_by_id(&self, id: &str) -> Option<UserRecord>;
    /// Remove a record. Fails with `NotFound` when the id is unknown.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}
