use async_trait::async_trait;
use parking_lot::RwLock;

use super::{RecordStore, UserRecord};
use crate::error::{Error, Result};

const SEED: &[(&str, &str)] = &[
    ("u1", "Ivan Z."),
    ("u2", "Mikhail X."),
    ("u3", "Ivan C."),
    ("u4", "Petr V."),
    ("u5", "Artyom B."),
    ("u6", "Gleb N."),
    ("u7", "Anton M."),
    ("u8", "Semyon A."),
    ("u9", "Arseniy S."),
    ("u10", "Nick D."),
    ("u11", "Alex F."),
    ("u12", "Kirill G."),
    ("u13", "Stas H."),
    ("u14", "Yuriy J."),
    ("u15", "Roman K."),
    ("u16", "Ivan L."),
    ("u17", "Ivan Q."),
];

/// The seventeen users every fresh store starts with.
pub fn seed_users() -> Vec<UserRecord> {
    SEED.iter()
        .map(|(id, name)| UserRecord::new(*id, *name, true))
        .collect()
}

/// In-memory store. Contents reset to the seed on every process start.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self) -> Vec<UserRecord> {
        self.records.read().clone()
    }

    async fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        self.records.read().iter().find(|u| u.id == id).cloned()
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        records.remove(index);
        Ok(())
    }
}
