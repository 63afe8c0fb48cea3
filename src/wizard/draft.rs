//! Persisted wizard drafts
//!
//! One record per wizard instance under `motormart.listing-draft.v1.<id>`.
//! Each record carries a SHA-256 checksum of its body; a record whose
//! checksum or version does not match is discarded on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use super::steps::{ListingParts, Step};
use crate::storage::{LocalStore, StorageError};

pub const DRAFT_VERSION: u32 = 1;

const KEY_PREFIX: &str = "motormart.listing-draft.v1.";
const CHECKSUM_FIELD: &str = "checksum";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub version: u32,
    pub wizard_id: Uuid,
    pub current: Step,
    pub confirmed: [bool; 6],
    pub parts: ListingParts,
    pub updated_at: DateTime<Utc>,
}

// Floats must parse back exactly (serde_json `float_roundtrip`) for the
// checksum to hold after a file round trip.
fn checksum(body: &Value) -> String {
    hex::encode(Sha256::digest(body.to_string().as_bytes()))
}

#[derive(Clone)]
pub struct DraftStore {
    storage: Arc<dyn LocalStore>,
}

impl DraftStore {
    pub fn new(storage: Arc<dyn LocalStore>) -> Self {
        Self { storage }
    }

    pub fn key(wizard_id: Uuid) -> String {
        format!("{}{}", KEY_PREFIX, wizard_id)
    }

    pub fn save(&self, record: &DraftRecord) -> Result<(), StorageError> {
        let mut body = serde_json::to_value(record)?;
        let sum = checksum(&body);
        if let Value::Object(map) = &mut body {
            map.insert(CHECKSUM_FIELD.to_string(), Value::String(sum));
        }
        self.storage.set(&Self::key(record.wizard_id), body)
    }

    /// Load a draft. Missing, stale or tampered drafts yield `None`; the
    /// latter two are deleted.
    pub fn load(&self, wizard_id: Uuid) -> Result<Option<DraftRecord>, StorageError> {
        let key = Self::key(wizard_id);
        let mut body = match self.storage.get(&key)? {
            Some(Value::Object(map)) => map,
            Some(_) => return self.drop_invalid(&key, "not an object"),
            None => return Ok(None),
        };

        let stored = match body.remove(CHECKSUM_FIELD) {
            Some(Value::String(sum)) => sum,
            _ => return self.drop_invalid(&key, "missing checksum"),
        };
        let body = Value::Object(body);
        if checksum(&body) != stored {
            return self.drop_invalid(&key, "checksum mismatch");
        }

        match serde_json::from_value::<DraftRecord>(body) {
            Ok(record) if record.version == DRAFT_VERSION && record.wizard_id == wizard_id => {
                Ok(Some(record))
            }
            Ok(_) => self.drop_invalid(&key, "version mismatch"),
            Err(_) => self.drop_invalid(&key, "unreadable body"),
        }
    }

    pub fn discard(&self, wizard_id: Uuid) -> Result<(), StorageError> {
        self.storage.remove(&Self::key(wizard_id))
    }

    /// Ids of every stored draft
    pub fn list(&self) -> Result<Vec<Uuid>, StorageError> {
        Ok(self
            .storage
            .keys(KEY_PREFIX)?
            .iter()
            .filter_map(|key| Uuid::parse_str(&key[KEY_PREFIX.len()..]).ok())
            .collect())
    }

    fn drop_invalid(
        &self,
        key: &str,
        reason: &'static str,
    ) -> Result<Option<DraftRecord>, StorageError> {
        tracing::warn!(key, reason, "Discarding listing draft");
        self.storage.remove(key)?;
        Ok(None)
    }
}
