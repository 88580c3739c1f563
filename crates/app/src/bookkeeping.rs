//! On-device bookkeeping keyed by user id.
//!
//! Records which order items the user has already reviewed and which coupon
//! codes they saved, so the screens can hide the review button and show the
//! saved state without asking the backend. Each user gets one JSON file,
//! `<dir>/<user_id>.json`; every write replaces the whole file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use threadline_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum BookkeepingError {
    #[error("Bookkeeping I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bookkeeping file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Everything stored for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// `"<order_id>:<item_id>"` pairs.
    #[serde(default)]
    pub reviewed_items: BTreeSet<String>,
    /// Upper-cased coupon codes.
    #[serde(default)]
    pub saved_coupons: BTreeSet<String>,
}

fn review_key(order_id: DbId, item_id: DbId) -> String {
    format!("{order_id}:{item_id}")
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct LocalBookkeeping {
    dir: PathBuf,
}

impl LocalBookkeeping {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, user_id: DbId) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }

    /// Load a user's record. A missing file is an empty record.
    pub async fn load(&self, user_id: DbId) -> Result<UserRecord, BookkeepingError> {
        match tokio::fs::read(self.path_for(user_id)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(UserRecord::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, user_id: DbId, record: &UserRecord) -> Result<(), BookkeepingError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(user_id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(record)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Remember that `item_id` of `order_id` has been reviewed.
    ///
    /// Returns `false` when it was already recorded.
    pub async fn mark_reviewed(
        &self,
        user_id: DbId,
        order_id: DbId,
        item_id: DbId,
    ) -> Result<bool, BookkeepingError> {
        let mut record = self.load(user_id).await?;
        let inserted = record.reviewed_items.insert(review_key(order_id, item_id));
        if inserted {
            self.store(user_id, &record).await?;
            tracing::debug!(user_id, order_id, item_id, "Marked order item as reviewed");
        }
        Ok(inserted)
    }

    pub async fn is_reviewed(
        &self,
        user_id: DbId,
        order_id: DbId,
        item_id: DbId,
    ) -> Result<bool, BookkeepingError> {
        let record = self.load(user_id).await?;
        Ok(record.reviewed_items.contains(&review_key(order_id, item_id)))
    }

    /// Save a coupon code for later. Codes are compared case-insensitively.
    ///
    /// Returns `false` when the code was already saved.
    pub async fn save_coupon(&self, user_id: DbId, code: &str) -> Result<bool, BookkeepingError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Ok(false);
        }
        let mut record = self.load(user_id).await?;
        let inserted = record.saved_coupons.insert(code);
        if inserted {
            self.store(user_id, &record).await?;
        }
        Ok(inserted)
    }

    pub async fn saved_coupons(&self, user_id: DbId) -> Result<Vec<String>, BookkeepingError> {
        let record = self.load(user_id).await?;
        Ok(record.saved_coupons.into_iter().collect())
    }
}
