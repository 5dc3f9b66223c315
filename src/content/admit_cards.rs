use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::storage::{load_json, save_json, KeyValueStore};

pub const ADMIT_CARD_ACCESS_KEY: &str = "admitCardAccess";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmitCardGrant {
    pub student_id: String,
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_at: Option<DateTime<Utc>>,
}

/// Which students may download their admit card
pub struct AdmitCardAccess<S> {
    storage: S,
}

impl<S: KeyValueStore> AdmitCardAccess<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted grants, or an empty list when nothing usable is stored
    pub fn all(&self) -> Vec<AdmitCardGrant> {
        load_json(&self.storage, ADMIT_CARD_ACCESS_KEY).unwrap_or_else(|e| {
            tracing::error!("❌ Failed to read admit card access: {}", e);
            None
        })
        .unwrap_or_default()
    }

    pub fn is_allowed(&self, student_id: &str) -> bool {
        self.all()
            .iter()
            .find(|grant| grant.student_id == student_id)
            .map(|grant| grant.allowed)
            .unwrap_or(false)
    }

    /// Grant or revoke one student, keeping everyone else's entry
    pub fn set_access(&self, student_id: &str, allowed: bool) {
        let mut grants = self.all();
        let entry = AdmitCardGrant {
            student_id: student_id.to_string(),
            allowed,
            granted_at: allowed.then(Utc::now),
        };

        match grants.iter_mut().find(|grant| grant.student_id == student_id) {
            Some(existing) => *existing = entry,
            None => grants.push(entry),
        }

        self.persist(&grants);
    }

    /// Replace the whole list with a grant for each of `student_ids`.
    /// Students not listed lose any previous entry.
    pub fn grant_all<I, T>(&self, student_ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let now = Utc::now();
        let grants: Vec<AdmitCardGrant> = student_ids
            .into_iter()
            .map(|id| AdmitCardGrant {
                student_id: id.into(),
                allowed: true,
                granted_at: Some(now),
            })
            .collect();

        self.persist(&grants);
    }

    fn persist(&self, grants: &[AdmitCardGrant]) {
        if let Err(e) = save_json(&self.storage, ADMIT_CARD_ACCESS_KEY, grants) {
            tracing::error!("❌ Failed to save admit card access: {}", e);
        }
    }
}
