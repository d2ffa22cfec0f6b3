/**
 * Settings Store
 *
 * Flat string key/value settings per user, kept in memory for the life of
 * the process.
 */

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::shared::UserIdentity;

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    values: Arc<RwLock<HashMap<UserIdentity, BTreeMap<String, String>>>>,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self, user: &UserIdentity) -> BTreeMap<String, String> {
        self.values.read().await.get(user).cloned().unwrap_or_default()
    }

    pub async fn get(&self, user: &UserIdentity, key: &str) -> Option<String> {
        self.values.read().await.get(user)?.get(key).cloned()
    }

    /// Store every pair, replacing existing values.
    pub async fn update<I>(&self, user: &UserIdentity, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.values.write().await.entry(user.clone()).or_default().extend(pairs);
    }

    /// Returns whether the key existed.
    pub async fn remove(&self, user: &UserIdentity, key: &str) -> bool {
        let mut values = self.values.write().await;
        let Some(settings) = values.get_mut(user) else {
            return false;
        };
        let removed = settings.remove(key).is_some();
        if settings.is_empty() {
            values.remove(user);
        }
        removed
    }
}
