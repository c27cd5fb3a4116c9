use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex as TokioMutex;

use crate::models::account::Account;
use crate::models::interest::InterestItem;
use crate::models::verification::VerificationRecord;
use crate::storage::{Result, Storage, StorageError};

// In-memory storage data structure (using Mutex for thread safety)
struct StorageData {
    accounts: HashMap<String, Account>, // account id -> account
    // kept in insertion order so "latest" stays deterministic even when
    // two records share a creation timestamp
    verifications: Vec<VerificationRecord>,
    interests: BTreeMap<u32, InterestItem>, // catalog id -> item
}

impl StorageData {
    fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            verifications: Vec::new(),
            interests: BTreeMap::new(),
        }
    }
}

/// In-memory storage implementation (useful for testing)
pub struct MemoryStorage {
    data: TokioMutex<StorageData>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            data: TokioMutex::new(StorageData::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    /// Get the storage instance as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Create a new account, enforcing the unique email constraint
    async fn create_account(&self, account: &Account) -> Result<()> {
        let mut data = self.data.lock().await;

        let duplicate = data
            .accounts
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email));
        if duplicate {
            return Err(StorageError::DuplicateEntry(format!(
                "account email '{}' already exists",
                account.email
            )));
        }

        data.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    /// Get account by ID
    async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        let data = self.data.lock().await;
        Ok(data.accounts.get(id).cloned())
    }

    /// Get account by email
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let data = self.data.lock().await;

        for account in data.accounts.values() {
            if account.email.eq_ignore_ascii_case(email) {
                return Ok(Some(account.clone()));
            }
        }

        Ok(None)
    }

    /// Flip the activated flag
    async fn set_account_activated(&self, id: &str, activated: bool) -> Result<bool> {
        let mut data = self.data.lock().await;

        match data.accounts.get_mut(id) {
            Some(account) => {
                account.activated = activated;
                account.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist a verification record
    async fn create_verification(&self, record: &VerificationRecord) -> Result<()> {
        let mut data = self.data.lock().await;
        data.verifications.push(record.clone());
        Ok(())
    }

    /// Most recently created record for the account
    async fn latest_verification_for(
        &self,
        account_id: &str,
    ) -> Result<Option<VerificationRecord>> {
        let data = self.data.lock().await;

        let latest = data
            .verifications
            .iter()
            .rev()
            .find(|record| record.account_id == account_id)
            .cloned();

        Ok(latest)
    }

    /// Conditional delete by record id, true iff this call removed it
    async fn delete_verification(&self, record_id: &str) -> Result<bool> {
        let mut data = self.data.lock().await;

        match data
            .verifications
            .iter()
            .position(|record| record.id == record_id)
        {
            Some(index) => {
                data.verifications.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete every record for the account
    async fn purge_verifications(&self, account_id: &str) -> Result<u64> {
        let mut data = self.data.lock().await;

        let before = data.verifications.len();
        data.verifications
            .retain(|record| record.account_id != account_id);

        Ok((before - data.verifications.len()) as u64)
    }

    async fn count_interests(&self) -> Result<u64> {
        let data = self.data.lock().await;
        Ok(data.interests.len() as u64)
    }

    /// Page of the catalog, ordered by id ascending
    async fn list_interests(&self, offset: u64, limit: u32) -> Result<Vec<InterestItem>> {
        let data = self.data.lock().await;

        let items = data
            .interests
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(items)
    }

    async fn set_interest_selected(&self, id: u32, selected: bool) -> Result<Option<InterestItem>> {
        let mut data = self.data.lock().await;

        match data.interests.get_mut(&id) {
            Some(item) => {
                item.selected = selected;
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    async fn insert_interest(&self, item: &InterestItem) -> Result<bool> {
        let mut data = self.data.lock().await;

        if data.interests.contains_key(&item.id) {
            return Ok(false);
        }

        data.interests.insert(item.id, item.clone());
        Ok(true)
    }
}
