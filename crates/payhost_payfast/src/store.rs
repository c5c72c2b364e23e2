// --- File: crates/payhost_payfast/src/store.rs ---
//! Order/subscription state and the store capability the IPN verifier
//! reads and mutates.
//!
//! The store is injected as a trait object so the verifier can be tested
//! without a real database. A production implementation would back this
//! with a persistent store and per-key transactions.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Status of a stored record. Orders move Pending -> Paid, subscriptions
/// Pending -> Active; both transitions are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Pending,
    Paid,
    Active,
}

/// A one-off payment attempt, keyed by its merchant payment id.
#[derive(Debug, Clone)]
pub struct Order {
    pub amount: f64,
    pub item_name: String,
    pub email: Option<String>,
    pub status: RecordStatus,
}

/// A recurring billing agreement, keyed by its merchant payment id.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub user_id: Option<String>,
    pub amount: f64,
    pub item_name: String,
    pub email: Option<String>,
    pub frequency: String,
    pub status: RecordStatus,
}

/// What a payment id resolves to. An id belongs to exactly one collection;
/// that uniqueness is the id generator's job, not enforced here.
#[derive(Debug, Clone)]
pub enum StoredRecord {
    Order(Order),
    Subscription(Subscription),
}

impl StoredRecord {
    pub fn amount(&self) -> f64 {
        match self {
            StoredRecord::Order(order) => order.amount,
            StoredRecord::Subscription(subscription) => subscription.amount,
        }
    }

    pub fn status(&self) -> RecordStatus {
        match self {
            StoredRecord::Order(order) => order.status,
            StoredRecord::Subscription(subscription) => subscription.status,
        }
    }
}

/// Keyed state holder for orders and subscriptions.
///
/// Implementations must provide atomic per-key read-modify-write: two
/// concurrent `set_status` calls for the same key may interleave in any
/// order but must never lose an update.
pub trait PaymentStore: Send + Sync {
    fn insert_order(&self, payment_id: &str, order: Order);
    fn insert_subscription(&self, payment_id: &str, subscription: Subscription);
    fn get(&self, payment_id: &str) -> Option<StoredRecord>;
    /// Sets the status of an existing record. Returns false when the
    /// payment id is unknown.
    fn set_status(&self, payment_id: &str, status: RecordStatus) -> bool;
}

/// Demo-grade store: a mutex-guarded map. The mutex makes every
/// read-modify-write atomic across keys, which is stronger than the
/// per-key minimum the verifier relies on.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<String, StoredRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-only snapshot of every record. The store contract has no
    /// listing operation; handlers tests need one to assert side effects.
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Vec<(String, StoredRecord)> {
        let records = self.records.lock().expect("store mutex poisoned");
        records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }
}

impl PaymentStore for InMemoryStore {
    fn insert_order(&self, payment_id: &str, order: Order) {
        let mut records = self.records.lock().expect("store mutex poisoned");
        records.insert(payment_id.to_string(), StoredRecord::Order(order));
    }

    fn insert_subscription(&self, payment_id: &str, subscription: Subscription) {
        let mut records = self.records.lock().expect("store mutex poisoned");
        records.insert(payment_id.to_string(), StoredRecord::Subscription(subscription));
    }

    fn get(&self, payment_id: &str) -> Option<StoredRecord> {
        let records = self.records.lock().expect("store mutex poisoned");
        records.get(payment_id).cloned()
    }

    fn set_status(&self, payment_id: &str, status: RecordStatus) -> bool {
        let mut records = self.records.lock().expect("store mutex poisoned");
        match records.get_mut(payment_id) {
            Some(StoredRecord::Order(order)) => {
                order.status = status;
                true
            }
            Some(StoredRecord::Subscription(subscription)) => {
                subscription.status = status;
                true
            }
            None => false,
        }
    }
}

/// Mints a merchant payment id from millisecond time plus a random
/// suffix. Collisions would corrupt reconciliation, so the suffix comes
/// from a v4 UUID rather than a small counter.
pub fn new_payment_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}
