use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payment store using RocksDB.
///
/// Records live in the `payments` column family, keyed by payment token and
/// JSON encoded.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `payments` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }
}

fn missing_cf() -> GatewayError {
    GatewayError::Storage("Payments column family not found".to_string())
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn save(&self, payment: Payment) -> Result<()> {
        let cf = self.db.cf_handle(CF_PAYMENTS).ok_or_else(missing_cf)?;
        let value = serde_json::to_vec(&payment)?;
        self.db.put_cf(&cf, payment.token.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Payment>> {
        let cf = self.db.cf_handle(CF_PAYMENTS).ok_or_else(missing_cf)?;

        match self.db.get_cf(&cf, token.as_bytes())? {
            Some(bytes) => {
                let payment = serde_json::from_slice(&bytes).map_err(|e| {
                    GatewayError::Storage(format!("Failed to deserialize payment: {}", e))
                })?;
                Ok(Some(payment))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentStatus, ReturnUrls};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");
        assert!(store.db.cf_handle(CF_PAYMENTS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_payment_store() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let mut payment = Payment::new("abc123", "Order", dec!(10.00), "USD", ReturnUrls::default());
        store.save(payment.clone()).await.unwrap();
        assert_eq!(store.get("abc123").await.unwrap().unwrap(), payment);

        payment.confirm("TX1");
        store.save(payment).await.unwrap();
        let retrieved = store.get("abc123").await.unwrap().unwrap();
        assert_eq!(retrieved.status, PaymentStatus::Confirmed);
        assert_eq!(retrieved.total, dec!(10.00));

        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_reopen_keeps_records() {
        let dir = tempdir().unwrap();
        {
            let store = RocksDBStore::open(dir.path()).unwrap();
            store
                .save(Payment::new("t", "d", dec!(1), "USD", ReturnUrls::default()))
                .await
                .unwrap();
        }
        let store = RocksDBStore::open(dir.path()).unwrap();
        assert!(store.get("t").await.unwrap().is_some());
    }
}
