//! redb-based persistence for the portal
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `PurchaseOrder` | Purchase orders |
//! | `order_items` | `item_id` | `PurchaseOrderItem` | Immutable line items |
//! | `action_requests` | `action_id` | `OrderActionRequest` | Action request ledger |
//! | `vendors` | `vendor_id` | `Vendor` | Vendor master data |
//! | `metrics` | `metric_id` | `PerformanceMetric` | Performance history |
//! | `documents` | `document_id` | `VendorDocument` | Compliance documents |
//!
//! Values are JSON-serialized. Commits are durable as soon as `commit()`
//! returns; multi-entity updates (resolution approving a CANCEL while
//! cancelling the order) share a single [`WriteTransaction`] so either both
//! records land or neither does.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use shared::error::ErrorCode;
use shared::models::{
    OrderActionRequest, PerformanceMetric, PurchaseOrder, PurchaseOrderItem, RequestStatus, Vendor,
    VendorDocument,
};
use shared::AppError;

const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");
const ORDER_ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("order_items");
const ACTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("action_requests");
const VENDORS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("vendors");
const METRICS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metrics");
const DOCUMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            // Corrupt or undecodable records are permanent faults
            StoreError::Serialization(e) => {
                AppError::with_message(ErrorCode::StorageError, format!("Bad stored record: {}", e))
            }
            // Everything else may clear on retry
            other => AppError::transient(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Portal storage backed by redb
#[derive(Clone)]
pub struct PortalStore {
    db: Arc<Database>,
}

impl PortalStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_ITEMS_TABLE)?;
            let _ = write_txn.open_table(ACTIONS_TABLE)?;
            let _ = write_txn.open_table(VENDORS_TABLE)?;
            let _ = write_txn.open_table(METRICS_TABLE)?;
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Orders ==========

    /// Store an order (within transaction)
    pub fn store_order(&self, txn: &WriteTransaction, order: &PurchaseOrder) -> StoreResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Store an order in its own transaction
    pub fn put_order(&self, order: &PurchaseOrder) -> StoreResult<()> {
        let txn = self.begin_write()?;
        self.store_order(&txn, order)?;
        txn.commit()?;
        Ok(())
    }

    /// Get an order by id (read-only)
    pub fn get_order(&self, order_id: &str) -> StoreResult<Option<PurchaseOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Option<PurchaseOrder>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all orders belonging to a vendor
    pub fn get_orders_for_vendor(&self, vendor_id: &str) -> StoreResult<Vec<PurchaseOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: PurchaseOrder = serde_json::from_slice(value.value())?;
            if order.vendor_id == vendor_id {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    // ========== Order Items ==========

    /// Store a line item in its own transaction
    pub fn put_item(&self, item: &PurchaseOrderItem) -> StoreResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(ORDER_ITEMS_TABLE)?;
            let value = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get all line items of an order
    pub fn get_items_for_order(&self, order_id: &str) -> StoreResult<Vec<PurchaseOrderItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_ITEMS_TABLE)?;

        let mut items = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let item: PurchaseOrderItem = serde_json::from_slice(value.value())?;
            if item.purchase_order_id == order_id {
                items.push(item);
            }
        }
        Ok(items)
    }

    // ========== Action Requests ==========

    /// Store an action request (within transaction)
    pub fn store_action(
        &self,
        txn: &WriteTransaction,
        action: &OrderActionRequest,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(ACTIONS_TABLE)?;
        let value = serde_json::to_vec(action)?;
        table.insert(action.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Store an action request in its own transaction
    pub fn put_action(&self, action: &OrderActionRequest) -> StoreResult<()> {
        let txn = self.begin_write()?;
        self.store_action(&txn, action)?;
        txn.commit()?;
        Ok(())
    }

    /// Get an action request by id (read-only)
    pub fn get_action(&self, action_id: &str) -> StoreResult<Option<OrderActionRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACTIONS_TABLE)?;

        match table.get(action_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an action request by id (within transaction)
    pub fn get_action_txn(
        &self,
        txn: &WriteTransaction,
        action_id: &str,
    ) -> StoreResult<Option<OrderActionRequest>> {
        let table = txn.open_table(ACTIONS_TABLE)?;

        match table.get(action_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all pending action requests for a vendor
    pub fn get_pending_actions_for_vendor(
        &self,
        vendor_id: &str,
    ) -> StoreResult<Vec<OrderActionRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACTIONS_TABLE)?;

        let mut actions = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let action: OrderActionRequest = serde_json::from_slice(value.value())?;
            if action.vendor_id == vendor_id && action.status == RequestStatus::Pending {
                actions.push(action);
            }
        }
        Ok(actions)
    }

    /// Get the full action request history of an order
    pub fn get_actions_for_order(&self, order_id: &str) -> StoreResult<Vec<OrderActionRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACTIONS_TABLE)?;

        let mut actions = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let action: OrderActionRequest = serde_json::from_slice(value.value())?;
            if action.purchase_order_id == order_id {
                actions.push(action);
            }
        }
        Ok(actions)
    }

    // ========== Vendors ==========

    /// Store a vendor record in its own transaction
    pub fn put_vendor(&self, vendor: &Vendor) -> StoreResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(VENDORS_TABLE)?;
            let value = serde_json::to_vec(vendor)?;
            table.insert(vendor.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a vendor by id
    pub fn get_vendor(&self, vendor_id: &str) -> StoreResult<Option<Vendor>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VENDORS_TABLE)?;

        match table.get(vendor_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Performance Metrics ==========

    /// Store a performance snapshot in its own transaction
    pub fn put_metric(&self, metric: &PerformanceMetric) -> StoreResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(METRICS_TABLE)?;
            let value = serde_json::to_vec(metric)?;
            table.insert(metric.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a vendor's metric history, oldest first
    ///
    /// Sorted by `recorded_at` with the id as tiebreaker, so two snapshots
    /// recorded in the same instant both survive with a stable order.
    pub fn get_metrics_for_vendor(&self, vendor_id: &str) -> StoreResult<Vec<PerformanceMetric>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(METRICS_TABLE)?;

        let mut metrics: Vec<PerformanceMetric> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let metric: PerformanceMetric = serde_json::from_slice(value.value())?;
            if metric.vendor_id == vendor_id {
                metrics.push(metric);
            }
        }
        metrics.sort_by(|a, b| {
            a.recorded_at
                .cmp(&b.recorded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(metrics)
    }

    /// Get the most recently recorded metric for a vendor
    pub fn get_latest_metric(&self, vendor_id: &str) -> StoreResult<Option<PerformanceMetric>> {
        Ok(self.get_metrics_for_vendor(vendor_id)?.pop())
    }

    // ========== Documents ==========

    /// Store a compliance document in its own transaction
    pub fn put_document(&self, document: &VendorDocument) -> StoreResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(DOCUMENTS_TABLE)?;
            let value = serde_json::to_vec(document)?;
            table.insert(document.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get all documents belonging to a vendor
    pub fn get_documents_for_vendor(&self, vendor_id: &str) -> StoreResult<Vec<VendorDocument>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;

        let mut documents = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let document: VendorDocument = serde_json::from_slice(value.value())?;
            if document.vendor_id == vendor_id {
                documents.push(document);
            }
        }
        Ok(documents)
    }
}
