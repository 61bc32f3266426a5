use sentra_core::models::Order;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Order already exists: {0}")]
    Duplicate(String),
}

/// In-memory order store shared across request workers. Insert and the
/// duplicate check happen under one lock, so a colliding id can never
/// silently overwrite an existing record. Orders are never updated or
/// deleted; `list` returns ids in insertion order.
#[derive(Default)]
pub struct OrderStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    orders: HashMap<String, Order>,
    insertion: Vec<String>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.orders.contains_key(&order.order_id) {
            return Err(StoreError::Duplicate(order.order_id));
        }
        inner.insertion.push(order.order_id.clone());
        info!(order_id = %order.order_id, "order persisted");
        inner.orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.lock().orders.get(order_id).cloned()
    }

    /// Order ids in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.lock().insertion.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("order store mutex poisoned")
    }
}
