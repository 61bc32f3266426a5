pub mod app_config;
pub mod order_store;

pub use app_config::Config;
pub use order_store::{OrderStore, StoreError};
