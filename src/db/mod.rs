pub mod error;
#[cfg(test)]
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::{MessageStore, RecordStore, Store};
