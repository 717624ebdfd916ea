pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod store;

pub use initialize::init_db;
pub use pool::DbPool;
pub use store::{RecordStore, SqliteStore};
