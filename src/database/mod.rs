pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;
pub use store::TaskStore;
