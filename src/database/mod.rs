pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryUserStore;
pub use models::user::{NewUser, User};
pub use postgres::PgUserStore;
pub use store::UserStore;
