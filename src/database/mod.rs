pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{connect_pool, DatabaseError};
pub use memory::MemoryPostStore;
pub use models::{NewPost, Post, PostWithUser};
pub use repository::PgPostStore;
pub use store::PostStore;
