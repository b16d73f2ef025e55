// handlers/public - no authentication required
pub mod posts;

pub use posts::get_post;
pub use posts::list_posts;
