// handlers/protected - bearer token required
//
// Routed behind `jwt_auth_middleware`, so every handler here can rely on an
// `AuthUser` extension being present.
pub mod posts;

pub use posts::create_post;
pub use posts::delete_post;
pub use posts::list_user_posts;
