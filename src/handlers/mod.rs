// handlers/mod.rs - two security tiers
//
// Public (no auth): listing and single-post reads
// Protected (bearer token): create, delete, per-user listing
pub mod protected;
pub mod public;
pub mod utils;
