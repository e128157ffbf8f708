// ── Cache store ──

pub mod cache;
pub mod key;

pub use cache::{PageSnapshot, ResourceCache};
pub use key::QueryKey;
