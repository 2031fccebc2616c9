//! Cache-aside layer for catalog listings.
//!
//! Each catalog keeps at most one cached copy of its "list all" result. An
//! entry dies when either of two independent clocks fires:
//!
//! - **sliding**: no access for `sliding_expiration` (45 s by default)
//! - **absolute**: `absolute_expiration` after creation (1 h by default)
//!
//! Writers must call [`CacheSlot::invalidate`] after every successful
//! mutation so readers never observe a stale listing.
//!
//! ```toml
//! [cache]
//! sliding_expiration_seconds = 45
//! absolute_expiration_seconds = 3600
//! priority = "normal"
//! ```

mod config;
mod entry;
mod registry;
mod slot;

pub use config::{CacheConfig, CachePriority};
pub use entry::{CacheEntry, Expiry};
pub use registry::{CatalogCache, CatalogCaches};
pub use slot::CacheSlot;
