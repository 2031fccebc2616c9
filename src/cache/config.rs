//! Cache configuration.
//!
//! Controls the expiration policy of the per-catalog list caches via the
//! `[cache]` section of `carapp.toml`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_SLIDING_EXPIRATION_SECS: u64 = 45;
const DEFAULT_ABSOLUTE_EXPIRATION_SECS: u64 = 3600;

/// Eviction hint carried by every entry.
///
/// Advisory only: the list caches hold a single entry per catalog and never
/// evict under memory pressure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePriority {
    Low,
    #[default]
    Normal,
    High,
    NeverRemove,
}

impl CachePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            CachePriority::Low => "low",
            CachePriority::Normal => "normal",
            CachePriority::High => "high",
            CachePriority::NeverRemove => "never_remove",
        }
    }
}

impl fmt::Display for CachePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(CachePriority::Low),
            "normal" => Ok(CachePriority::Normal),
            "high" => Ok(CachePriority::High),
            "never_remove" | "neverremove" => Ok(CachePriority::NeverRemove),
            other => Err(format!(
                "unknown priority `{other}` (expected low|normal|high|never_remove)"
            )),
        }
    }
}

/// Expiration policy applied to each cached catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Idle time after which an entry expires; reset on every hit.
    pub sliding_expiration: Duration,
    /// Lifetime measured from creation, regardless of access.
    pub absolute_expiration: Duration,
    pub priority: CachePriority,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sliding_expiration: Duration::from_secs(DEFAULT_SLIDING_EXPIRATION_SECS),
            absolute_expiration: Duration::from_secs(DEFAULT_ABSOLUTE_EXPIRATION_SECS),
            priority: CachePriority::Normal,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            sliding_expiration: settings.sliding_expiration,
            absolute_expiration: settings.absolute_expiration,
            priority: settings.priority,
        }
    }
}
