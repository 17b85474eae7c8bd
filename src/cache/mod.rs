//! Cache Module
//!
//! Cache-aside helpers layered over a `KvStore`.

mod aside;
mod stats;

#[cfg(test)]
mod test_support;

pub use aside::CacheAside;
pub use stats::{HelperStats, StatsSnapshot};

// == Public Constants ==
/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
