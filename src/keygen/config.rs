use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Local settings of the key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeygenConfig {
    /// The number of worker threads verifying DLN proofs.
    ///
    /// Defaults to the available parallelism of the machine.
    pub concurrency: NonZeroUsize,
}

impl KeygenConfig {
    /// Creates a configuration with the given number of verification workers.
    pub fn with_concurrency(concurrency: NonZeroUsize) -> Self {
        Self { concurrency }
    }
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            concurrency: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}
