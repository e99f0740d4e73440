use serde::Deserialize;
use serde::Deserializer;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Tunables for an [`Engine`](crate::Engine).
///
/// Deserializes from camelCase JSON; missing keys take their defaults.
/// `timeout` is given in milliseconds:
///
/// ```json
/// { "maxParallelism": 4, "maxDepth": 12, "timeout": 2500 }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Upper bound on resolver calls in flight at once within one request.
    /// Values below 1 behave as 1, and values above what a semaphore can
    /// hold behave as that maximum.
    pub max_parallelism: usize,

    /// Maximum selection-set nesting depth. `0` disables the check.
    pub max_depth: usize,

    /// Deadline for a request, measured from the start of execution.
    #[serde(deserialize_with = "deserialize_timeout_ms")]
    pub timeout: Option<Duration>,
}

impl EngineConfig {
    pub const DEFAULT_MAX_PARALLELISM: usize = 10;

    /// `max_parallelism` clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn parallelism(&self) -> usize {
        self.max_parallelism.clamp(1, Semaphore::MAX_PERMITS)
    }

    pub fn with_max_parallelism(mut self, max_parallelism: usize) -> Self {
        self.max_parallelism = max_parallelism;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parallelism: Self::DEFAULT_MAX_PARALLELISM,
            max_depth: 0,
            timeout: None,
        }
    }
}

fn deserialize_timeout_ms<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}
