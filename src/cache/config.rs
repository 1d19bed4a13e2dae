//! Cache configuration.

/// Configuration for an entity cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Number of entities to reserve room for up front.
    /// The cache grows past this as needed; it is a hint, not a limit.
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given initial capacity.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Set initial capacity (builder pattern).
    #[must_use]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sized for guild channels. Guilds cap out at a few hundred.
    pub fn channels() -> Self {
        Self::with_capacity(512)
    }

    /// Sized for guild emojis.
    pub fn emojis() -> Self {
        Self::with_capacity(256)
    }
}
