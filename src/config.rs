//! Construction parameters for [`HashedMap`](crate::HashedMap).

use crate::error::MapError;

/// Bucket count used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 50_000;

/// Load factor above which the table doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashedMapConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
}

impl HashedMapConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, factor: f64) -> Self {
        self.max_load_factor = factor;
        self
    }

    /// Checks both fields without building a table.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        validate_load_factor(self.max_load_factor)
    }
}

impl Default for HashedMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

pub(crate) fn validate_load_factor(factor: f64) -> Result<(), MapError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(MapError::InvalidLoadFactor(factor))
    }
}
