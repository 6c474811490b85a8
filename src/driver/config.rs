//! Configuration types for the transmit engine

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_BEACON_SLOTS, DEFAULT_MAX_AGGREGATION_PASSES, MAX_BEACON_SLOTS, QUEUE_HEADROOM,
};

/// Transmit engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxConfig {
    /// Descriptors reserved above the backpressure threshold.
    /// The upper layer is stopped once occupancy exceeds `capacity - headroom`.
    pub headroom: usize,
    /// Maximum collection passes per beacon window. When reached, the frames
    /// collected so far are queued and the rest wait for the next window.
    pub max_aggregation_passes: usize,
    /// Number of beacon-capable interface slots (tail table width in use)
    pub beacon_slots: usize,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TxConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headroom: QUEUE_HEADROOM,
            max_aggregation_passes: DEFAULT_MAX_AGGREGATION_PASSES,
            beacon_slots: DEFAULT_BEACON_SLOTS,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the reserved descriptor headroom
    #[must_use]
    pub const fn with_headroom(mut self, headroom: usize) -> Self {
        self.headroom = headroom;
        self
    }

    /// Set the cap on aggregation passes per beacon window
    #[must_use]
    pub const fn with_max_aggregation_passes(mut self, passes: usize) -> Self {
        self.max_aggregation_passes = passes;
        self
    }

    /// Set the number of beacon-capable interface slots
    #[must_use]
    pub const fn with_beacon_slots(mut self, slots: usize) -> Self {
        self.beacon_slots = slots;
        self
    }

    /// Backpressure threshold for a ring of `capacity` descriptors
    #[inline(always)]
    #[must_use]
    pub const fn threshold(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.headroom)
    }

    /// Check the configuration against a ring depth and tail table width.
    ///
    /// # Errors
    /// - `InvalidHeadroom` - headroom is not below `capacity`
    /// - `InvalidPassLimit` - pass cap is zero
    /// - `InvalidBeaconSlots` - slots are zero, exceed `max_interfaces`, or
    ///   exceed the beacon mask width
    pub const fn validate(&self, capacity: usize, max_interfaces: usize) -> ConfigResult<()> {
        if self.headroom >= capacity {
            return Err(ConfigError::InvalidHeadroom);
        }
        if self.max_aggregation_passes == 0 {
            return Err(ConfigError::InvalidPassLimit);
        }
        if self.beacon_slots == 0
            || self.beacon_slots > max_interfaces
            || self.beacon_slots > MAX_BEACON_SLOTS
        {
            return Err(ConfigError::InvalidBeaconSlots);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
