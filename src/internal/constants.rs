//! Centralized Constants
//!
//! Single source of truth for the numbers the transmit path depends on.
//!
//! # Organization
//!
//! - **Queue layout**: ring counts and default ring depth
//! - **Flow control**: reserved descriptor headroom
//! - **Beacon window**: tail table width and aggregation pass cap
//! - **Rate control**: rate table size carried on each frame

// =============================================================================
// Queue Layout
// =============================================================================

/// Number of data rings (voice, video, best effort, background)
pub const DATA_QUEUE_COUNT: usize = 4;

/// Total rings managed by the engine (data rings plus power-save delivery)
pub const QUEUE_COUNT: usize = DATA_QUEUE_COUNT + 1;

/// Default descriptors per ring
pub const DEFAULT_TX_DESCRIPTORS: usize = 128;

// =============================================================================
// Flow Control
// =============================================================================

/// Descriptors held back from the upper layer.
///
/// The upper layer is stopped once occupancy exceeds `capacity - QUEUE_HEADROOM`
/// and woken once it drops below the same threshold.
pub const QUEUE_HEADROOM: usize = 8;

// =============================================================================
// Beacon Window
// =============================================================================

/// Default number of beacon-capable interface slots (tail table width)
pub const DEFAULT_BEACON_SLOTS: usize = 8;

/// Upper bound on beacon slots, set by the width of the beacon mask
pub const MAX_BEACON_SLOTS: usize = 32;

/// Default cap on collection passes per beacon window
pub const DEFAULT_MAX_AGGREGATION_PASSES: usize = 32;

// =============================================================================
// Rate Control
// =============================================================================

/// Rate entries carried on each frame
pub const TX_MAX_RATES: usize = 4;
