//! Error types for the transmit engine
//!
//! Errors are organized by domain:
//! - [`ConfigError`]: Engine construction and configuration failures
//! - [`QueueError`]: Ring admission and beacon slot failures
//!
//! The unified [`Error`] enum wraps both domains. Note that most transmit
//! paths never fail: misclassified frames are clamped, and a nearly full ring
//! is handled with backpressure rather than an error.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
///
/// Returned by [`TxEngine::new`](crate::TxEngine::new) when the configuration
/// does not fit the engine's ring depth or interface count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Headroom must be smaller than the ring capacity
    InvalidHeadroom,
    /// Aggregation pass cap must be at least one
    InvalidPassLimit,
    /// Beacon slots must be non-zero and fit the tail table and beacon mask
    InvalidBeaconSlots,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidHeadroom => "headroom not below ring capacity",
            ConfigError::InvalidPassLimit => "aggregation pass cap is zero",
            ConfigError::InvalidBeaconSlots => "invalid beacon slot count",
        }
    }
}

// =============================================================================
// Queue Errors
// =============================================================================

/// Ring admission errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Every descriptor in the ring is in use.
    ///
    /// Only reachable when the upper layer keeps submitting after a stop
    /// signal. The frame has already been reported as failed.
    Full,
    /// Interface slot is outside the configured beacon slots
    InvalidSlot,
}

impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueueError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            QueueError::Full => "no descriptors available",
            QueueError::InvalidSlot => "interface slot out of range",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Queue error
    Queue(QueueError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Queue(e) => write!(f, "queue: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<QueueError> for Error {
    fn from(e: QueueError) -> Self {
        Error::Queue(e)
    }
}

/// Result type alias for engine operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for queue operations
pub type QueueResult<T> = core::result::Result<T, QueueError>;

// =============================================================================
// Unit Tests
// =============================================================================
