//! Transmit engine: ring set, beacon mask, configuration and collaborators.
//!
//! The operations live in sibling modules as `impl` blocks on [`TxEngine`]:
//!
//! - `submit` - frame admission and backpressure ([`TxEngine::submit`])
//! - `complete` - completion handling and wake ([`TxEngine::complete_next`])
//! - [`beacon`](super::beacon) - pre-beacon buffered-frame aggregation
//! - `bind` - flow to transmission-context binding ([`TxEngine::bind_flow`])

use portable_atomic::{AtomicU32, Ordering};

use super::config::TxConfig;
use super::error::{ConfigResult, QueueError, QueueResult};
use super::frame::{Frame, QueueId};
use super::queue::{QueueStats, TxQueue};
use crate::internal::constants::{DEFAULT_BEACON_SLOTS, DEFAULT_TX_DESCRIPTORS, QUEUE_COUNT};
use crate::sync::CriticalSectionCell;

/// Transmit queue engine.
///
/// # Type Parameters
/// * `P` - Frame payload handle
/// * `H` - Host collaborators (see [`hal`](crate::hal)); each operation only
///   requires the traits it calls
/// * `NDESC` - Descriptors per ring (also bounds one beacon window's batch)
/// * `VIFS` - Tail table width, the most beacon-capable interfaces supported
pub struct TxEngine<P, H, const NDESC: usize, const VIFS: usize = DEFAULT_BEACON_SLOTS> {
    pub(crate) queues: [CriticalSectionCell<TxQueue<Frame<P>, NDESC>>; QUEUE_COUNT],
    beacon_mask: AtomicU32,
    pub(crate) config: TxConfig,
    pub(crate) host: H,
}

impl<P, H, const NDESC: usize, const VIFS: usize> TxEngine<P, H, NDESC, VIFS> {
    /// Create an engine with empty rings and no beacon-enabled interfaces.
    ///
    /// # Errors
    /// Returns a [`ConfigError`](super::error::ConfigError) if `config` does
    /// not fit `NDESC` and `VIFS`.
    pub fn new(config: TxConfig, host: H) -> ConfigResult<Self> {
        config.validate(NDESC, VIFS)?;
        Ok(Self {
            queues: [const { CriticalSectionCell::new(TxQueue::new()) }; QUEUE_COUNT],
            beacon_mask: AtomicU32::new(0),
            config,
            host,
        })
    }

    /// Host collaborators
    #[inline(always)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Active configuration
    #[inline(always)]
    pub fn config(&self) -> &TxConfig {
        &self.config
    }

    /// Descriptors per ring
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        NDESC
    }

    /// Occupancy above which the upper layer is stopped, and below which it
    /// is woken
    #[inline(always)]
    pub fn threshold(&self) -> usize {
        self.config.threshold(NDESC)
    }

    /// Frames currently queued on `qid`
    pub fn occupancy(&self, qid: QueueId) -> usize {
        self.queue(qid).with(|q| q.occupancy())
    }

    /// Whether the last backpressure signal for `qid` was a stop
    pub fn is_stopped(&self, qid: QueueId) -> bool {
        self.queue(qid).with(|q| q.is_stopped())
    }

    /// Counters for `qid`
    pub fn stats(&self, qid: QueueId) -> QueueStats {
        self.queue(qid).with(|q| q.stats())
    }

    // =========================================================================
    // Beacon Membership
    // =========================================================================

    /// Add interface `slot` to the beacon window.
    ///
    /// # Errors
    /// - `InvalidSlot` - `slot` is outside the configured beacon slots
    pub fn enable_beacon(&self, slot: u8) -> QueueResult<()> {
        let bit = self.slot_bit(slot)?;
        self.beacon_mask.fetch_or(bit, Ordering::AcqRel);
        debug!("beacon: slot {} enabled", slot);
        Ok(())
    }

    /// Remove interface `slot` from the beacon window.
    ///
    /// # Errors
    /// - `InvalidSlot` - `slot` is outside the configured beacon slots
    pub fn disable_beacon(&self, slot: u8) -> QueueResult<()> {
        let bit = self.slot_bit(slot)?;
        self.beacon_mask.fetch_and(!bit, Ordering::AcqRel);
        debug!("beacon: slot {} disabled", slot);
        Ok(())
    }

    /// Whether interface `slot` takes part in the beacon window
    pub fn beacon_enabled(&self, slot: u8) -> bool {
        self.slot_bit(slot)
            .is_ok_and(|bit| self.beacon_mask.load(Ordering::Acquire) & bit != 0)
    }

    /// Raw beacon membership mask, bit `n` for slot `n`
    pub fn beacon_mask(&self) -> u32 {
        self.beacon_mask.load(Ordering::Acquire)
    }

    fn slot_bit(&self, slot: u8) -> QueueResult<u32> {
        if (slot as usize) < self.config.beacon_slots {
            Ok(1 << slot)
        } else {
            Err(QueueError::InvalidSlot)
        }
    }

    #[inline(always)]
    pub(crate) fn queue(&self, qid: QueueId) -> &CriticalSectionCell<TxQueue<Frame<P>, NDESC>> {
        &self.queues[qid.index()]
    }
}

/// Engine with the default ring depth and tail table width
pub type TxEngineDefault<P, H> = TxEngine<P, H, DEFAULT_TX_DESCRIPTORS, DEFAULT_BEACON_SLOTS>;

/// Engine with shallow rings for memory-constrained systems
pub type TxEngineSmall<P, H> = TxEngine<P, H, 32, 4>;
