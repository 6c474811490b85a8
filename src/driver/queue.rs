//! Bounded transmit ring.
//!
//! A `TxQueue` is the software view of one hardware descriptor ring: a FIFO
//! of in-flight frames, its occupancy, and the backpressure state last
//! signalled to the upper layer. It has no locking of its own; the engine
//! wraps each ring in a [`CriticalSectionCell`](crate::sync::CriticalSectionCell)
//! and every method here runs inside that critical section.

use crate::internal::ring::FrameRing;

/// Per-ring counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueStats {
    /// Frames appended
    pub enqueued: u32,
    /// Frames taken for completion
    pub completed: u32,
    /// Stop signals issued
    pub stops: u32,
    /// Wake signals issued
    pub wakes: u32,
    /// Frames refused because every descriptor was in use
    pub overflows: u32,
}

/// Bounded FIFO of in-flight frames
pub(crate) struct TxQueue<F, const N: usize> {
    ring: FrameRing<F, N>,
    stopped: bool,
    stats: QueueStats,
}

impl<F, const N: usize> TxQueue<F, N> {
    /// Create an empty ring. Const-compatible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: FrameRing::new(),
            stopped: false,
            stats: QueueStats {
                enqueued: 0,
                completed: 0,
                stops: 0,
                wakes: 0,
                overflows: 0,
            },
        }
    }

    /// Append at the tail.
    ///
    /// Hands the frame back if every descriptor is in use; occupancy never
    /// exceeds capacity.
    pub fn append(&mut self, frame: F) -> Result<(), F> {
        match self.ring.push_back(frame) {
            Ok(()) => {
                self.stats.enqueued = self.stats.enqueued.wrapping_add(1);
                Ok(())
            }
            Err(frame) => {
                self.stats.overflows = self.stats.overflows.wrapping_add(1);
                Err(frame)
            }
        }
    }

    /// Remove the oldest frame
    pub fn take_next(&mut self) -> Option<F> {
        let frame = self.ring.pop_front()?;
        self.stats.completed = self.stats.completed.wrapping_add(1);
        Some(frame)
    }

    /// Frames currently in the ring
    #[inline(always)]
    pub const fn occupancy(&self) -> usize {
        self.ring.len()
    }

    /// Whether the last backpressure signal was a stop
    #[inline(always)]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Counters since creation
    #[inline(always)]
    pub const fn stats(&self) -> QueueStats {
        self.stats
    }

    /// Record a stop signal. Returns `true` if the ring was running.
    pub(crate) fn note_stop(&mut self) -> bool {
        self.stats.stops = self.stats.stops.wrapping_add(1);
        !core::mem::replace(&mut self.stopped, true)
    }

    /// Record a wake signal. Returns `true` if the ring was stopped.
    pub(crate) fn note_wake(&mut self) -> bool {
        self.stats.wakes = self.stats.wakes.wrapping_add(1);
        core::mem::replace(&mut self.stopped, false)
    }

    /// Iterate over queued frames, oldest first
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.ring.iter()
    }
}

impl<F, const N: usize> Default for TxQueue<F, N> {
    fn default() -> Self {
        Self::new()
    }
}
