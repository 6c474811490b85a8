//! Outbound frames and their transmit metadata.
//!
//! A [`Frame`] wraps the caller's payload handle (`P`, e.g. a buffer index or
//! pointer wrapper) together with the metadata the transmit path reads and
//! writes: traffic class, control flags, bound transmission context, rate
//! table and completion status.
//!
//! Frames are moved, never cloned, so each one has exactly one owner: the
//! submitter, a ring, or the completion path.

use core::ops::BitOr;

use super::context::WcidIdx;
use crate::internal::constants::{DATA_QUEUE_COUNT, QUEUE_COUNT, TX_MAX_RATES};

// =============================================================================
// Queue Identity
// =============================================================================

/// Hardware ring / traffic class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum QueueId {
    /// Voice (AC_VO)
    Voice = 0,
    /// Video (AC_VI)
    Video = 1,
    /// Best effort (AC_BE), also the fallback for unknown class tags
    BestEffort = 2,
    /// Background (AC_BK)
    Background = 3,
    /// Power-save delivery ring, filled once per beacon window
    PowerSave = 4,
}

impl QueueId {
    /// Every ring, in index order
    pub const ALL: [QueueId; QUEUE_COUNT] = [
        QueueId::Voice,
        QueueId::Video,
        QueueId::BestEffort,
        QueueId::Background,
        QueueId::PowerSave,
    ];

    /// Data rings reachable from [`submit`](crate::TxEngine::submit)
    pub const DATA: [QueueId; DATA_QUEUE_COUNT] = [
        QueueId::Voice,
        QueueId::Video,
        QueueId::BestEffort,
        QueueId::Background,
    ];

    /// Map a class tag to a data ring. Tags outside the data classes return `None`.
    #[must_use]
    pub const fn from_class(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(QueueId::Voice),
            1 => Some(QueueId::Video),
            2 => Some(QueueId::BestEffort),
            3 => Some(QueueId::Background),
            _ => None,
        }
    }

    /// Map a raw ring index, including the power-save ring
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < QUEUE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Ring index
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the ring carries upper-layer traffic subject to backpressure
    #[inline(always)]
    #[must_use]
    pub const fn is_data(self) -> bool {
        !matches!(self, QueueId::PowerSave)
    }

    /// Short ring name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            QueueId::Voice => "vo",
            QueueId::Video => "vi",
            QueueId::BestEffort => "be",
            QueueId::Background => "bk",
            QueueId::PowerSave => "psd",
        }
    }
}

impl core::fmt::Display for QueueId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Control Flags
// =============================================================================

/// Per-frame transmit control flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxFlags(u8);

impl TxFlags {
    /// No flags
    pub const NONE: Self = Self(0);
    /// Hardware assigns the sequence number
    pub const ASSIGN_SEQ: Self = Self(1 << 0);
    /// More buffered frames follow for power-saving receivers
    pub const MORE_DATA: Self = Self(1 << 1);
    /// Member of an A-MPDU; status is implied by the aggregate outcome
    pub const AMPDU: Self = Self(1 << 2);

    /// Raw bits
    #[inline(always)]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every flag in `other` is set
    #[inline(always)]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either operand
    #[inline(always)]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Flags in `self` that are not in `other`
    #[inline(always)]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for TxFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// =============================================================================
// Rates and Status
// =============================================================================

/// One entry of a frame's rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxRate {
    /// Rate index in the rate-control collaborator's table
    pub idx: u8,
    /// Attempts at this rate
    pub count: u8,
}

/// Rate table carried on a frame, tried in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxRates([Option<TxRate>; TX_MAX_RATES]);

impl TxRates {
    /// Empty table (no per-rate information)
    pub const EMPTY: Self = Self([None; TX_MAX_RATES]);

    /// Table with a single rate
    #[must_use]
    pub const fn single(rate: TxRate) -> Self {
        let mut entries = [None; TX_MAX_RATES];
        entries[0] = Some(rate);
        Self(entries)
    }

    /// Build a table from up to [`TX_MAX_RATES`](crate::constants::TX_MAX_RATES)
    /// rates; extra entries are ignored.
    #[must_use]
    pub fn from_slice(rates: &[TxRate]) -> Self {
        let mut table = Self::EMPTY;
        for (slot, rate) in table.0.iter_mut().zip(rates) {
            *slot = Some(*rate);
        }
        table
    }

    /// First rate to try
    #[must_use]
    pub const fn first(&self) -> Option<TxRate> {
        self.0[0]
    }

    /// Check whether the table has no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0[0].is_none()
    }

    /// Iterate over populated entries
    pub fn iter(&self) -> impl Iterator<Item = &TxRate> {
        self.0.iter().map_while(Option::as_ref)
    }
}

/// Frame completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxStatus {
    /// Not yet completed
    #[default]
    Pending,
    /// Delivered (acknowledged, or assumed delivered)
    Acked,
    /// Not delivered
    Failed,
}

// =============================================================================
// Frame
// =============================================================================

/// Outbound frame with transmit metadata
#[derive(Debug)]
pub struct Frame<P> {
    payload: P,
    queue_mapping: u8,
    flags: TxFlags,
    wcid: Option<WcidIdx>,
    rates: TxRates,
    status: TxStatus,
}

impl<P> Frame<P> {
    /// Create a frame tagged with traffic class `class`.
    ///
    /// The tag is not validated here; [`submit`](crate::TxEngine::submit)
    /// clamps unknown tags to best effort.
    #[must_use]
    pub const fn new(payload: P, class: u8) -> Self {
        Self {
            payload,
            queue_mapping: class,
            flags: TxFlags::NONE,
            wcid: None,
            rates: TxRates::EMPTY,
            status: TxStatus::Pending,
        }
    }

    /// Set control flags (builder style)
    #[must_use]
    pub const fn with_flags(mut self, flags: TxFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Payload handle
    #[inline(always)]
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable payload handle
    #[inline(always)]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Release the payload handle
    #[inline]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Raw traffic class tag
    #[inline(always)]
    pub const fn queue_mapping(&self) -> u8 {
        self.queue_mapping
    }

    /// Ring recorded on the frame, if the tag names one
    #[inline]
    pub const fn queue(&self) -> Option<QueueId> {
        QueueId::from_index(self.queue_mapping as usize)
    }

    pub(crate) fn set_queue(&mut self, qid: QueueId) {
        self.queue_mapping = qid as u8;
    }

    /// Control flags
    #[inline(always)]
    pub const fn flags(&self) -> TxFlags {
        self.flags
    }

    /// Set control flags
    #[inline]
    pub fn insert_flags(&mut self, flags: TxFlags) {
        self.flags = self.flags.union(flags);
    }

    /// Clear control flags
    #[inline]
    pub fn remove_flags(&mut self, flags: TxFlags) {
        self.flags = self.flags.difference(flags);
    }

    /// Whether more buffered frames follow
    #[inline(always)]
    pub const fn more_data(&self) -> bool {
        self.flags.contains(TxFlags::MORE_DATA)
    }

    /// Set or clear the more-data marker
    pub fn set_more_data(&mut self, more: bool) {
        if more {
            self.insert_flags(TxFlags::MORE_DATA);
        } else {
            self.remove_flags(TxFlags::MORE_DATA);
        }
    }

    /// Transmission context the frame is bound to
    #[inline(always)]
    pub const fn wcid(&self) -> Option<WcidIdx> {
        self.wcid
    }

    pub(crate) fn bind(&mut self, wcid: WcidIdx) {
        self.wcid = Some(wcid);
    }

    /// Rate table
    #[inline(always)]
    pub const fn rates(&self) -> &TxRates {
        &self.rates
    }

    pub(crate) fn set_rates(&mut self, rates: TxRates) {
        self.rates = rates;
    }

    /// Completion status
    #[inline(always)]
    pub const fn status(&self) -> TxStatus {
        self.status
    }

    /// Drop rate feedback and reset status before a fresh report
    pub(crate) fn clear_status(&mut self) {
        self.rates = TxRates::EMPTY;
        self.status = TxStatus::Pending;
    }

    pub(crate) fn set_status(&mut self, status: TxStatus) {
        self.status = status;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
