//! Transmission contexts for stations, interfaces and per-TID flows.
//!
//! Every frame is bound to a [`Wcid`] before it reaches a ring: the peer's
//! unicast context when the destination is a known station, or the owning
//! interface's group context otherwise.

use portable_atomic::{AtomicBool, Ordering};

/// Index of a transmission context in the hardware's station table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WcidIdx(pub u8);

/// Transmission context (wireless client id).
///
/// Carries the hardware table index and a write-once flag recording that an
/// initial rate selection has been requested for this context.
#[derive(Debug)]
pub struct Wcid {
    idx: WcidIdx,
    rate_set: AtomicBool,
}

impl Wcid {
    /// Create a context with no rate decision yet. Const-compatible.
    #[must_use]
    pub const fn new(idx: WcidIdx) -> Self {
        Self {
            idx,
            rate_set: AtomicBool::new(false),
        }
    }

    /// Hardware table index
    #[inline(always)]
    pub const fn idx(&self) -> WcidIdx {
        self.idx
    }

    /// Whether a rate decision is cached for this context
    #[inline]
    pub fn rate_set(&self) -> bool {
        self.rate_set.load(Ordering::Acquire)
    }

    /// Record a rate decision made outside the transmit path (e.g. a rate
    /// table upload). Later submissions skip initial rate selection.
    #[inline]
    pub fn mark_rate_set(&self) {
        self.rate_set.store(true, Ordering::Release);
    }

    /// Claim the one-time initial rate selection.
    ///
    /// Returns `true` for exactly one caller over the context's lifetime,
    /// even when several submitters race.
    pub(crate) fn claim_rate_selection(&self) -> bool {
        self.rate_set
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Per-peer transmit state
#[derive(Debug)]
pub struct StationContext {
    addr: [u8; 6],
    wcid: Wcid,
}

impl StationContext {
    /// Create a station context bound to unicast context `wcid`
    #[must_use]
    pub const fn new(addr: [u8; 6], wcid: WcidIdx) -> Self {
        Self {
            addr,
            wcid: Wcid::new(wcid),
        }
    }

    /// Peer MAC address
    #[inline(always)]
    pub const fn addr(&self) -> &[u8; 6] {
        &self.addr
    }

    /// Unicast transmission context
    #[inline(always)]
    pub const fn wcid(&self) -> &Wcid {
        &self.wcid
    }
}

/// Per-interface transmit state
#[derive(Debug)]
pub struct InterfaceContext {
    slot: u8,
    addr: [u8; 6],
    group: Wcid,
}

impl InterfaceContext {
    /// Create an interface context.
    ///
    /// `slot` is the interface's hardware slot; it selects the beacon slot,
    /// the beacon mask bit and the tail table entry.
    #[must_use]
    pub const fn new(slot: u8, addr: [u8; 6], group: WcidIdx) -> Self {
        Self {
            slot,
            addr,
            group: Wcid::new(group),
        }
    }

    /// Hardware interface slot
    #[inline(always)]
    pub const fn slot(&self) -> u8 {
        self.slot
    }

    /// Interface MAC address
    #[inline(always)]
    pub const fn addr(&self) -> &[u8; 6] {
        &self.addr
    }

    /// Group (broadcast/multicast) transmission context
    #[inline(always)]
    pub const fn group(&self) -> &Wcid {
        &self.group
    }
}

/// Resolve the transmission context for a destination: the station's unicast
/// context if known, else the interface's group context.
#[inline]
pub(crate) fn resolve<'a>(vif: &'a InterfaceContext, sta: Option<&'a StationContext>) -> &'a Wcid {
    match sta {
        Some(sta) => sta.wcid(),
        None => vif.group(),
    }
}

/// Per-TID software queue handle.
///
/// Created by the upper layer for each station/TID pair (and one per
/// interface for group traffic), then bound with
/// [`bind_flow`](crate::TxEngine::bind_flow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxFlow {
    tid: u8,
    wcid: Option<WcidIdx>,
}

impl TxFlow {
    /// Create an unbound flow for traffic identifier `tid`
    #[must_use]
    pub const fn new(tid: u8) -> Self {
        Self { tid, wcid: None }
    }

    /// Traffic identifier
    #[inline(always)]
    pub const fn tid(&self) -> u8 {
        self.tid
    }

    /// Bound transmission context, if any
    #[inline(always)]
    pub const fn wcid(&self) -> Option<WcidIdx> {
        self.wcid
    }

    pub(crate) fn bind(&mut self, wcid: WcidIdx) {
        self.wcid = Some(wcid);
    }
}
