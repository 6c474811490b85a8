//! Testing utilities and mock implementations
//!
//! Host-side stand-ins for every collaborator the engine talks to, recording
//! each call so tests can assert on the exact sequence of doorbells,
//! backpressure signals and reports.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

#[cfg(feature = "async")]
use core::task::Waker;
#[cfg(feature = "async")]
use std::sync::Arc;
#[cfg(feature = "async")]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
#[cfg(feature = "async")]
use std::task::Wake;
use std::vec::Vec;

use crate::driver::context::{InterfaceContext, StationContext, TxFlow, WcidIdx};
use crate::driver::engine::TxEngine;
use crate::driver::frame::{Frame, QueueId, TxFlags, TxRates, TxStatus};
use crate::hal::{
    BeaconFramer, FlowControl, HardwareDoorbell, PowerSaveBuffer, RateControl, StatusReporter,
};
use crate::internal::constants::{MAX_BEACON_SLOTS, QUEUE_COUNT};

/// Engine used across unit tests: 32 descriptors per ring (threshold 24
/// with the default headroom), 8 interface slots.
pub type TestEngine = TxEngine<u32, MockHost, 32, 8>;

/// First payload handed out for buffered group frames
const BUFFERED_PAYLOAD_BASE: u32 = 1000;

/// Interface context for `slot` with group context `128 + slot`
pub fn vif(slot: u8) -> InterfaceContext {
    InterfaceContext::new(slot, [0x02, 0, 0, 0, 0, slot], WcidIdx(128 + slot))
}

/// Station context using unicast context `idx`
pub fn sta(idx: u8) -> StationContext {
    StationContext::new([0x02, 0, 0, 0, 1, idx], WcidIdx(idx))
}

// =============================================================================
// Mock Host
// =============================================================================

#[derive(Debug, Default)]
struct MockState {
    kicks: Vec<QueueId>,
    stops: Vec<QueueId>,
    wakes: Vec<QueueId>,
    stopped: [bool; QUEUE_COUNT],
    reported: Vec<(u32, TxStatus)>,
    last_report_rates: Option<TxRates>,
    discarded: Vec<u32>,
    beacons: Vec<(u8, TxFlags)>,
    beacon_template: bool,
    initial_rates: TxRates,
    rate_requests: usize,
    flows: Vec<(u8, WcidIdx)>,
    pending: [usize; MAX_BEACON_SLOTS],
    endless: [bool; MAX_BEACON_SLOTS],
    chains: Vec<(u8, u8)>,
    next_payload: u32,
}

/// Mock host implementing every collaborator trait
///
/// # Example
///
/// ```ignore
/// let engine = TestEngine::new(TxConfig::new(), MockHost::new()).unwrap();
/// engine.host().buffer(0, 2);
/// engine.pre_tbtt(&[&vif(0)]);
/// assert_eq!(engine.occupancy(QueueId::PowerSave), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockHost {
    state: Mutex<MockState>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Rate table returned by `initial_rates`
    pub fn set_initial_rates(&self, rates: TxRates) {
        self.state().initial_rates = rates;
    }

    /// Make `render` produce a beacon for every interface
    pub fn set_beacon_template(&self, enabled: bool) {
        self.state().beacon_template = enabled;
    }

    /// Queue `count` buffered group frames for interface `slot`
    pub fn buffer(&self, slot: u8, count: usize) {
        self.state().pending[slot as usize] += count;
    }

    /// Each frame drained for `from` makes one more available for `to`
    pub fn chain(&self, from: u8, to: u8) {
        self.state().chains.push((from, to));
    }

    /// Interface `slot` never runs out of buffered frames
    pub fn set_endless(&self, slot: u8) {
        self.state().endless[slot as usize] = true;
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn kicks(&self) -> Vec<QueueId> {
        self.state().kicks.clone()
    }

    pub fn stops(&self) -> Vec<QueueId> {
        self.state().stops.clone()
    }

    pub fn wakes(&self) -> Vec<QueueId> {
        self.state().wakes.clone()
    }

    /// Level of the last backpressure signal for `qid`
    pub fn is_stopped(&self, qid: QueueId) -> bool {
        self.state().stopped[qid.index()]
    }

    /// (payload, status) of every reported frame, in report order
    pub fn reported(&self) -> Vec<(u32, TxStatus)> {
        self.state().reported.clone()
    }

    /// Rate table carried by the most recently reported frame
    pub fn last_report_rates(&self) -> Option<TxRates> {
        self.state().last_report_rates
    }

    pub fn discarded(&self) -> Vec<u32> {
        self.state().discarded.clone()
    }

    /// Slots whose beacon was programmed, in order
    pub fn beacons(&self) -> Vec<u8> {
        self.state().beacons.iter().map(|(slot, _)| *slot).collect()
    }

    /// Whether every programmed beacon asked for sequence assignment
    pub fn beacons_assign_seq(&self) -> bool {
        let state = self.state();
        !state.beacons.is_empty()
            && state
                .beacons
                .iter()
                .all(|(_, flags)| flags.contains(TxFlags::ASSIGN_SEQ))
    }

    pub fn rate_requests(&self) -> usize {
        self.state().rate_requests
    }

    /// (tid, wcid) of every flow passed to `init_flow`
    pub fn flows(&self) -> Vec<(u8, WcidIdx)> {
        self.state().flows.clone()
    }

    /// Buffered frames still waiting for interface `slot`
    pub fn pending(&self, slot: u8) -> usize {
        self.state().pending[slot as usize]
    }
}

impl RateControl<u32> for MockHost {
    fn initial_rates(
        &self,
        _vif: &InterfaceContext,
        _sta: Option<&StationContext>,
        _frame: &Frame<u32>,
    ) -> TxRates {
        let mut state = self.state();
        state.rate_requests += 1;
        state.initial_rates
    }
}

impl HardwareDoorbell<u32> for MockHost {
    fn kick(&self, qid: QueueId) {
        self.state().kicks.push(qid);
    }

    fn set_beacon(&self, slot: u8, frame: Frame<u32>) {
        self.state().beacons.push((slot, frame.flags()));
    }

    fn init_flow(&self, flow: &TxFlow) {
        if let Some(wcid) = flow.wcid() {
            self.state().flows.push((flow.tid(), wcid));
        }
    }
}

impl FlowControl for MockHost {
    fn stop(&self, qid: QueueId) {
        let mut state = self.state();
        state.stops.push(qid);
        state.stopped[qid.index()] = true;
    }

    fn wake(&self, qid: QueueId) {
        let mut state = self.state();
        state.wakes.push(qid);
        state.stopped[qid.index()] = false;
    }
}

impl StatusReporter<u32> for MockHost {
    fn report(&self, frame: Frame<u32>) {
        let mut state = self.state();
        state.last_report_rates = Some(*frame.rates());
        state.reported.push((*frame.payload(), frame.status()));
    }

    fn discard(&self, frame: Frame<u32>) {
        self.state().discarded.push(frame.into_payload());
    }
}

impl BeaconFramer<u32> for MockHost {
    fn render(&self, vif: &InterfaceContext) -> Option<Frame<u32>> {
        self.state()
            .beacon_template
            .then(|| Frame::new(u32::from(vif.slot()), QueueId::Voice as u8))
    }
}

impl PowerSaveBuffer<u32> for MockHost {
    fn drain(&self, vif: &InterfaceContext) -> Option<Frame<u32>> {
        let mut state = self.state();
        let slot = vif.slot();

        if !state.endless[slot as usize] {
            if state.pending[slot as usize] == 0 {
                return None;
            }
            state.pending[slot as usize] -= 1;
        }

        let released: Vec<u8> = state
            .chains
            .iter()
            .filter(|(from, _)| *from == slot)
            .map(|(_, to)| *to)
            .collect();
        for to in released {
            state.pending[to as usize] += 1;
        }

        let payload = BUFFERED_PAYLOAD_BASE + state.next_payload;
        state.next_payload += 1;
        Some(Frame::new(payload, QueueId::BestEffort as u8))
    }
}

// =============================================================================
// Wake Counter
// =============================================================================

/// Waker that counts how often it was woken
#[cfg(feature = "async")]
pub struct WakeCounter {
    inner: Arc<CountingWake>,
}

#[cfg(feature = "async")]
struct CountingWake {
    count: AtomicUsize,
}

#[cfg(feature = "async")]
impl Wake for CountingWake {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(feature = "async")]
impl WakeCounter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CountingWake {
                count: AtomicUsize::new(0),
            }),
        }
    }

    pub fn waker(&self) -> Waker {
        Waker::from(Arc::clone(&self.inner))
    }

    /// Wakes observed so far
    pub fn count(&self) -> usize {
        self.inner.count.load(Ordering::SeqCst)
    }
}
