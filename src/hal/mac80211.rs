//! Upper-layer stack services consumed by the transmit engine.

use crate::driver::context::{InterfaceContext, StationContext};
use crate::driver::frame::{Frame, QueueId, TxRates};

/// Rate-control selection
pub trait RateControl<P> {
    /// Pick the initial rate table for a context's first frame.
    ///
    /// Called at most once per transmission context, before the frame is
    /// queued.
    fn initial_rates(
        &self,
        vif: &InterfaceContext,
        sta: Option<&StationContext>,
        frame: &Frame<P>,
    ) -> TxRates;
}

/// Backpressure toward the frame producer.
///
/// Both signals are level-triggered: the engine may repeat them, and a
/// repeated signal must leave the producer's state unchanged.
pub trait FlowControl {
    /// Stop submitting on `qid`
    fn stop(&self, qid: QueueId);

    /// Resume submitting on `qid`
    fn wake(&self, qid: QueueId);
}

/// Completion reporting
pub trait StatusReporter<P> {
    /// Hand a completed frame back with its final status.
    ///
    /// Called exactly once per non-aggregated frame.
    fn report(&self, frame: Frame<P>);

    /// Dispose of a frame whose status is carried elsewhere (A-MPDU members).
    fn discard(&self, frame: Frame<P>) {
        drop(frame);
    }
}

/// Beacon template source
pub trait BeaconFramer<P> {
    /// Render the current beacon for `vif`, if it has one
    fn render(&self, vif: &InterfaceContext) -> Option<Frame<P>>;
}

/// Buffered group-addressed traffic for power-saving peers
pub trait PowerSaveBuffer<P> {
    /// Release at most one buffered broadcast/multicast frame for `vif`
    fn drain(&self, vif: &InterfaceContext) -> Option<Frame<P>>;
}
