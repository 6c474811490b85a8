//! Hardware-side hooks.

use crate::driver::context::TxFlow;
use crate::driver::frame::{Frame, QueueId};

/// Descriptor ring doorbell and beacon slot programming
pub trait HardwareDoorbell<P> {
    /// Tell the hardware new descriptors are ready on `qid`
    fn kick(&self, qid: QueueId);

    /// Program the beacon template for interface `slot`.
    ///
    /// Beacons bypass the descriptor rings entirely.
    fn set_beacon(&self, slot: u8, frame: Frame<P>);

    /// Per-flow bootstrap after [`bind_flow`](crate::TxEngine::bind_flow)
    /// has bound `flow` to its transmission context.
    fn init_flow(&self, flow: &TxFlow) {
        let _ = flow;
    }
}
