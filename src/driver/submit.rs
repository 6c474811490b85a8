//! Frame admission.
//!
//! This module extends [`TxEngine`] with the submission path called from the
//! network stack's transmit hook.
//!
//! # Overview
//!
//! 1. Clamp unknown traffic class tags to best effort
//! 2. Resolve the transmission context (station, else interface group)
//! 3. Request initial rates once per context
//! 4. Append to the ring and ring the doorbell, inside the ring's critical section
//! 5. Stop the upper layer once occupancy exceeds `capacity - headroom`
//!
//! Submission never rejects a frame for its class, and a nearly full ring is
//! handled by backpressure, not by an error.

use super::context::{InterfaceContext, StationContext, resolve};
use super::engine::TxEngine;
use super::error::{QueueError, Result};
use super::frame::{Frame, QueueId, TxStatus};
use crate::hal::{FlowControl, HardwareDoorbell, RateControl, StatusReporter};

impl<P, H, const NDESC: usize, const VIFS: usize> TxEngine<P, H, NDESC, VIFS>
where
    H: RateControl<P> + HardwareDoorbell<P> + FlowControl + StatusReporter<P>,
{
    /// Queue a frame for transmission.
    ///
    /// `sta` is the destination station when known; group-addressed frames
    /// and frames to unknown peers pass `None` and use `vif`'s group context.
    ///
    /// Returns the ring the frame was queued on.
    ///
    /// # Errors
    /// - `Full` - every descriptor was in use. Only happens if the upper layer
    ///   ignores stop signals; the frame has been reported as failed.
    pub fn submit(
        &self,
        vif: &InterfaceContext,
        sta: Option<&StationContext>,
        mut frame: Frame<P>,
    ) -> Result<QueueId> {
        let qid = match QueueId::from_class(frame.queue_mapping()) {
            Some(qid) => qid,
            None => {
                warn!(
                    "tx: class tag {} out of range, using best effort",
                    frame.queue_mapping()
                );
                frame.set_queue(QueueId::BestEffort);
                QueueId::BestEffort
            }
        };

        let wcid = resolve(vif, sta);
        if wcid.claim_rate_selection() {
            let rates = self.host.initial_rates(vif, sta, &frame);
            frame.set_rates(rates);
        }
        frame.bind(wcid.idx());

        let threshold = self.threshold();
        let rejected = self.queue(qid).with(|q| {
            let rejected = q.append(frame).err();
            if rejected.is_none() {
                self.host.kick(qid);
            }

            if q.occupancy() > threshold {
                if q.note_stop() {
                    debug!("tx: {} stopped at {}/{}", qid.as_str(), q.occupancy(), NDESC);
                }
                self.host.stop(qid);
            }
            rejected
        });

        match rejected {
            None => Ok(qid),
            Some(mut frame) => {
                warn!("tx: {} ring full, dropping frame", qid.as_str());
                frame.set_status(TxStatus::Failed);
                self.host.report(frame);
                Err(QueueError::Full.into())
            }
        }
    }
}
