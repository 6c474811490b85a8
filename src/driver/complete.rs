//! Completion handling.
//!
//! Runs in the completion-delivery context (interrupt or deferred work).
//! The oldest frame is taken from the ring inside the ring's critical
//! section, reported outside it, and the wake check runs inside it again.
//! Taking the frame moves it out of the ring, so a frame is reported at most
//! once even when completions race.

use super::engine::TxEngine;
use super::frame::{Frame, QueueId, TxFlags, TxStatus};
use crate::hal::{FlowControl, StatusReporter};

impl<P, H, const NDESC: usize, const VIFS: usize> TxEngine<P, H, NDESC, VIFS>
where
    H: FlowControl + StatusReporter<P>,
{
    /// Complete the oldest frame on `qid`.
    ///
    /// `outcome` is the hardware's delivery result when it has one; without
    /// it the frame is reported as delivered. A-MPDU members are discarded
    /// without a report since the aggregate's status covers them.
    ///
    /// Returns `false` if the ring was empty.
    pub fn complete_next(&self, qid: QueueId, outcome: Option<TxStatus>) -> bool {
        let Some(frame) = self.queue(qid).with(|q| q.take_next()) else {
            trace!("tx: {} completion on empty ring", qid.as_str());
            return false;
        };

        self.finish(frame, outcome.unwrap_or(TxStatus::Acked));
        self.check_wake(qid);
        true
    }

    /// Report every frame still queued on `qid` as failed.
    ///
    /// Used when the hardware ring is reset (e.g. after a transmit hang).
    /// Returns the number of frames flushed.
    pub fn flush(&self, qid: QueueId) -> usize {
        let mut flushed = 0;
        while let Some(mut frame) = self.queue(qid).with(|q| q.take_next()) {
            frame.set_status(TxStatus::Failed);
            self.host.report(frame);
            flushed += 1;
        }

        if flushed > 0 {
            debug!("tx: {} flushed {} frames", qid.as_str(), flushed);
        }
        self.check_wake(qid);
        flushed
    }

    fn finish(&self, mut frame: Frame<P>, status: TxStatus) {
        if frame.flags().contains(TxFlags::AMPDU) {
            self.host.discard(frame);
            return;
        }

        frame.clear_status();
        frame.set_status(status);
        self.host.report(frame);
    }

    fn check_wake(&self, qid: QueueId) {
        if !qid.is_data() {
            return;
        }

        let threshold = self.threshold();
        self.queue(qid).with(|q| {
            if q.occupancy() < threshold {
                if q.note_wake() {
                    debug!("tx: {} woken at {}/{}", qid.as_str(), q.occupancy(), NDESC);
                }
                self.host.wake(qid);
            }
        });
    }
}
