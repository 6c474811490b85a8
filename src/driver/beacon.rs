//! Pre-beacon aggregation of buffered group traffic.
//!
//! Runs once per beacon interval from the pre-TBTT timer. Beacons are
//! rendered and programmed straight into their hardware slots, then buffered
//! broadcast/multicast frames for power-saving peers are collected into a
//! private [`BeaconBatch`] until a full pass over the interfaces adds nothing.
//! Only the final move of the batch into the power-save delivery ring takes a
//! lock.
//!
//! # Collection
//!
//! Each pass asks every beacon-enabled interface for at most one buffered
//! frame. A frame released for one interface can make more traffic available
//! for another, so a single pass is not enough; collection stops at the first
//! pass that adds no frame, or when the pass cap is reached. It also never
//! drains more frames than the power-save delivery ring had free when the
//! window opened, so nothing collected is ever turned away.
//!
//! Every collected frame carries `MORE_DATA` except the last one collected
//! for each interface.

use super::context::InterfaceContext;
use super::engine::TxEngine;
use super::frame::{Frame, QueueId, TxFlags, TxStatus};
use crate::hal::{BeaconFramer, HardwareDoorbell, PowerSaveBuffer, StatusReporter};
use crate::internal::ring::FrameRing;

/// Frames collected during one beacon window, with the last frame per
/// interface slot.
pub struct BeaconBatch<P, const N: usize, const VIFS: usize> {
    frames: FrameRing<Frame<P>, N>,
    tails: [Option<usize>; VIFS],
}

impl<P, const N: usize, const VIFS: usize> BeaconBatch<P, N, VIFS> {
    /// Create an empty batch
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames: FrameRing::new(),
            tails: [None; VIFS],
        }
    }

    /// Frames collected
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether nothing was collected
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Check whether the batch can take no more frames
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.frames.is_full()
    }

    /// Append a frame for interface `slot` and record it as that slot's tail.
    ///
    /// Hands the frame back if the batch is full or `slot` is outside the
    /// tail table.
    pub fn push(&mut self, slot: u8, frame: Frame<P>) -> Result<(), Frame<P>> {
        let slot = slot as usize;
        if slot >= VIFS {
            return Err(frame);
        }

        let position = self.frames.len();
        self.frames.push_back(frame)?;
        self.tails[slot] = Some(position);
        Ok(())
    }

    /// Last frame recorded for `slot`
    pub fn tail(&self, slot: u8) -> Option<&Frame<P>> {
        let position = (*self.tails.get(slot as usize)?)?;
        self.frames.get(position)
    }

    /// Clear `MORE_DATA` on every slot's tail frame.
    ///
    /// Must run before the first [`pop_front`](Self::pop_front), since tail
    /// positions are relative to the batch head.
    pub fn seal(&mut self) {
        for position in self.tails.iter().flatten() {
            if let Some(frame) = self.frames.get_mut(*position) {
                frame.set_more_data(false);
            }
        }
    }

    /// Remove the oldest frame
    pub fn pop_front(&mut self) -> Option<Frame<P>> {
        self.frames.pop_front()
    }

    /// Iterate over collected frames in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Frame<P>> {
        self.frames.iter()
    }
}

impl<P, const N: usize, const VIFS: usize> Default for BeaconBatch<P, N, VIFS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one beacon window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconReport {
    /// Beacons rendered and programmed
    pub beacons: usize,
    /// Buffered frames moved to the power-save delivery ring
    pub buffered: usize,
    /// Collection passes run, including the final pass that added nothing
    pub passes: usize,
    /// Collection stopped at the pass cap or at the free space of the
    /// power-save delivery ring before reaching a pass that added nothing;
    /// remaining traffic stays in the host's buffer for the next window
    pub capped: bool,
}

impl<P, H, const NDESC: usize, const VIFS: usize> TxEngine<P, H, NDESC, VIFS>
where
    H: HardwareDoorbell<P> + BeaconFramer<P> + PowerSaveBuffer<P> + StatusReporter<P>,
{
    /// Run one beacon window over `vifs`.
    ///
    /// `vifs` is a snapshot of the active interfaces taken by the caller;
    /// interfaces that are not beacon-enabled are skipped. The snapshot is
    /// walked once per pass and never re-entered through the host.
    ///
    /// Must not run concurrently with itself: collection is sized by the
    /// power-save ring's free space when the window opens.
    pub fn pre_tbtt(&self, vifs: &[&InterfaceContext]) -> BeaconReport {
        let mut report = BeaconReport::default();
        let mask = self.beacon_mask();

        for vif in self.beacon_window(mask, vifs) {
            if let Some(mut beacon) = self.host.render(vif) {
                beacon.insert_flags(TxFlags::ASSIGN_SEQ);
                self.host.set_beacon(vif.slot(), beacon);
                report.beacons += 1;
            }
        }

        // Only this path appends to PSD and completions only free slots, so
        // the room read here still holds when the batch is drained
        let room = NDESC.saturating_sub(self.occupancy(QueueId::PowerSave));

        let mut batch: BeaconBatch<P, NDESC, VIFS> = BeaconBatch::new();
        'collect: loop {
            let before = batch.len();
            report.passes += 1;

            for vif in self.beacon_window(mask, vifs) {
                if batch.len() >= room {
                    warn!("beacon: psd ring has room for {} frames", room);
                    report.capped = true;
                    break 'collect;
                }
                let Some(mut frame) = self.host.drain(vif) else {
                    continue;
                };

                frame.bind(vif.group().idx());
                frame.set_queue(QueueId::PowerSave);
                frame.insert_flags(TxFlags::ASSIGN_SEQ | TxFlags::MORE_DATA);
                if let Err(frame) = batch.push(vif.slot(), frame) {
                    self.reject_buffered(frame);
                }
            }

            if batch.len() == before {
                break;
            }
            if report.passes >= self.config.max_aggregation_passes {
                warn!(
                    "beacon: pass cap {} reached with {} frames",
                    self.config.max_aggregation_passes,
                    batch.len()
                );
                report.capped = true;
                break;
            }
        }

        if batch.is_empty() {
            trace!("beacon: {} beacons, no buffered traffic", report.beacons);
            return report;
        }

        batch.seal();

        let rejected = self.queue(QueueId::PowerSave).with(|q| {
            while let Some(frame) = batch.pop_front() {
                if let Err(frame) = q.append(frame) {
                    return Some(frame);
                }
                report.buffered += 1;
            }
            None
        });

        // Only reachable if two windows overlap
        for frame in rejected.into_iter().chain(core::iter::from_fn(|| batch.pop_front())) {
            self.reject_buffered(frame);
        }

        trace!(
            "beacon: {} beacons, {} buffered in {} passes",
            report.beacons,
            report.buffered,
            report.passes
        );
        report
    }

    /// Fail a collected frame that has nowhere to go.
    ///
    /// Collection is bounded by the tail table and the free PSD space, so
    /// this only runs if windows overlap.
    fn reject_buffered(&self, mut frame: Frame<P>) {
        warn!("beacon: buffered frame dropped outside window bounds");
        frame.set_status(TxStatus::Failed);
        self.host.report(frame);
    }

    /// Interfaces in `vifs` whose slot is set in `mask`, in snapshot order
    fn beacon_window<'a>(
        &'a self,
        mask: u32,
        vifs: &'a [&'a InterfaceContext],
    ) -> impl Iterator<Item = &'a InterfaceContext> {
        vifs.iter().copied().filter(move |vif| {
            let slot = vif.slot();
            let slot_index = slot as usize;
            slot_index < self.config.beacon_slots && slot_index < VIFS && mask & (1 << slot) != 0
        })
    }
}

#[cfg(test)]
#[allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::driver::config::TxConfig;
    use crate::driver::context::WcidIdx;
    use crate::testing::{MockHost, TestEngine, vif};

    fn engine(config: TxConfig) -> TestEngine {
        TestEngine::new(config, MockHost::new()).unwrap()
    }

    /// (payload, more_data, wcid) of every frame on the PSD ring
    fn psd_frames(engine: &TestEngine) -> Vec<(u32, bool, Option<WcidIdx>)> {
        engine.queue(QueueId::PowerSave).with(|q| {
            q.iter()
                .map(|f| (*f.payload(), f.more_data(), f.wcid()))
                .collect()
        })
    }

    #[test]
    fn batch_tracks_tail_per_slot() {
        let mut batch: BeaconBatch<u32, 8, 4> = BeaconBatch::new();
        batch.push(0, Frame::new(1, 4)).unwrap();
        batch.push(1, Frame::new(2, 4)).unwrap();
        batch.push(0, Frame::new(3, 4)).unwrap();

        assert_eq!(batch.tail(0).map(|f| *f.payload()), Some(3));
        assert_eq!(batch.tail(1).map(|f| *f.payload()), Some(2));
        assert!(batch.tail(2).is_none());
        assert!(batch.tail(9).is_none());
    }

    #[test]
    fn batch_seal_clears_tails_only() {
        let mut batch: BeaconBatch<u32, 8, 4> = BeaconBatch::new();
        for (slot, payload) in [(0, 1), (1, 2), (0, 3)] {
            batch
                .push(slot, Frame::new(payload, 4).with_flags(TxFlags::MORE_DATA))
                .unwrap();
        }
        batch.seal();

        let more: Vec<bool> = batch.iter().map(Frame::more_data).collect();
        assert_eq!(more, [true, false, false]);
    }

    #[test]
    fn batch_rejects_slot_outside_table() {
        let mut batch: BeaconBatch<u32, 8, 2> = BeaconBatch::new();
        assert!(batch.push(2, Frame::new(1, 4)).is_err());
        assert!(batch.is_empty());
    }

    #[test]
    fn batch_rejects_when_full() {
        let mut batch: BeaconBatch<u32, 2, 2> = BeaconBatch::new();
        batch.push(0, Frame::new(1, 4)).unwrap();
        batch.push(1, Frame::new(2, 4)).unwrap();
        assert!(batch.is_full());

        let rejected = batch.push(0, Frame::new(3, 4)).unwrap_err();
        assert_eq!(*rejected.payload(), 3);
        assert_eq!(batch.tail(0).map(|f| *f.payload()), Some(1));
    }

    #[test]
    fn two_interfaces_one_frame_each_converges_in_two_passes() {
        let engine = engine(TxConfig::new());
        let (a, b) = (vif(0), vif(1));
        engine.enable_beacon(0).unwrap();
        engine.enable_beacon(1).unwrap();
        engine.host().buffer(0, 1);
        engine.host().buffer(1, 1);

        let report = engine.pre_tbtt(&[&a, &b]);

        assert_eq!(report.passes, 2);
        assert_eq!(report.buffered, 2);
        assert!(!report.capped);
        assert_eq!(engine.occupancy(QueueId::PowerSave), 2);

        let frames = psd_frames(&engine);
        assert!(frames.iter().all(|(_, more, _)| !more));
        assert_eq!(frames[0].2, Some(a.group().idx()));
        assert_eq!(frames[1].2, Some(b.group().idx()));
    }

    #[test]
    fn only_last_frame_per_interface_ends_more_data() {
        let engine = engine(TxConfig::new());
        let (a, b) = (vif(0), vif(1));
        engine.enable_beacon(0).unwrap();
        engine.enable_beacon(1).unwrap();
        engine.host().buffer(0, 3);
        engine.host().buffer(1, 1);

        let report = engine.pre_tbtt(&[&a, &b]);
        assert_eq!(report.passes, 4);

        // Pass order: a0 b0 | a1 | a2
        let more: Vec<bool> = psd_frames(&engine).iter().map(|f| f.1).collect();
        assert_eq!(more, [true, false, true, false]);
    }

    #[test]
    fn buffered_frames_are_tagged_for_psd() {
        let engine = engine(TxConfig::new());
        engine.enable_beacon(0).unwrap();
        engine.host().buffer(0, 1);
        engine.pre_tbtt(&[&vif(0)]);

        engine.queue(QueueId::PowerSave).with(|q| {
            let frame = q.iter().next().unwrap();
            assert!(frame.flags().contains(TxFlags::ASSIGN_SEQ));
            assert_eq!(frame.queue(), Some(QueueId::PowerSave));
        });
    }

    #[test]
    fn late_arrival_for_other_interface_is_collected() {
        let engine = engine(TxConfig::new());
        let (a, b) = (vif(0), vif(1));
        engine.enable_beacon(0).unwrap();
        engine.enable_beacon(1).unwrap();
        engine.host().buffer(0, 1);
        // Draining slot 0 releases a frame for slot 1 after its turn in pass 1
        engine.host().chain(0, 1);

        let report = engine.pre_tbtt(&[&b, &a]);

        assert_eq!(report.buffered, 2);
        assert_eq!(report.passes, 3);
        let frames = psd_frames(&engine);
        assert_eq!(frames[1].2, Some(b.group().idx()));
        assert!(frames.iter().all(|(_, more, _)| !more));
    }

    #[test]
    fn disabled_interfaces_are_skipped() {
        let engine = engine(TxConfig::new());
        let (a, b) = (vif(0), vif(1));
        engine.enable_beacon(1).unwrap();
        engine.host().buffer(0, 2);
        engine.host().buffer(1, 1);
        engine.host().set_beacon_template(true);

        let report = engine.pre_tbtt(&[&a, &b]);

        assert_eq!(report.beacons, 1);
        assert_eq!(report.buffered, 1);
        assert_eq!(engine.host().pending(0), 2);
        assert_eq!(engine.host().beacons(), [1]);
    }

    #[test]
    fn beacons_bypass_rings_with_sequence_assignment() {
        let engine = engine(TxConfig::new());
        engine.enable_beacon(0).unwrap();
        engine.enable_beacon(2).unwrap();
        engine.host().set_beacon_template(true);

        let report = engine.pre_tbtt(&[&vif(0), &vif(2)]);

        assert_eq!(report.beacons, 2);
        assert_eq!(engine.host().beacons(), [0, 2]);
        assert!(engine.host().beacons_assign_seq());
        for qid in QueueId::ALL {
            assert_eq!(engine.occupancy(qid), 0);
        }
    }

    #[test]
    fn empty_window_touches_no_ring() {
        let engine = engine(TxConfig::new());
        engine.enable_beacon(0).unwrap();

        let report = engine.pre_tbtt(&[&vif(0)]);

        assert_eq!(report.passes, 1);
        assert_eq!(report.buffered, 0);
        assert_eq!(engine.stats(QueueId::PowerSave).enqueued, 0);
    }

    #[test]
    fn pass_cap_bounds_endless_buffer() {
        let engine = engine(TxConfig::new().with_max_aggregation_passes(5));
        engine.enable_beacon(0).unwrap();
        engine.host().set_endless(0);

        let report = engine.pre_tbtt(&[&vif(0)]);

        assert!(report.capped);
        assert_eq!(report.passes, 5);
        assert_eq!(report.buffered, 5);

        let more: Vec<bool> = psd_frames(&engine).iter().map(|f| f.1).collect();
        assert_eq!(more, [true, true, true, true, false]);
    }

    #[test]
    fn batch_capacity_bounds_collection() {
        let engine = engine(TxConfig::new().with_max_aggregation_passes(1000));
        engine.enable_beacon(0).unwrap();
        engine.host().set_endless(0);

        let report = engine.pre_tbtt(&[&vif(0)]);

        assert!(report.capped);
        assert_eq!(report.buffered, 32);
        assert!(engine.host().reported().is_empty());
    }

    #[test]
    fn psd_free_space_bounds_collection() {
        let engine = engine(TxConfig::new());
        engine.enable_beacon(0).unwrap();
        engine.host().buffer(0, 31);
        engine.pre_tbtt(&[&vif(0)]);
        assert_eq!(engine.occupancy(QueueId::PowerSave), 31);

        engine.host().buffer(0, 2);
        let report = engine.pre_tbtt(&[&vif(0)]);

        assert!(report.capped);
        assert_eq!(report.buffered, 1);
        assert_eq!(engine.occupancy(QueueId::PowerSave), 32);
        assert!(engine.host().reported().is_empty());
        assert_eq!(engine.host().pending(0), 1);

        // The single frame queued this window closes its interface's data
        let frames = psd_frames(&engine);
        assert_eq!(frames.last().map(|f| f.1), Some(false));
    }

    #[test]
    fn psd_free_space_keeps_one_tail_per_interface() {
        let engine = engine(TxConfig::new());
        engine.enable_beacon(0).unwrap();
        engine.enable_beacon(1).unwrap();
        engine.host().buffer(0, 28);
        engine.pre_tbtt(&[&vif(0), &vif(1)]);
        assert_eq!(engine.occupancy(QueueId::PowerSave), 28);

        engine.host().buffer(0, 3);
        engine.host().buffer(1, 3);
        let report = engine.pre_tbtt(&[&vif(0), &vif(1)]);

        assert!(report.capped);
        assert_eq!(report.buffered, 4);
        assert!(engine.host().reported().is_empty());
        assert_eq!(engine.host().pending(0), 1);
        assert_eq!(engine.host().pending(1), 1);

        let frames = psd_frames(&engine);
        for iface in [vif(0), vif(1)] {
            let group = Some(iface.group().idx());
            let closing = frames[28..]
                .iter()
                .filter(|(_, more_data, wcid)| *wcid == group && !*more_data)
                .count();
            assert_eq!(closing, 1);
        }
    }
}
