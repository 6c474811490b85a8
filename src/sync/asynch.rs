//! Async readiness for frame producers.
//!
//! [`TxReadiness`] is a [`FlowControl`] implementation that remembers the
//! last stop/wake signal per ring and wakes tasks awaiting
//! [`ready`](TxReadiness::ready). A host forwards its own `stop`/`wake` calls
//! to it, or uses it directly as its flow-control collaborator.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use portable_atomic::{AtomicBool, Ordering};

use super::primitives::AtomicWaker;
use crate::driver::frame::QueueId;
use crate::hal::FlowControl;
use crate::internal::constants::QUEUE_COUNT;

/// Per-ring stop state with wakers.
///
/// # Example
///
/// ```ignore
/// static READINESS: TxReadiness = TxReadiness::new();
///
/// async fn send(engine: &Engine, vif: &InterfaceContext, frame: Frame<Buf>) {
///     READINESS.ready(QueueId::BestEffort).await;
///     let _ = engine.submit(vif, None, frame);
/// }
/// ```
pub struct TxReadiness {
    stopped: [AtomicBool; QUEUE_COUNT],
    wakers: [AtomicWaker; QUEUE_COUNT],
}

impl TxReadiness {
    /// Create with every ring running (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            stopped: [const { AtomicBool::new(false) }; QUEUE_COUNT],
            wakers: [const { AtomicWaker::new() }; QUEUE_COUNT],
        }
    }

    /// Whether the last signal for `qid` was a stop
    #[inline]
    pub fn is_stopped(&self, qid: QueueId) -> bool {
        self.stopped[qid.index()].load(Ordering::Acquire)
    }

    /// Wait until `qid` accepts frames
    pub fn ready(&self, qid: QueueId) -> ReadyFuture<'_> {
        ReadyFuture {
            readiness: self,
            qid,
        }
    }
}

impl Default for TxReadiness {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowControl for TxReadiness {
    fn stop(&self, qid: QueueId) {
        self.stopped[qid.index()].store(true, Ordering::Release);
    }

    fn wake(&self, qid: QueueId) {
        self.stopped[qid.index()].store(false, Ordering::Release);
        self.wakers[qid.index()].wake();
    }
}

/// Future returned by [`TxReadiness::ready`]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ReadyFuture<'a> {
    readiness: &'a TxReadiness,
    qid: QueueId,
}

impl Future for ReadyFuture<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let readiness = self.readiness;
        let qid = self.qid;

        if !readiness.is_stopped(qid) {
            return Poll::Ready(());
        }

        readiness.wakers[qid.index()].register(cx.waker());
        // A wake between the check and the registration would otherwise be lost
        if readiness.is_stopped(qid) {
            Poll::Pending
        } else {
            Poll::Ready(())
        }
    }
}
