//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives guarding the descriptor rings and, with the `async`
//! feature, the readiness wakers.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from normal code, completion interrupts and timer callbacks alike. On
/// target the critical section masks interrupts, so a holder also excludes
/// the completion-delivery context.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly on the same cell from within `f`.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }
}

/// Interrupt-safe waker storage.
///
/// Register a waker from async poll, wake from the completion path.
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Create a new empty waker (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Register a waker to be woken later.
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| match slot {
            Some(existing) if existing.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake the registered waker, if any (clears the stored waker).
    #[inline]
    pub fn wake(&self) {
        let waker = self.waker.with(Option::take);
        if let Some(w) = waker {
            w.wake();
        }
    }

    /// Check if a waker is currently registered.
    pub fn is_registered(&self) -> bool {
        self.waker.with(|slot| slot.is_some())
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}
