//! Synchronization and Concurrency Support
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability guarding each ring
//!   - [`AtomicWaker`] - Async waker storage for interrupts
//!
//! - **Async Support** (`asynch`): Readiness for async frame producers
//!   - [`TxReadiness`] - [`FlowControl`](crate::hal::FlowControl) that wakes
//!     tasks awaiting a stopped ring
//!
//! # Feature Flags
//!
//! - `async`: Enables `asynch` and [`AtomicWaker`]

mod primitives;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;

// Async support (requires async feature)
#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::{ReadyFuture, TxReadiness};
