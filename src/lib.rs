//! Wireless Transmit Queue Engine
//!
//! A `no_std`, `no_alloc` transmit-path core for a wireless radio driver:
//! bounded per-class descriptor rings with backpressure toward the network
//! stack, exactly-once completion reporting, and the pre-beacon aggregation
//! of buffered broadcast/multicast traffic for power-saving peers.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): [`TxEngine`] with its rings, frames,
//!    contexts and the submission, completion and beacon-window paths
//! 2. **HAL Layer** ([`hal`]): Collaborator traits the host implements
//!    (doorbell, rate control, flow control, status reporting, beacons)
//! 3. **Sync Layer** ([`sync`]): ISR-safe cells and async readiness
//!
//! ## Execution Contexts
//!
//! Three paths run concurrently and may preempt each other:
//!
//! - [`TxEngine::submit`] from the network stack's transmit hook
//! - [`TxEngine::complete_next`] from the completion interrupt
//! - [`TxEngine::pre_tbtt`] from the pre-beacon timer
//!
//! Each ring is guarded by its own critical section, and no path holds more
//! than one ring's critical section at a time.
//!
//! # Features
//!
//! - `defmt`: Log through defmt and derive `defmt::Format` on public types
//! - `log`: Log through the `log` facade
//! - `async`: Enable `sync::TxReadiness` for async producers
//! - `atomic-critical-section`: Emulate atomic CAS with critical sections on
//!   targets without it
//!
//! # Example
//!
//! ```ignore
//! use ph_wlan_txq::{Frame, InterfaceContext, QueueId, TxConfig, TxEngineDefault, WcidIdx};
//!
//! static VIF: InterfaceContext = InterfaceContext::new(0, [0x02, 0, 0, 0, 0, 1], WcidIdx(128));
//!
//! let engine: TxEngineDefault<Buf, Host> = TxEngineDefault::new(TxConfig::new(), host)?;
//! engine.enable_beacon(VIF.slot())?;
//!
//! // Network stack transmit hook
//! engine.submit(&VIF, None, Frame::new(buf, 2))?;
//!
//! // Completion interrupt
//! engine.complete_next(QueueId::BestEffort, None);
//!
//! // Pre-beacon timer
//! let report = engine.pre_tbtt(&[&VIF]);
//! ```
//!
//! # Memory Requirements
//!
//! Each ring stores `NDESC` frame slots inline, and the beacon window batch
//! (`NDESC` frames) lives on the timer context's stack for the duration of
//! [`TxEngine::pre_tbtt`].

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value
)]

// Logging shim must come first so its macros are visible to every module
#[macro_use]
mod fmt;

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::beacon::{BeaconBatch, BeaconReport};
pub use driver::config::TxConfig;
pub use driver::context::{InterfaceContext, StationContext, TxFlow, Wcid, WcidIdx};
pub use driver::engine::{TxEngine, TxEngineDefault, TxEngineSmall};
pub use driver::error::{ConfigError, ConfigResult, Error, QueueError, QueueResult, Result};
pub use driver::frame::{Frame, QueueId, TxFlags, TxRate, TxRates, TxStatus};
pub use driver::queue::QueueStats;
pub use hal::{
    BeaconFramer, FlowControl, HardwareDoorbell, PowerSaveBuffer, RateControl, StatusReporter,
};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::asynch::TxReadiness;

/// Shared transmit-path constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on engine types.
pub mod constants {
    pub use crate::internal::constants::{
        // Queue layout
        DATA_QUEUE_COUNT,
        // Beacon window
        DEFAULT_BEACON_SLOTS,
        DEFAULT_MAX_AGGREGATION_PASSES,
        DEFAULT_TX_DESCRIPTORS,
        MAX_BEACON_SLOTS,
        // Flow control
        QUEUE_HEADROOM,
        QUEUE_COUNT,
        // Rate control
        TX_MAX_RATES,
    };
}
