//! Core transmit path.
//!
//! - [`config`] - Engine configuration and builder methods
//! - [`error`] - Error types and result aliases
//! - [`frame`] - Frames, queue identities, flags, rates and status
//! - [`context`] - Station, interface and flow transmission contexts
//! - [`queue`] - Bounded ring with backpressure state and counters
//! - [`engine`] - The [`TxEngine`] itself
//! - [`beacon`] - Beacon window batch and report types
//!
//! # Example
//!
//! ```ignore
//! use ph_wlan_txq::driver::{Frame, InterfaceContext, TxConfig, TxEngineDefault, WcidIdx};
//!
//! let engine: TxEngineDefault<Buf, Host> = TxEngineDefault::new(TxConfig::new(), host)?;
//! let vif = InterfaceContext::new(0, [0x02, 0, 0, 0, 0, 1], WcidIdx(128));
//! engine.enable_beacon(vif.slot())?;
//!
//! engine.submit(&vif, None, Frame::new(buf, 2))?;
//! ```

// Submodules
pub mod beacon;
mod bind;
mod complete;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod frame;
pub mod queue;
mod submit;

// Re-exports for convenience
pub use beacon::{BeaconBatch, BeaconReport};
pub use config::TxConfig;
pub use context::{InterfaceContext, StationContext, TxFlow, Wcid, WcidIdx};
pub use engine::{TxEngine, TxEngineDefault, TxEngineSmall};
pub use error::{ConfigError, ConfigResult, Error, QueueError, QueueResult, Result};
pub use frame::{Frame, QueueId, TxFlags, TxRate, TxRates, TxStatus};
pub use queue::QueueStats;
