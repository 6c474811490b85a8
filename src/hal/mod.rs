//! Host collaborator traits.
//!
//! The engine owns no radio hardware or protocol state. Everything it needs
//! from the outside world is expressed as a trait here and supplied through
//! the engine's `H` parameter:
//!
//! - [`hw`] - Hardware side: descriptor doorbell, beacon slots, flow bootstrap
//! - [`mac80211`] - Upper layer: rate control, backpressure, status reporting,
//!   beacon templates and power-save buffered traffic
//!
//! Each engine operation only requires the traits it calls, so a host that
//! never runs the beacon window need not implement [`BeaconFramer`] or
//! [`PowerSaveBuffer`].

pub mod hw;
pub mod mac80211;

pub use hw::HardwareDoorbell;
pub use mac80211::{BeaconFramer, FlowControl, PowerSaveBuffer, RateControl, StatusReporter};
