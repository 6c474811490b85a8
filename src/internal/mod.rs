//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`constants`]: Queue layout, headroom and beacon-window limits
//! - [`ring`]: Fixed-capacity FIFO used by descriptor rings and beacon batches

pub(crate) mod constants;
pub(crate) mod ring;
