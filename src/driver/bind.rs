//! Flow binding.

use super::context::{InterfaceContext, StationContext, TxFlow, resolve};
use super::engine::TxEngine;
use crate::hal::HardwareDoorbell;

impl<P, H, const NDESC: usize, const VIFS: usize> TxEngine<P, H, NDESC, VIFS>
where
    H: HardwareDoorbell<P>,
{
    /// Bind a per-TID flow to its transmission context.
    ///
    /// Station flows use the station's unicast context, interface flows the
    /// interface's group context. The host's
    /// [`init_flow`](HardwareDoorbell::init_flow) hook runs afterwards.
    /// Does nothing when `flow` is `None`.
    pub fn bind_flow(
        &self,
        flow: Option<&mut TxFlow>,
        vif: &InterfaceContext,
        sta: Option<&StationContext>,
    ) {
        let Some(flow) = flow else {
            return;
        };

        flow.bind(resolve(vif, sta).idx());
        self.host.init_flow(flow);
    }
}
