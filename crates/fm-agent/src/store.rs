//! `LoadStore`: the arena every load lives in.
//!
//! Loads are appended in creation order and never removed, so a `LoadId` is
//! simply the load's position in the arena and stays valid for the whole run.

use fm_core::{Cell, LoadId, ShipperId, Tick};

use crate::{AgentError, AgentResult, Load};

#[derive(Clone, Debug, Default)]
pub struct LoadStore {
    loads: Vec<Load>,
}

impl LoadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbooked load and return its id.
    ///
    /// Fails once the arena holds `u32::MAX + 1` loads.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        shipper:       ShipperId,
        created:       Tick,
        origin:        Cell,
        destination:   Cell,
        planned_tick:  Tick,
        rate:          f64,
        carrier_speed: u32,
    ) -> AgentResult<LoadId> {
        let id = next_id(self.loads.len())?;
        self.loads.push(Load::new(
            id, shipper, created, origin, destination, planned_tick, rate, carrier_speed,
        ));
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: LoadId) -> Option<&Load> {
        self.loads.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: LoadId) -> Option<&mut Load> {
        self.loads.get_mut(id.index())
    }

    /// Like [`get`](Self::get) but a missing id is an [`AgentError`].
    #[inline]
    pub fn load(&self, id: LoadId) -> AgentResult<&Load> {
        self.get(id).ok_or(AgentError::UnknownLoad(id))
    }

    #[inline]
    pub fn load_mut(&mut self, id: LoadId) -> AgentResult<&mut Load> {
        self.get_mut(id).ok_or(AgentError::UnknownLoad(id))
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// All loads in creation order, dropped ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Load> {
        self.loads.iter()
    }
}

/// Id for the load at arena position `len`.
#[inline]
pub(crate) fn next_id(len: usize) -> AgentResult<LoadId> {
    LoadId::try_from(len).map_err(|_| AgentError::LoadIdsExhausted(len))
}
