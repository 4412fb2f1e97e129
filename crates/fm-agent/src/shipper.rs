//! Shipper agents: create loads and drive their state machines.

use fm_core::{LoadId, ShipperId, SimRng};

use crate::{AgentResult, LoadStore, LoadTransition, Market, StepContext};

/// A shipper and the loads it has created.
#[derive(Clone, Debug)]
pub struct ShipperAgent {
    pub id: ShipperId,
    /// Every load this shipper ever created, in creation order.
    loads:  Vec<LoadId>,
    /// The subset not yet dropped; the only loads `step` still advances.
    open:   Vec<LoadId>,
}

impl ShipperAgent {
    pub fn new(id: ShipperId) -> Self {
        Self { id, loads: Vec::new(), open: Vec::new() }
    }

    /// All loads created so far.
    pub fn loads(&self) -> &[LoadId] {
        &self.loads
    }

    /// Loads not yet dropped.
    pub fn open_loads(&self) -> &[LoadId] {
        &self.open
    }

    /// Number of this shipper's loads still waiting for a carrier.
    pub fn unbooked_count(&self, loads: &LoadStore) -> usize {
        self.open
            .iter()
            .filter(|&&id| loads.get(id).is_some_and(|l| !l.is_booked()))
            .count()
    }

    /// One activation: maybe create a load, then advance every open load.
    ///
    /// Returns the id of the load created this tick, if any.
    pub fn step(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
        rng:    &mut SimRng,
    ) -> AgentResult<Option<LoadId>> {
        let spawned = self.spawn_load(ctx, market, rng)?;
        self.manage_loads(ctx, &mut market.loads)?;
        Ok(spawned)
    }

    /// Create one load unless the unbooked ceiling is reached.
    fn spawn_load(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
        rng:    &mut SimRng,
    ) -> AgentResult<Option<LoadId>> {
        let config = ctx.config;
        if self.unbooked_count(&market.loads) >= config.shipper_max_unbooked {
            return Ok(None);
        }

        let bounds = config.bounds();
        let origin = rng.cell(bounds);
        let destination = rng.cell(bounds);
        let rate = config.shipper_starting_rate * f64::from(origin.distance(destination));

        let id = market.loads.create(
            self.id,
            ctx.tick,
            origin,
            destination,
            ctx.tick + config.shipper_lead_time,
            rate,
            config.carrier_speed,
        )?;
        market.load_grid.place(id, origin)?;
        self.loads.push(id);
        self.open.push(id);
        Ok(Some(id))
    }

    /// Advance every open load one tick, then forget the dropped ones.
    fn manage_loads(&mut self, ctx: &StepContext<'_>, loads: &mut LoadStore) -> AgentResult<()> {
        let mut any_dropped = false;
        for &id in &self.open {
            if loads.load_mut(id)?.advance(ctx.tick) == Some(LoadTransition::Dropped) {
                any_dropped = true;
            }
        }
        if any_dropped {
            self.open.retain(|&id| loads.get(id).is_some_and(|l| !l.is_dropped()));
        }
        Ok(())
    }
}
