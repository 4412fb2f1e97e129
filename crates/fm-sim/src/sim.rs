//! The `Sim` struct and its tick loop.

use fm_agent::{CarrierAgent, Market, ShipperAgent, StepContext};
use fm_behavior::IdleMovement;
use fm_core::{IdlePolicy, MarketConfig, SimRng, Tick};
use tracing::{debug, info, trace};

use crate::{AgentRecord, MarketSnapshot, SimObserver, SimResult, agent_records};

/// The market simulation.
///
/// `Sim<M>` owns every agent, both spatial indices, the load arena and the
/// one RNG.  Each [`step`](Self::step):
///
/// 1. shuffles and activates every shipper (spawn, then manage loads);
/// 2. shuffles and activates every carrier (book, advance, idle move);
/// 3. advances the tick counter and reports a [`MarketSnapshot`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: IdleMovement = IdlePolicy> {
    pub config: MarketConfig,

    /// Next tick to process.  Starts at 0.
    pub tick: Tick,

    /// Indexed by `ShipperId`.
    pub shippers: Vec<ShipperAgent>,

    /// Indexed by `CarrierId`.
    pub carriers: Vec<CarrierAgent>,

    pub market: Market,

    /// The only randomness source: activation shuffles, load placement,
    /// booking tie-breaks and idle movement all draw from it.
    pub rng: SimRng,

    /// Idle-movement policy applied to searching carriers.
    pub idle: M,
}

impl<M: IdleMovement> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        while self.tick < end {
            self.step(observer)?;
        }
        observer.on_sim_end(self.tick);

        let moved: u64 = self.carriers.iter().map(CarrierAgent::loads_moved).sum();
        info!(
            final_tick = self.tick.0,
            loads_created = self.market.loads.len(),
            loads_moved = moved,
            "market sim finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and notify `observer`.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.tick;
        observer.on_tick_start(now);

        self.process_tick(now)?;
        self.tick = now.next();

        let snapshot = self.snapshot_at(now);
        debug!(
            tick = now.0,
            unbooked = snapshot.unbooked_loads,
            idle_carriers = snapshot.idle_carriers,
            "tick done"
        );
        observer.on_tick_end(now, &snapshot);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.shippers, &self.carriers);
        }
        Ok(())
    }

    /// Metrics for the most recently processed tick.
    ///
    /// Before the first step this describes the initial state at tick 0.
    pub fn snapshot(&self) -> MarketSnapshot {
        let tick = Tick(self.tick.0.saturating_sub(1));
        self.snapshot_at(tick)
    }

    /// One record per agent, shippers first.
    pub fn agent_records(&self) -> Vec<AgentRecord> {
        agent_records(&self.shippers, &self.carriers)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        let ctx = StepContext::new(now, &self.config);

        // ── Phase 1: shippers ─────────────────────────────────────────────
        let mut order: Vec<usize> = (0..self.shippers.len()).collect();
        self.rng.shuffle(&mut order);
        for i in order {
            let shipper = &mut self.shippers[i];
            if let Some(load) = shipper.step(&ctx, &mut self.market, &mut self.rng)? {
                trace!(tick = now.0, shipper = %shipper.id, %load, "load posted");
            }
        }

        // ── Phase 2: carriers ─────────────────────────────────────────────
        let mut order: Vec<usize> = (0..self.carriers.len()).collect();
        self.rng.shuffle(&mut order);
        for i in order {
            let carrier = &mut self.carriers[i];
            let activity = carrier.step(&ctx, &mut self.market, &mut self.rng, &self.idle)?;
            if let Some(load) = activity.booked {
                trace!(tick = now.0, carrier = %carrier.id, %load, "load booked");
            }
            if let Some(load) = activity.delivered {
                trace!(
                    tick = now.0,
                    carrier = %carrier.id,
                    %load,
                    loads_moved = carrier.loads_moved(),
                    "load delivered"
                );
            }
        }
        Ok(())
    }

    fn snapshot_at(&self, tick: Tick) -> MarketSnapshot {
        MarketSnapshot::collect(tick, &self.market, &self.carriers)
    }
}
