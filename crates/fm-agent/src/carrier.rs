//! Carrier agents: book nearby loads, work through them in booking order,
//! and wander (or not) while idle.
//!
//! # Per-tick sequence
//!
//! ```text
//! ① book:    queue empty?  search the block around the carrier (or
//!            around its current load's destination) and book one
//!            feasible load at random
//! ② advance: promote the queue head to current; derive status; on
//!            delivery collect the rate and either go idle or start the
//!            next queued load
//! ③ idle:    still Searching?  ask the IdleMovement policy for a cell
//! ```

use std::collections::VecDeque;

use fm_behavior::IdleMovement;
use fm_core::{CarrierId, CarrierStatus, Cell, LoadId, SimRng, Tick};

use crate::{AgentResult, Load, Market, StepContext};

/// What one carrier activation changed, for logging and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CarrierActivity {
    pub booked:    Option<LoadId>,
    pub delivered: Option<LoadId>,
    /// New cell after an idle move.
    pub moved_to:  Option<Cell>,
}

/// `true` if a carrier free at `ref_pos` from `ref_tick` can reach `load`'s
/// origin by its planned pickup tick.
///
/// Signed arithmetic: a pickup tick before `ref_tick` is never reachable.
#[inline]
pub fn is_reachable(speed: u32, ref_tick: Tick, ref_pos: Cell, load: &Load) -> bool {
    let ticks_available = load.planned_tick.signed_since(ref_tick);
    i64::from(speed) * ticks_available >= i64::from(ref_pos.distance(load.origin))
}

#[derive(Clone, Debug)]
pub struct CarrierAgent {
    pub id:      CarrierId,
    /// Last idle cell.  Only meaningful while `current` is `None`.
    position:    Cell,
    /// Booked loads not yet started, in booking order.
    queue:       VecDeque<LoadId>,
    current:     Option<LoadId>,
    loads_moved: u64,
    earnings:    f64,
    status:      CarrierStatus,
}

impl CarrierAgent {
    /// A searching carrier at `position`.  The caller places it in the
    /// idle-carrier index.
    pub fn new(id: CarrierId, position: Cell) -> Self {
        Self {
            id,
            position,
            queue:       VecDeque::new(),
            current:     None,
            loads_moved: 0,
            earnings:    0.0,
            status:      CarrierStatus::Searching,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Grid position while idle; `None` while committed to a load.
    pub fn position(&self) -> Option<Cell> {
        self.current.is_none().then_some(self.position)
    }

    pub fn current_load(&self) -> Option<LoadId> {
        self.current
    }

    pub fn queued_loads(&self) -> impl ExactSizeIterator<Item = LoadId> + '_ {
        self.queue.iter().copied()
    }

    pub fn loads_moved(&self) -> u64 {
        self.loads_moved
    }

    pub fn earnings(&self) -> f64 {
        self.earnings
    }

    pub fn status(&self) -> CarrierStatus {
        self.status
    }

    // ── Activation ────────────────────────────────────────────────────────

    pub fn step<M: IdleMovement + ?Sized>(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
        rng:    &mut SimRng,
        idle:   &M,
    ) -> AgentResult<CarrierActivity> {
        let booked = self.try_book(ctx, market, rng)?;
        let delivered = self.advance_queue(ctx, market)?;
        let moved_to = if self.status == CarrierStatus::Searching {
            self.move_while_searching(ctx, market, rng, idle)?
        } else {
            None
        };
        Ok(CarrierActivity { booked, delivered, moved_to })
    }

    /// ① Book at most one load, and only when nothing is queued.
    fn try_book(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
        rng:    &mut SimRng,
    ) -> AgentResult<Option<LoadId>> {
        if !self.queue.is_empty() {
            return Ok(None);
        }

        // Reference point: where and when this carrier is next free.
        let (ref_tick, ref_pos, busy_until) = match self.current {
            Some(id) => {
                let load = market.loads.load(id)?;
                (load.drop_tick(), load.destination, Some(load.drop_tick()))
            }
            None => (ctx.tick, self.position, None),
        };

        let radius = ctx.config.carrier_search_radius;
        let speed = ctx.config.carrier_speed;
        let mut feasible = Vec::new();
        for id in market.load_grid.neighbors(ref_pos, radius, true) {
            let load = market.loads.load(id)?;
            let no_conflict = busy_until.is_none_or(|drop| load.planned_tick > drop);
            if no_conflict && is_reachable(speed, ref_tick, ref_pos, load) {
                feasible.push(id);
            }
        }

        let Some(&pick) = rng.choose(&feasible) else {
            return Ok(None);
        };
        market.loads.load_mut(pick)?.book()?;
        market.load_grid.remove(pick)?;
        self.queue.push_back(pick);
        Ok(Some(pick))
    }

    /// ② Promote the queue head and derive status.  Returns the load
    /// delivered this tick, if any.
    fn advance_queue(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
    ) -> AgentResult<Option<LoadId>> {
        let current = match self.current {
            Some(id) => id,
            None => match self.queue.pop_front() {
                Some(next) => {
                    market.carrier_grid.remove(self.id)?;
                    self.current = Some(next);
                    next
                }
                None => {
                    self.status = CarrierStatus::Searching;
                    return Ok(None);
                }
            },
        };

        let load = market.loads.load(current)?;
        let now = ctx.tick;
        if load.planned_tick > now {
            self.status = CarrierStatus::Deadheading;
            return Ok(None);
        }
        if now < load.drop_tick() {
            self.status = CarrierStatus::InTransit;
            return Ok(None);
        }

        // Delivered.
        self.loads_moved += 1;
        self.earnings += load.rate;
        let destination = load.destination;
        match self.queue.pop_front() {
            None => {
                market.carrier_grid.place(self.id, destination)?;
                self.position = destination;
                self.current = None;
                self.status = CarrierStatus::Searching;
            }
            Some(next) => {
                self.current = Some(next);
                self.status = CarrierStatus::Deadheading;
            }
        }
        Ok(Some(current))
    }

    /// ③ The only place an idle carrier's position changes.
    fn move_while_searching<M: IdleMovement + ?Sized>(
        &mut self,
        ctx:    &StepContext<'_>,
        market: &mut Market,
        rng:    &mut SimRng,
        idle:   &M,
    ) -> AgentResult<Option<Cell>> {
        let next = idle.next_cell(self.id, self.position, ctx.config.bounds(), rng);
        if next == self.position {
            return Ok(None);
        }
        market.carrier_grid.relocate(self.id, next)?;
        self.position = next;
        Ok(Some(next))
    }
}
