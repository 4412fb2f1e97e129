//! Integration tests for fm-sim.

use std::sync::atomic::{AtomicUsize, Ordering};

use fm_agent::{CarrierAgent, ShipperAgent};
use fm_behavior::IdleMovement;
use fm_core::{CarrierId, CarrierStatus, Cell, GridBounds, IdlePolicy, MarketConfig, SimRng, Tick};

use crate::{MarketSnapshot, NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> MarketConfig {
    MarketConfig {
        width:                 10,
        height:                10,
        n_shippers:            4,
        n_carriers:            8,
        total_ticks,
        seed:                  42,
        output_interval_ticks: 1,
        ..MarketConfig::default()
    }
}

fn build(config: MarketConfig) -> Sim {
    SimBuilder::new(config).unwrap().build().unwrap()
}

/// Observer that keeps every tick-end snapshot.
#[derive(Default)]
struct Recorder {
    starts:      Vec<Tick>,
    snapshots:   Vec<MarketSnapshot>,
    agent_dumps: Vec<Tick>,
    ended:       Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_tick_end(&mut self, _tick: Tick, snapshot: &MarketSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
    fn on_snapshot(&mut self, tick: Tick, _s: &[ShipperAgent], _c: &[CarrierAgent]) {
        self.agent_dumps.push(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use fm_agent::AgentError;
    use fm_spatial::SpatialError;

    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = build(MarketConfig::default());
        assert_eq!(sim.shippers.len(), 50);
        assert_eq!(sim.carriers.len(), 400);
        assert_eq!(sim.market.carrier_grid.len(), 400);
        assert!(sim.market.loads.is_empty());
        assert_eq!(sim.tick, Tick::ZERO);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = MarketConfig { width: 0, ..test_config(5) };
        assert!(matches!(SimBuilder::new(cfg), Err(SimError::Config(_))));

        let cfg = MarketConfig { carrier_speed: 0, ..test_config(5) };
        assert!(SimBuilder::new(cfg).is_err());
    }

    #[test]
    fn oversized_grid_rejected_before_allocation() {
        let cfg = MarketConfig {
            width:      u32::MAX,
            height:     u32::MAX,
            n_shippers: 0,
            n_carriers: 0,
            ..test_config(5)
        };
        assert!(matches!(SimBuilder::new(cfg), Err(SimError::Config(_))));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(5))
            .unwrap()
            .carrier_positions(vec![Cell::new(0, 0); 3])
            .build();
        assert!(matches!(result, Err(SimError::CarrierCountMismatch { expected: 8, got: 3, .. })));
    }

    #[test]
    fn out_of_bounds_position_is_spatial_error() {
        let cfg = MarketConfig { n_carriers: 1, ..test_config(5) };
        let result = SimBuilder::new(cfg)
            .unwrap()
            .carrier_positions(vec![Cell::new(10, 0)])
            .build();
        assert!(matches!(
            result,
            Err(SimError::Agent(AgentError::Spatial(SpatialError::OutOfBounds { .. })))
        ));
    }

    #[test]
    fn pinned_positions_placed_in_index() {
        let cfg = MarketConfig { n_carriers: 2, ..test_config(5) };
        let sim = SimBuilder::new(cfg)
            .unwrap()
            .carrier_positions(vec![Cell::new(1, 2), Cell::new(1, 2)])
            .build()
            .unwrap();
        assert_eq!(sim.market.carrier_grid.cell_contents(Cell::new(1, 2)), &[CarrierId(0), CarrierId(1)]);
        assert_eq!(sim.carriers[1].position(), Some(Cell::new(1, 2)));
    }

    #[test]
    fn random_positions_are_seeded() {
        let a = build(test_config(5));
        let b = build(test_config(5));
        let pos = |s: &Sim| s.carriers.iter().map(|c| c.position()).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_end_tick() {
        let mut sim = build(test_config(10));
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.tick, Tick(10));
        // A second run is a no-op.
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.tick, Tick(10));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = build(test_config(100));
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.tick, Tick(8));
    }

    #[test]
    fn observer_hooks_fire_per_tick() {
        let mut sim = build(test_config(6));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, (0..6).map(Tick).collect::<Vec<_>>());
        let ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, rec.starts);
        assert_eq!(rec.agent_dumps.len(), 6);
        assert_eq!(rec.ended, Some(Tick(6)));
    }

    #[test]
    fn snapshot_interval_respected() {
        let cfg = MarketConfig { output_interval_ticks: 3, ..test_config(7) };
        let mut sim = build(cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.agent_dumps, vec![Tick(0), Tick(3), Tick(6)]);

        let cfg = MarketConfig { output_interval_ticks: 0, ..test_config(7) };
        let mut sim = build(cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.agent_dumps.is_empty());
        assert_eq!(rec.snapshots.len(), 7);
    }

    #[test]
    fn run_ticks_does_not_end_sim() {
        let mut sim = build(test_config(3));
        let mut rec = Recorder::default();
        sim.run_ticks(3, &mut rec).unwrap();
        assert_eq!(rec.ended, None);
    }

    #[test]
    fn snapshot_matches_last_tick_end() {
        let mut sim = build(test_config(20));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots.last(), Some(&sim.snapshot()));
        let snap = sim.snapshot();
        assert_eq!(snap.status.total(), 8);
        assert_eq!(snap.idle_carriers, snap.status.searching);
    }

    #[test]
    fn agent_records_cover_both_populations() {
        let mut sim = build(test_config(30));
        sim.run(&mut NoopObserver).unwrap();
        let records = sim.agent_records();
        assert_eq!(records.len(), 12);
        assert!(records[..4].iter().all(|r| r.status.is_none() && r.loads_moved == 0));
        assert!(records[4..].iter().all(|r| r.status.is_some()));
        // A zero-distance load is delivered one tick before its shipper
        // marks it dropped, so deliveries can lead by a little.
        let moved: u64 = records.iter().map(|r| r.loads_moved).sum();
        let dropped = sim.market.loads.iter().filter(|l| l.is_dropped()).count() as u64;
        assert!(moved >= dropped);
    }

    /// Sends every idle carrier to the origin and counts calls.
    struct ToOrigin(AtomicUsize);

    impl IdleMovement for ToOrigin {
        fn next_cell(&self, _c: CarrierId, _from: Cell, _b: GridBounds, _rng: &mut SimRng) -> Cell {
            self.0.fetch_add(1, Ordering::Relaxed);
            Cell::new(0, 0)
        }
    }

    #[test]
    fn custom_idle_movement_is_used() {
        let cfg = MarketConfig { n_shippers: 0, ..test_config(1) };
        let mut sim = SimBuilder::new(cfg)
            .unwrap()
            .idle_movement(ToOrigin(AtomicUsize::new(0)))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.idle.0.load(Ordering::Relaxed), 8);
        assert_eq!(sim.market.carrier_grid.cell_contents(Cell::new(0, 0)).len(), 8);
    }

    #[test]
    fn random_walk_policy_from_config() {
        let cfg = MarketConfig {
            n_shippers:  0,
            idle_policy: IdlePolicy::RandomWalk { step: 2 },
            ..test_config(10)
        };
        let mut sim = build(cfg);
        let before: Vec<_> = sim.carriers.iter().map(|c| c.position()).collect();
        sim.run(&mut NoopObserver).unwrap();
        let after: Vec<_> = sim.carriers.iter().map(|c| c.position()).collect();
        assert_ne!(before, after);
        for c in &sim.carriers {
            assert_eq!(sim.market.carrier_grid.location(c.id), c.position());
        }
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_carrier_moves_single_load() {
        let cfg = MarketConfig {
            width:                 10,
            height:                10,
            n_shippers:            1,
            n_carriers:            1,
            carrier_speed:         3,
            carrier_search_radius: 10,
            shipper_lead_time:     3,
            total_ticks:           20,
            ..MarketConfig::default()
        };
        let mut sim = SimBuilder::new(cfg)
            .unwrap()
            .carrier_positions(vec![Cell::new(0, 0)])
            .build()
            .unwrap();

        sim.step(&mut NoopObserver).unwrap();
        assert_eq!(sim.market.loads.len(), 1);
        let load = sim.market.loads.iter().next().unwrap().clone();
        assert_eq!(load.planned_tick, Tick(3));
        // Every cell of a 10×10 grid is within 9 of (0,0), and 3 × 3 >= 9.
        assert_eq!(sim.carriers[0].current_load(), Some(load.id));
        assert!(sim.market.load_grid.is_empty());
        assert_eq!(sim.carriers[0].status(), CarrierStatus::Deadheading);

        // Stop posting so the carrier has nothing else to book.
        sim.config.shipper_max_unbooked = 0;

        let drop = load.drop_tick();
        for t in 1..=drop.0 + 1 {
            sim.step(&mut NoopObserver).unwrap();
            let expected = if t < 3 {
                CarrierStatus::Deadheading
            } else if t < drop.0 {
                CarrierStatus::InTransit
            } else {
                CarrierStatus::Searching
            };
            assert_eq!(sim.carriers[0].status(), expected, "tick {t}");
        }

        let carrier = &sim.carriers[0];
        assert_eq!(carrier.loads_moved(), 1);
        assert_eq!(carrier.earnings(), load.rate);
        assert_eq!(carrier.position(), Some(load.destination));
        assert_eq!(sim.market.carrier_grid.location(CarrierId(0)), Some(load.destination));
        assert!(sim.market.loads.get(load.id).unwrap().is_dropped());
    }

    #[test]
    fn ceiling_without_carriers_rolls_forever() {
        let cfg = MarketConfig {
            n_shippers:           1,
            n_carriers:           0,
            shipper_max_unbooked: 1,
            shipper_lead_time:    3,
            total_ticks:          30,
            ..test_config(30)
        };
        let mut sim = build(cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(rec.snapshots.iter().all(|s| s.unbooked_loads <= 1));
        assert_eq!(sim.market.loads.len(), 1);
        let load = sim.market.loads.iter().next().unwrap();
        // Rolled on every tick from 3 through 29.
        assert_eq!(load.roll_count, 27);
        assert_eq!(load.planned_tick, Tick(30));
        let last = rec.snapshots.last().unwrap();
        assert_eq!(last.unbooked_roll_total, 27);
        assert_eq!(last.unbooked_roll_mean, 27.0);
    }

    #[test]
    fn empty_market_has_zero_roll_mean() {
        let cfg = MarketConfig { n_shippers: 0, ..test_config(3) };
        let mut sim = build(cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.snapshots.iter().all(|s| s.unbooked_loads == 0 && s.unbooked_roll_mean == 0.0));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use fm_agent::{Load, is_reachable};
    use fm_core::LoadId;
    use proptest::prelude::*;

    use super::*;

    fn config_strategy() -> impl Strategy<Value = MarketConfig> {
        (
            (1u32..12, 1u32..12),
            (0usize..6, 0usize..12),
            (1u32..5, 0u32..3),
            (0usize..4, 1u64..5),
            prop_oneof![Just(IdlePolicy::StayPut), (1u32..3).prop_map(|step| IdlePolicy::RandomWalk { step })],
            any::<u64>(),
            1u64..40,
        )
            .prop_map(|((w, h), (ns, nc), (speed, radius), (ceiling, lead), idle, seed, ticks)| {
                MarketConfig {
                    width:                 w,
                    height:                h,
                    n_shippers:            ns,
                    n_carriers:            nc,
                    carrier_speed:         speed,
                    carrier_search_radius: radius,
                    shipper_max_unbooked:  ceiling,
                    shipper_lead_time:     lead,
                    shipper_starting_rate: 2.0,
                    idle_policy:           idle,
                    seed,
                    total_ticks:           ticks,
                    output_interval_ticks: 1,
                }
            })
    }

    /// Loads held by each carrier: current first, then the queue.
    fn held(sim: &Sim) -> Vec<Vec<LoadId>> {
        sim.carriers
            .iter()
            .map(|c| c.current_load().into_iter().chain(c.queued_loads()).collect())
            .collect()
    }

    /// Where and when each carrier with an empty queue is next free.
    fn references(sim: &Sim) -> Vec<Option<(Tick, Cell, Option<Tick>)>> {
        sim.carriers
            .iter()
            .map(|c| {
                if c.queued_loads().len() > 0 {
                    return None;
                }
                Some(match c.current_load() {
                    Some(id) => {
                        let l = sim.market.loads.get(id).unwrap();
                        (l.drop_tick(), l.destination, Some(l.drop_tick()))
                    }
                    None => (sim.tick, c.position().unwrap(), None),
                })
            })
            .collect()
    }

    fn check_tick(sim: &Sim, before: &[Load], held_before: &[Vec<LoadId>], refs: &[Option<(Tick, Cell, Option<Tick>)>]) {
        // Load monotonicity and roll-only-while-unbooked.
        for prev in before {
            let now = sim.market.loads.get(prev.id).unwrap();
            assert!(now.state() >= prev.state(), "{} regressed", prev.id);
            if prev.is_booked() {
                assert_eq!(now.roll_count, prev.roll_count);
                assert_eq!(now.planned_tick, prev.planned_tick);
            } else {
                assert!(now.roll_count - prev.roll_count <= 1);
            }
        }

        // Index/state consistency.
        for c in &sim.carriers {
            assert_eq!(sim.market.carrier_grid.contains(c.id), c.current_load().is_none());
        }
        for l in sim.market.loads.iter() {
            assert_eq!(sim.market.load_grid.contains(l.id), !l.is_booked());
        }

        // No double booking.
        let held_now = held(sim);
        let mut seen = HashSet::new();
        for id in held_now.iter().flatten() {
            assert!(seen.insert(*id), "{id} held twice");
            assert!(sim.market.loads.get(*id).unwrap().is_booked());
        }

        // Reachability of every booking made this tick.
        let speed = sim.config.carrier_speed;
        for (i, now) in held_now.iter().enumerate() {
            let new: Vec<LoadId> = now.iter().filter(|id| !held_before[i].contains(id)).copied().collect();
            assert!(new.len() <= 1);
            if let Some(&id) = new.first() {
                let (ref_tick, ref_pos, busy_until) = refs[i].expect("booked with a non-empty queue");
                let load = sim.market.loads.get(id).unwrap();
                assert!(is_reachable(speed, ref_tick, ref_pos, load));
                assert!(busy_until.is_none_or(|drop| load.planned_tick > drop));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_every_tick(cfg in config_strategy()) {
            let ticks = cfg.total_ticks;
            let mut sim = SimBuilder::new(cfg).unwrap().build().unwrap();
            for _ in 0..ticks {
                let before: Vec<Load> = sim.market.loads.iter().cloned().collect();
                let held_before = held(&sim);
                let refs = references(&sim);
                sim.step(&mut NoopObserver).unwrap();
                check_tick(&sim, &before, &held_before, &refs);
            }
            for s in &sim.shippers {
                prop_assert!(s.unbooked_count(&sim.market.loads) <= sim.config.shipper_max_unbooked);
            }
        }

        #[test]
        fn same_seed_same_metrics(cfg in config_strategy()) {
            let run = |cfg: MarketConfig| {
                let mut sim = SimBuilder::new(cfg).unwrap().build().unwrap();
                let mut rec = Recorder::default();
                sim.run(&mut rec).unwrap();
                (rec.snapshots, sim.agent_records())
            };
            prop_assert_eq!(run(cfg.clone()), run(cfg));
        }
    }
}
