//! Fluent builder for constructing a [`Sim`].

use fm_agent::{CarrierAgent, Market, ShipperAgent};
use fm_behavior::IdleMovement;
use fm_core::{CarrierId, Cell, IdlePolicy, MarketConfig, ShipperId, SimRng, Tick};
use tracing::info;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                                  |
/// |---------------------------|------------------------------------------|
/// | `.idle_movement(m)`       | `config.idle_policy`                     |
/// | `.carrier_positions(v)`   | One uniform random cell per carrier      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(MarketConfig::default())?
///     .idle_movement(RandomWalk::new(2)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: IdleMovement = IdlePolicy> {
    config:    MarketConfig,
    idle:      M,
    positions: Option<Vec<Cell>>,
}

impl SimBuilder<IdlePolicy> {
    /// Validate `config` and start a builder whose idle movement follows
    /// `config.idle_policy`.
    pub fn new(config: MarketConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            idle: config.idle_policy,
            config,
            positions: None,
        })
    }
}

impl<M: IdleMovement> SimBuilder<M> {
    /// Replace the idle-movement policy.
    pub fn idle_movement<N: IdleMovement>(self, idle: N) -> SimBuilder<N> {
        SimBuilder {
            config:    self.config,
            idle,
            positions: self.positions,
        }
    }

    /// Pin the initial cell of every carrier (must be length `n_carriers`).
    pub fn carrier_positions(mut self, positions: Vec<Cell>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Seed the RNG, create both agent populations and place every carrier
    /// in the idle-carrier index.
    pub fn build(self) -> SimResult<Sim<M>> {
        let config = self.config;
        let mut rng = SimRng::new(config.seed);
        let mut market = Market::new(&config);

        let positions = match self.positions {
            Some(p) => {
                if p.len() != config.n_carriers {
                    return Err(SimError::CarrierCountMismatch {
                        expected: config.n_carriers,
                        got:      p.len(),
                        what:     "carrier positions",
                    });
                }
                p
            }
            None => {
                let bounds = config.bounds();
                (0..config.n_carriers).map(|_| rng.cell(bounds)).collect()
            }
        };

        let shippers = (0..config.n_shippers)
            .map(|i| ShipperAgent::new(ShipperId(i as u32)))
            .collect();

        let mut carriers = Vec::with_capacity(positions.len());
        for (i, cell) in positions.into_iter().enumerate() {
            let id = CarrierId(i as u32);
            market.carrier_grid.place(id, cell).map_err(fm_agent::AgentError::from)?;
            carriers.push(CarrierAgent::new(id, cell));
        }

        info!(
            grid = %config.bounds(),
            shippers = config.n_shippers,
            carriers = config.n_carriers,
            seed = config.seed,
            "market sim built"
        );

        Ok(Sim {
            config,
            tick: Tick::ZERO,
            shippers,
            carriers,
            market,
            rng,
            idle: self.idle,
        })
    }
}
