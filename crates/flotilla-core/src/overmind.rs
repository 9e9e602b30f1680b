//! Per-turn orchestration for one player.
//!
//! The `Overmind` runs the turn pipeline against a refreshed
//! [`TurnSnapshot`]:
//!
//! 1. **INSPIRE**: recompute inspiration flags for every ship
//! 2. **PLAN**: ask the strategy for a [`Plan`] per own ship, in parallel
//! 3. **ARBITRATE**: resolve all plans into collision-free commitments
//! 4. **COMMIT**: write commitments back to [`Ship::command`], charge dropoff
//!    conversions against the budget and decide whether to spawn
//!
//! # Determinism
//!
//! Planning runs on the rayon pool but results are collected into a
//! `BTreeMap` keyed by ship id, and every ship's random seed is a hash of
//! (master seed, turn, ship id). The same snapshot and seed always produce the
//! same orders.
//!
//! # Example
//!
//! ```
//! use flotilla_core::entity::{PlayerId, Ship, ShipId, Structure, StructureKind};
//! use flotilla_core::overmind::{Overmind, OvermindConfig};
//! use flotilla_core::protocol::GameConstants;
//! use flotilla_core::snapshot::TurnSnapshot;
//! use shoal::{Coord, ResourceField, Torus};
//!
//! let field = ResourceField::new(Torus::new(16, 16).unwrap());
//! let mut snapshot = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
//! snapshot.add_structure(Structure::new(PlayerId::new(0), Coord::new(8, 8), StructureKind::Shipyard));
//! snapshot.begin_frame(0);
//! snapshot.insert_ship(Ship::new(ShipId::new(0), PlayerId::new(0), Coord::new(3, 3), 0));
//! snapshot.set_budget(PlayerId::new(0), 5000);
//! snapshot.finish_frame();
//!
//! let mut overmind = Overmind::prospector(OvermindConfig::default());
//! let orders = overmind.step(&mut snapshot).unwrap();
//! assert!(orders.spawned());
//! assert!(orders.to_wire().starts_with('g'));
//! ```

use rayon::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use shoal::Coord;

use crate::action::{Action, Command};
use crate::arbitration::{Arbiter, ArbiterConfig, InspirationScanner, Resolution, SUPPORTED_RADIUS};
use crate::entity::{Ship, ShipId};
use crate::error::ArbitrationError;
use crate::snapshot::TurnSnapshot;
use crate::strategies::Prospector;
use crate::strategy::{Plan, PlanContext, Strategy};

// =============================================================================
// Configuration
// =============================================================================

/// Settings for [`Overmind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvermindConfig {
    /// Master seed for per-ship randomness.
    pub seed: u64,
    /// Arbitration settings.
    pub arbiter: ArbiterConfig,
    /// Radius the inspiration table is built for.
    pub inspiration_radius: u32,
    /// No spawning once this few turns remain.
    pub spawn_cutoff: u32,
}

impl Default for OvermindConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            arbiter: ArbiterConfig::default(),
            inspiration_radius: SUPPORTED_RADIUS,
            spawn_cutoff: 200,
        }
    }
}

// =============================================================================
// Turn Orders
// =============================================================================

/// Everything decided for one turn.
#[derive(Debug, Clone)]
pub struct TurnOrders {
    commands: Vec<Command>,
    resolution: Resolution,
    spawned: bool,
}

impl TurnOrders {
    /// Commands in submission order: spawn first, then ships by id.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The arbitration this turn's commands came from.
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// True if a spawn was ordered.
    #[must_use]
    pub const fn spawned(&self) -> bool {
        self.spawned
    }

    /// The submission line, without the trailing newline.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Overmind
// =============================================================================

/// Runs the turn pipeline for the controlling player.
pub struct Overmind {
    config: OvermindConfig,
    strategy: Box<dyn Strategy>,
    arbiter: Arbiter,
    inspiration: InspirationScanner,
}

impl fmt::Debug for Overmind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overmind")
            .field("config", &self.config)
            .field("strategy", &self.strategy.id())
            .field("inspiration", &self.inspiration)
            .finish_non_exhaustive()
    }
}

impl Overmind {
    /// Creates an overmind driving every own ship with `strategy`.
    #[must_use]
    pub fn new(config: OvermindConfig, strategy: impl Strategy + 'static) -> Self {
        Self {
            config,
            strategy: Box::new(strategy),
            arbiter: Arbiter::new(config.arbiter),
            inspiration: InspirationScanner::new(config.inspiration_radius),
        }
    }

    /// Creates an overmind using the default [`Prospector`].
    #[must_use]
    pub fn prospector(config: OvermindConfig) -> Self {
        Self::new(config, Prospector::default())
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OvermindConfig {
        &self.config
    }

    /// The inspiration scanner (and its warn-once state).
    #[must_use]
    pub const fn inspiration(&self) -> &InspirationScanner {
        &self.inspiration
    }

    /// Plans, arbitrates and commits one turn.
    ///
    /// Ship commands are written into `snapshot`; the returned orders hold the
    /// wire commands and the full resolution.
    ///
    /// # Errors
    ///
    /// Propagates [`ArbitrationError`] from the arbiter. These indicate a
    /// broken strategy or snapshot, never contention.
    pub fn step(&mut self, snapshot: &mut TurnSnapshot) -> Result<TurnOrders, ArbitrationError> {
        let inspired = self.inspiration.apply(snapshot);

        let plans = self.plan_fleet(snapshot);
        let resolution = self.arbiter.resolve(snapshot, &plans)?;

        for (id, action) in resolution.commitments() {
            if let Some(ship) = snapshot.ship_mut(id) {
                ship.command = action;
            }
        }

        let mut budget = snapshot.budget(snapshot.me());
        let mut ship_commands = Vec::new();
        for (id, action) in resolution.commitments() {
            let Some(action) = action else { continue };
            if action == Action::Convert {
                let cost = snapshot.constants().dropoff_cost;
                if budget < cost {
                    tracing::warn!(ship = %id, budget, cost, "construct blocked by budget");
                    if let Some(ship) = snapshot.ship_mut(id) {
                        ship.command = None;
                    }
                    continue;
                }
                budget -= cost;
            }
            ship_commands.push(Command::for_ship(id, action));
        }

        let spawned = self.should_spawn(snapshot, &resolution, budget);

        let mut commands = Vec::with_capacity(ship_commands.len() + 1);
        if spawned {
            commands.push(Command::Spawn);
        }
        commands.extend(ship_commands);

        tracing::debug!(
            turn = snapshot.turn(),
            ships = plans.len(),
            inspired,
            evictions = resolution.evictions().len(),
            unresolved = resolution.unresolved().len(),
            passes = resolution.passes_used(),
            spawned,
            "turn resolved"
        );

        Ok(TurnOrders {
            commands,
            resolution,
            spawned,
        })
    }

    /// Runs the strategy for every own ship in parallel.
    fn plan_fleet(&self, snapshot: &TurnSnapshot) -> BTreeMap<ShipId, Plan> {
        let turn = snapshot.turn();
        let ships: Vec<&Ship> = snapshot.my_ships().collect();

        ships
            .par_iter()
            .map(|ship| {
                let ctx = PlanContext {
                    ship_id: ship.id,
                    turn,
                    rng_seed: self.plan_seed(turn, ship.id),
                };
                (ship.id, self.strategy.plan(&ctx, snapshot, ship))
            })
            .collect()
    }

    /// Deterministic per-ship seed from (master seed, turn, ship).
    fn plan_seed(&self, turn: u32, ship: ShipId) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.config.seed.hash(&mut hasher);
        turn.hash(&mut hasher);
        ship.hash(&mut hasher);
        hasher.finish()
    }

    /// Spawn when affordable, early enough, and nothing ends the turn on the
    /// shipyard.
    fn should_spawn(&self, snapshot: &TurnSnapshot, resolution: &Resolution, budget: u32) -> bool {
        let cost = snapshot.constants().new_entity_energy_cost;
        if budget < cost || snapshot.turns_remaining() < self.config.spawn_cutoff {
            return false;
        }
        let Some(yard) = snapshot.shipyard_of(snapshot.me()).map(|s| s.position) else {
            return false;
        };
        !Self::yard_occupied(snapshot, resolution, yard)
    }

    fn yard_occupied(snapshot: &TurnSnapshot, resolution: &Resolution, yard: Coord) -> bool {
        if resolution.claimant(yard).is_some() {
            return true;
        }
        // Ships that end on the yard without holding a claim.
        let torus = snapshot.torus();
        snapshot.my_ships().any(|ship| match ship.command {
            None => ship.position == yard,
            Some(action) => {
                resolution.is_dash(ship.id) && action.destination(torus, ship.position) == yard
            }
        })
    }
}
