//! Greedy mining strategy.
//!
//! The `Prospector` mines until its hold is nearly full, then carries the
//! cargo to the nearest base. Near the end of the match every ship with cargo
//! makes a final dash home.
//!
//! # Decision order
//!
//! 1. Too poor to pay the move cost of the current cell: stay.
//! 2. Final dash due: head for the nearest own base (`final_dash` set).
//! 3. Not returning and the current cell is rich: stay and mine.
//! 4. Returning (cargo at the threshold): head for the nearest own base.
//! 5. Otherwise head for the cell with the best `halite / (distance + 1)`.
//!
//! Moves that shrink the distance to the target come first in a seeded random
//! order, then staying, then the remaining moves.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use shoal::{Coord, Direction};

use crate::action::Action;
use crate::entity::Ship;
use crate::snapshot::TurnSnapshot;
use crate::strategy::{Plan, PlanContext, Strategy, StrategyId};

/// Thresholds for [`Prospector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProspectorConfig {
    /// Cargo at which the ship heads home.
    pub return_threshold: u32,
    /// A cell with more halite than this is worth staying on.
    pub happy_cell: u32,
    /// Spare turns allowed for the final dash home.
    pub dash_margin: u32,
}

impl Default for ProspectorConfig {
    fn default() -> Self {
        Self {
            return_threshold: 800,
            happy_cell: 50,
            dash_margin: 4,
        }
    }
}

/// Greedy miner; see the module documentation.
///
/// # Example
///
/// ```
/// use flotilla_core::strategies::Prospector;
/// use flotilla_core::strategy::Strategy;
///
/// let strategy = Prospector::default();
/// assert_eq!(strategy.id().as_str(), "prospector");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Prospector {
    config: ProspectorConfig,
}

impl Prospector {
    /// Creates a prospector with the given thresholds.
    #[must_use]
    pub const fn new(config: ProspectorConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ProspectorConfig {
        &self.config
    }

    /// Best cell by `halite / (distance + 1)`; the first in row-major order
    /// wins ties.
    fn best_cell(snapshot: &TurnSnapshot, ship: &Ship) -> Coord {
        let torus = snapshot.torus();
        let mut best = ship.position;
        let mut best_score = 0;
        for cell in snapshot.field().cells() {
            let score = cell.amount / (torus.distance(ship, &cell) + 1);
            if score > best_score {
                best = cell.coord;
                best_score = score;
            }
        }
        best
    }

    /// Ranked actions that bring the ship toward `target`.
    fn navigate(ctx: &PlanContext, snapshot: &TurnSnapshot, ship: &Ship, target: Coord) -> Vec<Action> {
        let delta = snapshot.torus().delta(ship, &target);
        let mut closer = Direction::toward(delta);
        if closer.is_empty() {
            return vec![Action::Stay];
        }

        let mut rng = ChaCha8Rng::seed_from_u64(ctx.rng_seed);
        closer.shuffle(&mut rng);

        let mut preferences: Vec<Action> = closer.iter().copied().map(Action::from_direction).collect();
        preferences.push(Action::Stay);
        preferences.extend(
            Action::MOVES
                .into_iter()
                .filter(|action| !closer.contains(&action.direction())),
        );
        preferences
    }
}

impl Strategy for Prospector {
    fn id(&self) -> StrategyId {
        StrategyId::new("prospector")
    }

    fn plan(&self, ctx: &PlanContext, snapshot: &TurnSnapshot, ship: &Ship) -> Plan {
        let torus = snapshot.torus();
        let cell_halite = snapshot.halite_at(ship.position);

        if ship.halite < snapshot.constants().move_cost(cell_halite) {
            return Plan::hold();
        }

        let home = snapshot
            .nearest_structure(ship.owner, ship)
            .map(|s| s.position);

        if let Some(home) = home {
            let distance = torus.distance(ship, &home);
            let dash_due = ship.halite > 0
                && snapshot.turns_remaining() <= distance + self.config.dash_margin;
            if dash_due {
                return Plan::new(Self::navigate(ctx, snapshot, ship, home))
                    .with_target(home)
                    .dashing();
            }
        }

        let returning = ship.halite >= self.config.return_threshold;

        if !returning && cell_halite > self.config.happy_cell {
            return Plan::hold();
        }

        let target = match home {
            Some(home) if returning => home,
            _ => Self::best_cell(snapshot, ship),
        };

        Plan::new(Self::navigate(ctx, snapshot, ship, target)).with_target(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{PlayerId, ShipId, Structure, StructureKind};
    use crate::protocol::GameConstants;
    use shoal::{ResourceField, Torus};

    fn snapshot(turn: u32) -> TurnSnapshot {
        let field = ResourceField::new(Torus::new(16, 16).unwrap());
        let mut snap = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
        snap.add_structure(Structure::new(
            PlayerId::new(0),
            Coord::new(0, 0),
            StructureKind::Shipyard,
        ));
        snap.begin_frame(turn);
        snap
    }

    fn place(snap: &mut TurnSnapshot, x: i32, y: i32, halite: u32) -> Ship {
        let ship = Ship::new(ShipId::new(1), PlayerId::new(0), Coord::new(x, y), halite);
        snap.insert_ship(ship.clone());
        ship
    }

    fn ctx(seed: u64) -> PlanContext {
        PlanContext {
            ship_id: ShipId::new(1),
            turn: 0,
            rng_seed: seed,
        }
    }

    mod hold_tests {
        use super::*;

        #[test]
        fn too_poor_to_move_holds() {
            let mut snap = snapshot(0);
            snap.set_halite(Coord::new(5, 5), 300);
            let ship = place(&mut snap, 5, 5, 10);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert_eq!(plan, Plan::hold());
        }

        #[test]
        fn rich_cell_holds() {
            let mut snap = snapshot(0);
            snap.set_halite(Coord::new(5, 5), 200);
            let ship = place(&mut snap, 5, 5, 100);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert_eq!(plan.preferences, vec![Action::Stay]);
        }
    }

    mod target_tests {
        use super::*;

        #[test]
        fn heads_for_best_cell() {
            let mut snap = snapshot(0);
            snap.set_halite(Coord::new(8, 5), 400);
            let ship = place(&mut snap, 5, 5, 0);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert_eq!(plan.target, Some(Coord::new(8, 5)));
            assert_eq!(plan.preferences[0], Action::East);
            assert_eq!(plan.preferences[1], Action::Stay);
            assert_eq!(plan.preferences.len(), 5);
            assert!(!plan.final_dash);
        }

        #[test]
        fn full_ship_returns_home() {
            let mut snap = snapshot(0);
            snap.set_halite(Coord::new(5, 5), 200);
            let ship = place(&mut snap, 5, 5, 900);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert_eq!(plan.target, Some(Coord::new(0, 0)));
            let first_two: Vec<_> = plan.preferences[..2].to_vec();
            assert!(first_two.contains(&Action::West));
            assert!(first_two.contains(&Action::North));
            assert_eq!(plan.preferences[2], Action::Stay);
        }

        #[test]
        fn returns_across_the_seam() {
            let mut snap = snapshot(0);
            let ship = place(&mut snap, 15, 0, 900);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert_eq!(plan.preferences[0], Action::East);
        }

        #[test]
        fn same_seed_same_order() {
            let mut snap = snapshot(0);
            let ship = place(&mut snap, 5, 5, 900);
            let strategy = Prospector::default();
            let a = strategy.plan(&ctx(77), &snap, &ship);
            let b = strategy.plan(&ctx(77), &snap, &ship);
            assert_eq!(a, b);
        }

        #[test]
        fn every_action_appears_once() {
            let mut snap = snapshot(0);
            let ship = place(&mut snap, 5, 5, 900);
            for seed in 0..16 {
                let mut prefs = Prospector::default().plan(&ctx(seed), &snap, &ship).preferences;
                prefs.sort();
                assert_eq!(
                    prefs,
                    vec![Action::North, Action::South, Action::East, Action::West, Action::Stay]
                );
            }
        }
    }

    mod dash_tests {
        use super::*;

        #[test]
        fn end_of_match_triggers_final_dash() {
            let mut snap = snapshot(395);
            snap.set_halite(Coord::new(1, 0), 500);
            let ship = place(&mut snap, 1, 0, 100);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert!(plan.final_dash);
            assert_eq!(plan.target, Some(Coord::new(0, 0)));
            assert_eq!(plan.preferences[0], Action::West);
        }

        #[test]
        fn empty_ships_do_not_dash() {
            let mut snap = snapshot(395);
            let ship = place(&mut snap, 1, 0, 0);
            let plan = Prospector::default().plan(&ctx(0), &snap, &ship);
            assert!(!plan.final_dash);
        }
    }
}
