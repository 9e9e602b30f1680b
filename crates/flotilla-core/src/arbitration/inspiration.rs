//! Neighbour-density ("inspiration") flags.

use std::collections::BTreeSet;

use shoal::{Coord, Diamond};

use crate::entity::ShipId;
use crate::snapshot::TurnSnapshot;

/// Radius the engine uses in every known configuration.
pub const SUPPORTED_RADIUS: u32 = 4;

/// Marks ships that have enough enemy ships close by.
///
/// The diamond of offsets is built once at construction. Each turn,
/// [`apply`](InspirationScanner::apply) compares its radius with the radius
/// the engine announced; on a mismatch it clears every flag and warns, once
/// per scanner. A radius above [`Diamond::MAX_RADIUS`] gets no table and
/// mismatches every turn.
#[derive(Debug, Clone)]
pub struct InspirationScanner {
    radius: u32,
    diamond: Option<Diamond>,
    warned: bool,
}

impl Default for InspirationScanner {
    fn default() -> Self {
        Self::new(SUPPORTED_RADIUS)
    }
}

impl InspirationScanner {
    /// Precomputes the offset table for `radius`.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            diamond: Diamond::try_new(radius),
            warned: false,
        }
    }

    /// Radius the scanner was configured for.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// True once the radius-mismatch warning has been emitted.
    #[must_use]
    pub const fn has_warned(&self) -> bool {
        self.warned
    }

    /// Recomputes the inspiration flag of every live ship.
    ///
    /// A ship is inspired when at least `INSPIRATION_SHIP_COUNT` ships of other
    /// owners sit within `INSPIRATION_RADIUS` (toroidal Manhattan distance) of
    /// it. Returns the number of inspired ships.
    pub fn apply(&mut self, snapshot: &mut TurnSnapshot) -> usize {
        for ship in snapshot.ships_mut() {
            ship.set_inspired(false);
        }

        let configured = snapshot.constants().inspiration_radius;
        let diamond = match &self.diamond {
            Some(diamond) if diamond.radius() == configured => diamond,
            _ => {
                if !self.warned {
                    tracing::warn!(
                        configured,
                        supported = self.radius,
                        "inspiration radius mismatch, flags left unset"
                    );
                    self.warned = true;
                }
                return 0;
            }
        };

        let inspired = Self::inspired_ships(diamond, snapshot);
        for id in &inspired {
            if let Some(ship) = snapshot.ship_mut(*id) {
                ship.set_inspired(true);
            }
        }
        inspired.len()
    }

    fn inspired_ships(diamond: &Diamond, snapshot: &TurnSnapshot) -> Vec<ShipId> {
        let torus = snapshot.torus();
        let threshold = snapshot.constants().inspiration_ship_count as usize;
        let fits = diamond.fits(torus);

        snapshot
            .ships()
            .filter(|ship| {
                let enemy_at = |cell: Coord| {
                    snapshot
                        .ship_at(cell)
                        .is_some_and(|other| other.owner != ship.owner)
                };
                let cells = diamond.cells_around(torus, ship.position);
                let hits = if fits {
                    cells.filter(|&cell| enemy_at(cell)).count()
                } else {
                    // Offsets alias on small grids; count each cell once.
                    cells
                        .filter(|&cell| cell != ship.position)
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .filter(|&cell| enemy_at(cell))
                        .count()
                };
                hits >= threshold
            })
            .map(|ship| ship.id)
            .collect()
    }
}
