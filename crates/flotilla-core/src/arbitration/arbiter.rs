//! The claim-and-evict move arbiter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shoal::Coord;

use crate::action::Action;
use crate::entity::{PlayerId, ShipId};
use crate::error::ArbitrationError;
use crate::snapshot::TurnSnapshot;
use crate::strategy::Plan;

use super::booking::BookingGrid;

/// Tuning for [`Arbiter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Resolution passes after the stationary pre-pass.
    pub max_passes: usize,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self { max_passes: 5 }
    }
}

/// One ship taking part in arbitration.
#[derive(Debug, Clone)]
struct Unit<'a> {
    id: ShipId,
    owner: PlayerId,
    position: Coord,
    halite: u32,
    plan: &'a Plan,
}

/// A claim transferred from a lighter ship to a heavier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eviction {
    /// The ship that took the cell.
    pub evictor: ShipId,
    /// The ship that lost its commitment.
    pub evicted: ShipId,
    /// The contested cell.
    pub cell: Coord,
    /// One-based pass in which it happened.
    pub pass: usize,
}

/// Outcome of one arbitration.
///
/// Units are indexed in ascending ship id order; the booking grid stores
/// those indices.
#[derive(Debug, Clone)]
pub struct Resolution {
    ships: Vec<ShipId>,
    positions: Vec<Coord>,
    commitments: Vec<Option<Action>>,
    dashed: Vec<bool>,
    booking: BookingGrid,
    evictions: Vec<Eviction>,
    unresolved: Vec<ShipId>,
    passes_used: usize,
}

impl Resolution {
    fn index_of(&self, ship: ShipId) -> Option<usize> {
        self.ships.binary_search(&ship).ok()
    }

    /// The committed action for a ship; `None` if it was not arbitrated or no
    /// safe move was found.
    #[must_use]
    pub fn action(&self, ship: ShipId) -> Option<Action> {
        self.index_of(ship).and_then(|i| self.commitments[i])
    }

    /// The cell a committed ship ends the turn on.
    #[must_use]
    pub fn destination(&self, ship: ShipId) -> Option<Coord> {
        let i = self.index_of(ship)?;
        let action = self.commitments[i]?;
        Some(action.destination(self.booking.torus(), self.positions[i]))
    }

    /// The ship holding the claim on a (wrapped) cell.
    #[must_use]
    pub fn claimant(&self, cell: Coord) -> Option<ShipId> {
        let cell = self.booking.torus().wrap(cell);
        self.booking.lookup(cell).map(|i| self.ships[i])
    }

    /// True if the ship skipped arbitration on its final step home.
    #[must_use]
    pub fn is_dash(&self, ship: ShipId) -> bool {
        self.index_of(ship).is_some_and(|i| self.dashed[i])
    }

    /// Every arbitrated ship with its commitment, in id order.
    pub fn commitments(&self) -> impl Iterator<Item = (ShipId, Option<Action>)> + '_ {
        self.ships.iter().copied().zip(self.commitments.iter().copied())
    }

    /// Number of arbitrated ships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// True if nothing was arbitrated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Evictions in the order they happened.
    #[must_use]
    pub fn evictions(&self) -> &[Eviction] {
        &self.evictions
    }

    /// Ships left without a command, in id order.
    #[must_use]
    pub fn unresolved(&self) -> &[ShipId] {
        &self.unresolved
    }

    /// Resolution passes that had work to do.
    #[must_use]
    pub const fn passes_used(&self) -> usize {
        self.passes_used
    }

    /// The final booking grid.
    #[must_use]
    pub const fn booking(&self) -> &BookingGrid {
        &self.booking
    }
}

/// Assigns one action per ship so that no two ships end on the same cell.
///
/// # Algorithm
///
/// 1. **Stationary pre-pass**: every ship whose top preference is
///    [`Action::Stay`] commits immediately and claims its own cell. A cell
///    claimed by a ship committed to stay is never evicted.
/// 2. **Worklist passes** (at most [`ArbiterConfig::max_passes`]): every
///    uncommitted ship is visited in ascending id order.
///    - A ship on its final dash, one step from its own base, commits its top
///      preference without claiming anything.
///    - Otherwise its preferences are scanned in rank order. A free
///      destination is claimed. A destination held by a stayer is skipped. A
///      destination held by a ship carrying strictly less halite is taken
///      over: the holder loses its commitment and is queued for the next
///      pass. Anything else is skipped.
///    - A ship that places nothing is queued for the next pass.
/// 3. Ships still queued after the last pass get no command and are logged.
///
/// Contention never produces an error. Errors are reserved for plans naming
/// ships that are not alive in the snapshot, and for empty preference lists.
#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    config: ArbiterConfig,
}

impl Arbiter {
    /// Creates an arbiter with the given configuration.
    #[must_use]
    pub const fn new(config: ArbiterConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// Resolves the plans of one turn.
    ///
    /// # Errors
    ///
    /// - [`ArbitrationError::StaleShip`] / [`ArbitrationError::UnknownShip`]
    ///   if a plan names a ship that is not alive in `snapshot`
    /// - [`ArbitrationError::EmptyPreferences`] if a plan has no candidates
    pub fn resolve(
        &self,
        snapshot: &TurnSnapshot,
        plans: &BTreeMap<ShipId, Plan>,
    ) -> Result<Resolution, ArbitrationError> {
        let units = plans
            .iter()
            .map(|(&id, plan)| {
                let ship = snapshot.live_ship(id)?;
                if plan.preferences.is_empty() {
                    return Err(ArbitrationError::EmptyPreferences(id));
                }
                Ok(Unit {
                    id,
                    owner: ship.owner,
                    position: ship.position,
                    halite: ship.halite,
                    plan,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let torus = *snapshot.torus();
        let mut booking = BookingGrid::new(torus);
        let mut commitments: Vec<Option<Action>> = vec![None; units.len()];
        let mut dashed = vec![false; units.len()];
        let mut evictions = Vec::new();

        // Stationary pre-pass
        for (i, unit) in units.iter().enumerate() {
            if unit.plan.preferences[0] == Action::Stay {
                commitments[i] = Some(Action::Stay);
                booking.claim(unit.position, i);
            }
        }

        let mut queue: Vec<usize> = (0..units.len())
            .filter(|&i| commitments[i].is_none())
            .collect();
        let mut passes_used = 0;

        for pass in 1..=self.config.max_passes {
            if queue.is_empty() {
                break;
            }
            passes_used = pass;
            let mut next = Vec::new();

            for i in queue {
                if commitments[i].is_some() {
                    continue;
                }
                let unit = &units[i];

                if Self::dash_applies(snapshot, unit) {
                    commitments[i] = Some(unit.plan.preferences[0]);
                    dashed[i] = true;
                    continue;
                }

                // An uncommitted ship never holds a claim: eviction hands the
                // cell to the evictor before the evicted ship is queued.
                debug_assert!(
                    booking.claims().all(|(_, holder)| holder != i),
                    "uncommitted ship {} still holds a claim",
                    unit.id
                );

                let mut placed = false;
                for &action in &unit.plan.preferences {
                    let cell = action.destination(&torus, unit.position);
                    match booking.lookup(cell) {
                        None => {
                            booking.claim(cell, i);
                        }
                        Some(holder) if commitments[holder] == Some(Action::Stay) => continue,
                        Some(holder) if units[holder].halite < unit.halite => {
                            booking.release(cell);
                            booking.claim(cell, i);
                            commitments[holder] = None;
                            next.push(holder);
                            evictions.push(Eviction {
                                evictor: unit.id,
                                evicted: units[holder].id,
                                cell,
                                pass,
                            });
                            tracing::trace!(
                                evictor = %unit.id,
                                evicted = %units[holder].id,
                                cell = %cell,
                                "claim evicted"
                            );
                        }
                        Some(_) => continue,
                    }
                    commitments[i] = Some(action);
                    placed = true;
                    break;
                }

                if !placed {
                    next.push(i);
                }
            }

            next.sort_unstable();
            next.dedup();
            queue = next;
        }

        let mut unresolved = Vec::new();
        for (i, unit) in units.iter().enumerate() {
            if commitments[i].is_none() {
                tracing::warn!(
                    ship = %unit.id,
                    first_desire = %unit.plan.preferences[0],
                    "no safe move found"
                );
                unresolved.push(unit.id);
            }
        }

        Ok(Resolution {
            ships: units.iter().map(|u| u.id).collect(),
            positions: units.iter().map(|u| u.position).collect(),
            commitments,
            dashed,
            booking,
            evictions,
            unresolved,
            passes_used,
        })
    }

    fn dash_applies(snapshot: &TurnSnapshot, unit: &Unit<'_>) -> bool {
        if !unit.plan.final_dash {
            return false;
        }
        unit.plan.target.is_some_and(|target| {
            snapshot.is_structure_of(unit.owner, target)
                && snapshot.torus().distance(&unit.position, &target) == 1
        })
    }
}
