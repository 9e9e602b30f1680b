//! Test helper functions for building snapshots and advancing matches.
//!
//! [`advance`] is a small stand-in for the game engine: it applies the
//! committed commands of every ship, mines, deposits, spawns and removes
//! colliding ships, then refreshes the snapshot as the next frame.

use std::collections::{BTreeMap, HashMap};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shoal::{Coord, ResourceField, Torus};

use crate::action::Action;
use crate::entity::{PlayerId, Ship, ShipId, Structure, StructureKind};
use crate::protocol::GameConstants;
use crate::snapshot::TurnSnapshot;
use crate::strategy::Plan;

// =============================================================================
// Snapshot Setup
// =============================================================================

/// A two-player snapshot at turn 0 with an empty field and no structures.
pub fn empty_snapshot(width: i32, height: i32) -> TurnSnapshot {
    let field = ResourceField::new(Torus::new(width, height).unwrap());
    let mut snapshot = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
    snapshot.begin_frame(0);
    snapshot
}

/// Adds a ship to the current frame.
pub fn add_ship(snapshot: &mut TurnSnapshot, id: u32, owner: u32, at: (i32, i32), halite: u32) {
    snapshot.insert_ship(Ship::new(
        ShipId::new(id),
        PlayerId::new(owner),
        Coord::new(at.0, at.1),
        halite,
    ));
}

/// Adds a shipyard for `owner`.
pub fn add_shipyard(snapshot: &mut TurnSnapshot, owner: u32, at: (i32, i32)) {
    snapshot.add_structure(Structure::new(
        PlayerId::new(owner),
        Coord::new(at.0, at.1),
        StructureKind::Shipyard,
    ));
}

/// Plans keyed by ship id, each with only a preference list.
pub fn plans(entries: &[(u32, Vec<Action>)]) -> BTreeMap<ShipId, Plan> {
    entries
        .iter()
        .map(|(id, prefs)| (ShipId::new(*id), Plan::new(prefs.clone())))
        .collect()
}

/// A square match with a seeded random field, one shipyard per player and
/// `ships` ships for player 0 scattered around its yard.
pub fn seeded_match(seed: u64, size: i32, ships: u32) -> TurnSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let torus = Torus::new(size, size).unwrap();
    let amounts = (0..torus.area()).map(|_| rng.gen_range(0..400)).collect();
    let field = ResourceField::from_rows(torus, amounts).unwrap();

    let mut snapshot = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
    let quarter = size / 4;
    add_shipyard(&mut snapshot, 0, (quarter, quarter));
    add_shipyard(&mut snapshot, 1, (size - quarter, size - quarter));

    snapshot.begin_frame(0);
    snapshot.set_budget(PlayerId::new(0), 5000);
    snapshot.set_budget(PlayerId::new(1), 5000);
    let side = size / 2;
    for id in 0..ships {
        #[allow(clippy::cast_possible_wrap)]
        let offset = id as i32;
        add_ship(
            &mut snapshot,
            id,
            0,
            (quarter + 1 + offset % side, quarter + 1 + offset / side),
            0,
        );
    }
    snapshot.finish_frame();
    snapshot
}

// =============================================================================
// Local Engine
// =============================================================================

/// Result of one [`advance`] call.
#[derive(Debug, Default)]
pub struct TurnReport {
    /// Ships destroyed in collisions.
    pub collisions: Vec<ShipId>,
    /// Ship created by a spawn, if any.
    pub spawned: Option<ShipId>,
}

/// Applies every ship's committed command and refreshes `snapshot` as the
/// next frame.
///
/// Ships without a command mine. Ships ending on an own structure unload.
/// Ships sharing a cell after movement are destroyed.
pub fn advance(snapshot: &mut TurnSnapshot, spawn: bool, next_id: &mut u32) -> TurnReport {
    let torus = *snapshot.torus();
    let constants = snapshot.constants().clone();
    let players = snapshot.players();
    let mut budgets: Vec<u32> = (0..players)
        .map(|p| snapshot.budget(PlayerId::new(u32::try_from(p).unwrap())))
        .collect();
    let mut dropoffs: Vec<Structure> = snapshot
        .structures()
        .iter()
        .filter(|s| s.kind == StructureKind::Dropoff)
        .copied()
        .collect();
    let mut field_updates = Vec::new();
    let mut ships = Vec::new();
    let mut report = TurnReport::default();

    for ship in snapshot.ships() {
        let mut ship = ship.clone();
        let cell = snapshot.halite_at(ship.position);
        match ship.command {
            Some(Action::Convert) => {
                let budget = &mut budgets[ship.owner.index()];
                *budget = budget.saturating_sub(constants.dropoff_cost);
                dropoffs.push(Structure::new(ship.owner, ship.position, StructureKind::Dropoff));
                continue;
            }
            Some(action) if action.is_move() => {
                ship.halite -= constants.move_cost(cell).min(ship.halite);
                ship.position = action.destination(&torus, ship.position);
            }
            _ => {
                let room = constants.max_energy - ship.halite;
                let take = cell.div_ceil(constants.extract_ratio).min(room);
                ship.halite += take;
                field_updates.push((ship.position, cell - take));
            }
        }
        ships.push(ship);
    }

    if spawn {
        let me = snapshot.me();
        if let Some(yard) = snapshot.shipyard_of(me) {
            budgets[me.index()] -= constants.new_entity_energy_cost;
            let id = ShipId::new(*next_id);
            *next_id += 1;
            ships.push(Ship::new(id, me, yard.position, 0));
            report.spawned = Some(id);
        }
    }

    let mut per_cell: HashMap<Coord, usize> = HashMap::new();
    for ship in &ships {
        *per_cell.entry(ship.position).or_default() += 1;
    }
    ships.retain(|ship| {
        let alone = per_cell[&ship.position] == 1;
        if !alone {
            report.collisions.push(ship.id);
        }
        alone
    });

    for ship in &mut ships {
        let home = snapshot.is_structure_of(ship.owner, ship.position)
            || dropoffs
                .iter()
                .any(|d| d.owner == ship.owner && d.position == ship.position);
        if home {
            budgets[ship.owner.index()] += ship.halite;
            ship.halite = 0;
        }
    }

    snapshot.begin_frame(snapshot.turn() + 1);
    for (p, budget) in budgets.into_iter().enumerate() {
        snapshot.set_budget(PlayerId::new(u32::try_from(p).unwrap()), budget);
    }
    for dropoff in dropoffs {
        snapshot.add_structure(dropoff);
    }
    for ship in ships {
        snapshot.insert_ship(ship);
    }
    for (coord, amount) in field_updates {
        snapshot.set_halite(coord, amount);
    }
    snapshot.finish_frame();
    report
}
