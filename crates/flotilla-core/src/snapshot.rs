//! Turn snapshot: everything known about the match at the start of a turn.
//!
//! The snapshot is the container the rest of the crate reads from. It provides:
//! - Ship storage with deterministic iteration order (`BTreeMap` by id)
//! - A position index for "which ship is on this cell" lookups
//! - Fixed structures per owner and the resource field
//! - Stale-reference detection for ships destroyed since the last frame
//!
//! # Frame Refresh
//!
//! Each turn the protocol layer calls [`TurnSnapshot::begin_frame`], inserts
//! every ship and dropoff from the new frame, then calls
//! [`TurnSnapshot::finish_frame`]. Ships that were not re-inserted are kept in
//! a departed set with `ALIVE` cleared until the next refresh, so an id held
//! over from the previous turn resolves to [`ArbitrationError::StaleShip`]
//! instead of silently reading old data.
//!
//! # Example
//!
//! ```
//! use flotilla_core::entity::{PlayerId, Ship, ShipId};
//! use flotilla_core::protocol::GameConstants;
//! use flotilla_core::snapshot::TurnSnapshot;
//! use shoal::{Coord, ResourceField, Torus};
//!
//! let field = ResourceField::new(Torus::new(16, 16).unwrap());
//! let mut snapshot = TurnSnapshot::new(GameConstants::default(), 2, PlayerId::new(0), field);
//!
//! snapshot.begin_frame(1);
//! snapshot.insert_ship(Ship::new(ShipId::new(3), PlayerId::new(0), Coord::new(4, 4), 0));
//! snapshot.finish_frame();
//!
//! assert_eq!(snapshot.ship_at(Coord::new(4, 4)).map(|s| s.id), Some(ShipId::new(3)));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use shoal::{Coord, Positioned, ResourceField, Torus};

use crate::entity::{PlayerId, Ship, ShipFlags, ShipId, Structure, StructureKind};
use crate::error::ArbitrationError;
use crate::protocol::GameConstants;

/// The state of the match at the start of one turn.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    /// Grid geometry, fixed for the match.
    torus: Torus,
    /// Engine constants, fixed for the match.
    constants: GameConstants,
    /// Number of players.
    players: usize,
    /// The player this process controls.
    me: PlayerId,
    /// Zero-based turn number.
    turn: u32,
    /// Banked halite per player.
    budgets: Vec<u32>,
    /// Live ships, iterated in id order.
    ships: BTreeMap<ShipId, Ship>,
    /// Ships present last frame but not this one.
    departed: BTreeMap<ShipId, Ship>,
    /// Shipyards and dropoffs.
    structures: Vec<Structure>,
    /// Halite per cell.
    field: ResourceField,
    /// Live ship on each occupied cell.
    occupancy: HashMap<Coord, ShipId>,
}

impl TurnSnapshot {
    /// Creates a snapshot with no ships or structures.
    ///
    /// The grid geometry is taken from `field`.
    #[must_use]
    pub fn new(
        constants: GameConstants,
        players: usize,
        me: PlayerId,
        field: ResourceField,
    ) -> Self {
        Self {
            torus: *field.torus(),
            constants,
            players,
            me,
            turn: 0,
            budgets: vec![0; players],
            ships: BTreeMap::new(),
            departed: BTreeMap::new(),
            structures: Vec::new(),
            field,
            occupancy: HashMap::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Frame refresh
    // -------------------------------------------------------------------------

    /// Starts a new frame.
    ///
    /// Every current ship is marked dead and parked in the departed set with
    /// its command and inspiration cleared. Dropoffs are forgotten (the engine
    /// re-sends them each frame); shipyards persist.
    pub fn begin_frame(&mut self, turn: u32) {
        self.turn = turn;
        self.budgets = vec![0; self.players];
        self.occupancy.clear();
        self.structures.retain(|s| s.kind == StructureKind::Shipyard);

        self.departed = std::mem::take(&mut self.ships);
        for ship in self.departed.values_mut() {
            ship.flags = ShipFlags::empty();
            ship.command = None;
        }
    }

    /// Adds (or revives) a ship for the current frame.
    ///
    /// The position is wrapped onto the grid. The ship is marked alive with no
    /// command and no inspiration.
    pub fn insert_ship(&mut self, mut ship: Ship) {
        self.departed.remove(&ship.id);
        ship.position = self.torus.wrap(ship.position);
        ship.flags = ShipFlags::ALIVE;
        ship.command = None;
        self.occupancy.insert(ship.position, ship.id);
        self.ships.insert(ship.id, ship);
    }

    /// Adds a structure for the current frame.
    pub fn add_structure(&mut self, mut structure: Structure) {
        structure.position = self.torus.wrap(structure.position);
        self.structures.push(structure);
    }

    /// Records a player's banked halite. Ignored for unknown players.
    pub fn set_budget(&mut self, player: PlayerId, amount: u32) {
        if let Some(slot) = self.budgets.get_mut(player.index()) {
            *slot = amount;
        }
    }

    /// Overwrites the halite in one cell.
    pub fn set_halite(&mut self, coord: Coord, amount: u32) {
        self.field.set(coord, amount);
    }

    /// Ends the frame and returns how many ships were destroyed since the
    /// previous one.
    pub fn finish_frame(&mut self) -> usize {
        tracing::debug!(
            turn = self.turn,
            ships = self.ships.len(),
            destroyed = self.departed.len(),
            "frame refreshed"
        );
        self.departed.len()
    }

    // -------------------------------------------------------------------------
    // Match-level accessors
    // -------------------------------------------------------------------------

    /// Grid geometry.
    #[must_use]
    pub const fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Engine constants.
    #[must_use]
    pub const fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Number of players.
    #[must_use]
    pub const fn players(&self) -> usize {
        self.players
    }

    /// The player this process controls.
    #[must_use]
    pub const fn me(&self) -> PlayerId {
        self.me
    }

    /// Zero-based turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Turns left after this one.
    #[must_use]
    pub fn turns_remaining(&self) -> u32 {
        self.constants.max_turns.saturating_sub(self.turn + 1)
    }

    /// Banked halite for a player (zero for unknown players).
    #[must_use]
    pub fn budget(&self, player: PlayerId) -> u32 {
        self.budgets.get(player.index()).copied().unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Ships
    // -------------------------------------------------------------------------

    /// A live ship by id.
    #[must_use]
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    /// A live ship by id, mutably.
    #[must_use]
    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(&id)
    }

    /// A live ship by id, distinguishing stale ids from unknown ones.
    ///
    /// # Errors
    ///
    /// - [`ArbitrationError::StaleShip`] if the ship was destroyed since the
    ///   last frame
    /// - [`ArbitrationError::UnknownShip`] otherwise
    pub fn live_ship(&self, id: ShipId) -> Result<&Ship, ArbitrationError> {
        if let Some(ship) = self.ships.get(&id) {
            return Ok(ship);
        }
        if self.departed.contains_key(&id) {
            Err(ArbitrationError::StaleShip(id))
        } else {
            Err(ArbitrationError::UnknownShip(id))
        }
    }

    /// Ships destroyed since the previous frame.
    pub fn departed(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.departed.values()
    }

    /// All live ships in id order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.values()
    }

    /// All live ships in id order, mutably.
    pub fn ships_mut(&mut self) -> impl Iterator<Item = &mut Ship> + '_ {
        self.ships.values_mut()
    }

    /// Live ships of one player in id order.
    pub fn ships_of(&self, owner: PlayerId) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.values().filter(move |s| s.owner == owner)
    }

    /// Live ships of the controlling player in id order.
    pub fn my_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships_of(self.me)
    }

    /// Number of live ships.
    #[must_use]
    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// The live ship on a (wrapped) cell, if any.
    #[must_use]
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        let id = self.occupancy.get(&self.torus.wrap(coord))?;
        self.ships.get(id)
    }

    // -------------------------------------------------------------------------
    // Structures and field
    // -------------------------------------------------------------------------

    /// All structures.
    #[must_use]
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Structures of one player.
    pub fn structures_of(&self, owner: PlayerId) -> impl Iterator<Item = &Structure> + '_ {
        self.structures.iter().filter(move |s| s.owner == owner)
    }

    /// The player's shipyard, if announced.
    #[must_use]
    pub fn shipyard_of(&self, owner: PlayerId) -> Option<&Structure> {
        self.structures_of(owner)
            .find(|s| s.kind == StructureKind::Shipyard)
    }

    /// True if `owner` has a structure on the (wrapped) cell.
    #[must_use]
    pub fn is_structure_of(&self, owner: PlayerId, coord: Coord) -> bool {
        let coord = self.torus.wrap(coord);
        self.structures_of(owner).any(|s| s.position == coord)
    }

    /// The player's structure closest to `from` (first in list order on ties).
    #[must_use]
    pub fn nearest_structure<P: Positioned + ?Sized>(
        &self,
        owner: PlayerId,
        from: &P,
    ) -> Option<&Structure> {
        self.structures_of(owner)
            .min_by_key(|s| self.torus.distance(from, s))
    }

    /// The resource field.
    #[must_use]
    pub const fn field(&self) -> &ResourceField {
        &self.field
    }

    /// Halite on a (wrapped) cell.
    #[must_use]
    pub fn halite_at(&self, coord: Coord) -> u32 {
        self.field.get(coord)
    }

    /// Deterministic fingerprint of the whole snapshot.
    ///
    /// Covers turn, budgets, ships, structures and field. Used to compare
    /// replays turn by turn.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.turn.hash(&mut hasher);
        self.budgets.hash(&mut hasher);
        for ship in self.ships.values() {
            ship.id.hash(&mut hasher);
            ship.owner.hash(&mut hasher);
            ship.position.hash(&mut hasher);
            ship.halite.hash(&mut hasher);
        }
        for structure in &self.structures {
            structure.owner.hash(&mut hasher);
            structure.position.hash(&mut hasher);
            structure.kind.hash(&mut hasher);
        }
        shoal::hash::hash_field_into(&self.field, &mut hasher);
        hasher.finish()
    }
}
