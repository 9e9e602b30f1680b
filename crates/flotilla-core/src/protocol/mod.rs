//! Engine text protocol.
//!
//! The engine talks over stdin/stdout in whitespace-separated integers:
//!
//! ```text
//! {"MAX_TURNS": 400, ...}      constants, one JSON line
//! 2 0                          players, my pid
//! 0 8 16                       per player: pid, shipyard x y
//! 1 24 16
//! 32 32                        width height
//! 0 12 85 ...                  height rows of width halite values
//! ```
//!
//! Each frame then carries:
//!
//! ```text
//! 4                            turn (1-based)
//! 0 2 1 3000                   per player: pid, ships, dropoffs, budget
//! 1 28 28 0                    ships: sid x y halite
//! 0 27 28 22
//! 2 10 10                      dropoffs: id x y
//! 1 1 0 3000
//! 3 15 17 0
//! 2                            cell updates
//! 27 28 63                     x y halite
//! 28 28 0
//! ```
//!
//! Turn numbers are stored zero-based. Coordinates are wrapped onto the grid.

mod constants;
mod reader;

pub use constants::GameConstants;
pub use reader::TokenReader;

use std::io::{BufRead, Write};

use shoal::{Coord, ResourceField, Torus};

use crate::entity::{PlayerId, Ship, ShipId, Structure, StructureKind};
use crate::error::ProtocolError;
use crate::overmind::TurnOrders;
use crate::snapshot::TurnSnapshot;

/// Reads the match header and builds the turn-0 snapshot.
///
/// # Errors
///
/// Any [`ProtocolError`]: truncated input, bad integers, bad constants JSON,
/// zero grid dimensions, or player ids out of range.
pub fn read_init<R: BufRead>(reader: &mut TokenReader<R>) -> Result<TurnSnapshot, ProtocolError> {
    let constants = GameConstants::from_json_str(&reader.line("game constants")?)?;

    let players: u32 = reader.int("player count")?;
    let me = player(reader.int("own player id")?, players)?;

    let mut yards = Vec::with_capacity(players as usize);
    for _ in 0..players {
        let owner = player(reader.int("shipyard owner")?, players)?;
        let x = reader.int("shipyard x")?;
        let y = reader.int("shipyard y")?;
        yards.push(Structure::new(owner, Coord::new(x, y), StructureKind::Shipyard));
    }

    let torus = Torus::new(reader.int("map width")?, reader.int("map height")?)?;
    let mut amounts = Vec::with_capacity(torus.area());
    for _ in 0..torus.area() {
        amounts.push(reader.int("cell halite")?);
    }
    let field = ResourceField::from_rows(torus, amounts)?;

    let mut snapshot = TurnSnapshot::new(constants, players as usize, me, field);
    for yard in yards {
        snapshot.add_structure(yard);
    }

    tracing::info!(
        players,
        me = %me,
        width = torus.width(),
        height = torus.height(),
        "match initialised"
    );
    Ok(snapshot)
}

/// Reads one frame into `snapshot`.
///
/// # Errors
///
/// Any [`ProtocolError`]. On error the snapshot is left mid-refresh and
/// should not be used for planning.
pub fn read_frame<R: BufRead>(
    reader: &mut TokenReader<R>,
    snapshot: &mut TurnSnapshot,
) -> Result<(), ProtocolError> {
    let turn: u32 = reader.int("turn")?;
    snapshot.begin_frame(turn.saturating_sub(1));

    #[allow(clippy::cast_possible_truncation)]
    let players = snapshot.players() as u32;
    for _ in 0..players {
        let owner = player(reader.int("player id")?, players)?;
        let ships: usize = reader.int("ship count")?;
        let dropoffs: usize = reader.int("dropoff count")?;
        snapshot.set_budget(owner, reader.int("budget")?);

        for _ in 0..ships {
            let id = ShipId::new(reader.int("ship id")?);
            let x = reader.int("ship x")?;
            let y = reader.int("ship y")?;
            let halite = reader.int("ship halite")?;
            snapshot.insert_ship(Ship::new(id, owner, Coord::new(x, y), halite));
        }

        for _ in 0..dropoffs {
            let _id: u32 = reader.int("dropoff id")?;
            let x = reader.int("dropoff x")?;
            let y = reader.int("dropoff y")?;
            snapshot.add_structure(Structure::new(owner, Coord::new(x, y), StructureKind::Dropoff));
        }
    }

    let updates: usize = reader.int("cell update count")?;
    for _ in 0..updates {
        let x = reader.int("cell x")?;
        let y = reader.int("cell y")?;
        let halite = reader.int("cell halite")?;
        snapshot.set_halite(Coord::new(x, y), halite);
    }

    snapshot.finish_frame();
    Ok(())
}

/// Sends the bot name, ending the init handshake.
///
/// # Errors
///
/// [`ProtocolError::Io`] if the write fails.
pub fn send_name<W: Write>(out: &mut W, name: &str) -> Result<(), ProtocolError> {
    writeln!(out, "{name}")?;
    out.flush()?;
    Ok(())
}

/// Writes one turn's orders as a single line and flushes.
///
/// # Errors
///
/// [`ProtocolError::Io`] if the write fails.
pub fn write_orders<W: Write>(out: &mut W, orders: &TurnOrders) -> Result<(), ProtocolError> {
    writeln!(out, "{}", orders.to_wire())?;
    out.flush()?;
    Ok(())
}

fn player(raw: u32, players: u32) -> Result<PlayerId, ProtocolError> {
    if raw < players {
        Ok(PlayerId::new(raw))
    } else {
        Err(ProtocolError::UnknownPlayer(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const INIT: &str = "{\"MAX_TURNS\": 300, \"game_seed\": 42}\n\
        2 1\n\
        0 0 0\n\
        1 2 2\n\
        4 3\n\
        1 2 3 4\n\
        5 6 7 8\n\
        9 10 11 12\n";

    const FRAME: &str = "5\n\
        0 1 0 1200\n\
        7 3 0 50\n\
        1 1 1 900\n\
        9 -1 2 10\n\
        4 1 1\n\
        1\n\
        3 2 0\n";

    fn reader(text: &str) -> TokenReader<Cursor<Vec<u8>>> {
        TokenReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    mod init_tests {
        use super::*;

        #[test]
        fn header_builds_snapshot() {
            let snap = read_init(&mut reader(INIT)).unwrap();
            assert_eq!(snap.constants().max_turns, 300);
            assert_eq!(snap.constants().game_seed, 42);
            assert_eq!(snap.players(), 2);
            assert_eq!(snap.me(), PlayerId::new(1));
            assert_eq!(snap.torus().width(), 4);
            assert_eq!(snap.torus().height(), 3);
            assert_eq!(snap.halite_at(Coord::new(3, 0)), 4);
            assert_eq!(snap.halite_at(Coord::new(0, 2)), 9);
            assert_eq!(
                snap.shipyard_of(PlayerId::new(1)).map(|s| s.position),
                Some(Coord::new(2, 2))
            );
        }

        #[test]
        fn own_id_out_of_range() {
            let text = INIT.replacen("2 1", "2 5", 1);
            let err = read_init(&mut reader(&text)).unwrap_err();
            assert!(matches!(err, ProtocolError::UnknownPlayer(5)));
        }

        #[test]
        fn zero_width_map() {
            let text = INIT.replacen("4 3", "0 3", 1);
            let err = read_init(&mut reader(&text)).unwrap_err();
            assert!(matches!(err, ProtocolError::Grid(_)));
        }

        #[test]
        fn truncated_map() {
            let text = &INIT[..INIT.len() - 4];
            let err = read_init(&mut reader(text)).unwrap_err();
            assert!(matches!(err, ProtocolError::UnexpectedEof { .. }));
        }
    }

    mod frame_tests {
        use super::*;

        #[test]
        fn frame_refreshes_snapshot() {
            let text = format!("{INIT}{FRAME}");
            let mut r = reader(&text);
            let mut snap = read_init(&mut r).unwrap();
            read_frame(&mut r, &mut snap).unwrap();

            assert_eq!(snap.turn(), 4);
            assert_eq!(snap.budget(PlayerId::new(0)), 1200);
            assert_eq!(snap.budget(PlayerId::new(1)), 900);
            assert_eq!(snap.ship(ShipId::new(7)).unwrap().halite, 50);
            assert_eq!(
                snap.ship(ShipId::new(9)).unwrap().position,
                Coord::new(3, 2)
            );
            assert!(snap.is_structure_of(PlayerId::new(1), Coord::new(1, 1)));
            assert_eq!(snap.halite_at(Coord::new(3, 2)), 0);
            assert!(r.at_eof().unwrap());
        }

        #[test]
        fn destroyed_ships_go_stale() {
            let second = "6\n0 0 0 1200\n1 0 0 900\n0\n";
            let text = format!("{INIT}{FRAME}{second}");
            let mut r = reader(&text);
            let mut snap = read_init(&mut r).unwrap();
            read_frame(&mut r, &mut snap).unwrap();
            read_frame(&mut r, &mut snap).unwrap();
            assert_eq!(snap.ship_count(), 0);
            assert!(snap.live_ship(ShipId::new(7)).is_err());
            assert!(!snap.is_structure_of(PlayerId::new(1), Coord::new(1, 1)));
        }

        #[test]
        fn unknown_player_in_frame() {
            let text = format!("{INIT}5\n3 0 0 0\n");
            let mut r = reader(&text);
            let mut snap = read_init(&mut r).unwrap();
            let err = read_frame(&mut r, &mut snap).unwrap_err();
            assert!(matches!(err, ProtocolError::UnknownPlayer(3)));
        }
    }

    #[test]
    fn name_is_a_single_line() {
        let mut out = Vec::new();
        send_name(&mut out, "flotilla").unwrap();
        assert_eq!(out, b"flotilla\n");
    }
}
