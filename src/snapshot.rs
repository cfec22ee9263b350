//! Full server state and how it replaces the local view.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::board::{CellMark, Impact};
use crate::coord::Coordinate;
use crate::session::Session;
use crate::ship::ShipType;

/// Impact code for a cell that has not been attacked.
pub const IMPACT_NONE: &str = "~";
/// Impact code for a hit.
pub const IMPACT_HIT: &str = "X";
/// Impact code for a miss.
pub const IMPACT_MISS: &str = "O";

/// Server automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ServerPhase {
    /// `q0`: waiting for the fleet.
    #[default]
    #[cfg_attr(feature = "std", serde(rename = "q0"))]
    AwaitingFleet,
    /// `q1`: fleet placed and intact.
    #[cfg_attr(feature = "std", serde(rename = "q1"))]
    FleetIntact,
    /// `q2`: every ship has been sunk.
    #[cfg_attr(feature = "std", serde(rename = "q2"))]
    FleetSunk,
    #[cfg_attr(feature = "std", serde(other))]
    Unknown,
}

/// Complete, authoritative description of the board reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    #[cfg_attr(feature = "std", serde(rename = "estado_actual", default))]
    pub phase: ServerPhase,
    /// Occupant marker per cell, `None` for open water.
    #[cfg_attr(feature = "std", serde(rename = "tablero", default))]
    pub board: BTreeMap<Coordinate, Option<String>>,
    /// Impact code per cell: `~`, `X` or `O`.
    #[cfg_attr(feature = "std", serde(rename = "impactos", default))]
    pub impacts: BTreeMap<Coordinate, String>,
    #[cfg_attr(feature = "std", serde(rename = "barcos_colocados", default))]
    pub placed: BTreeMap<ShipType, bool>,
}

impl Snapshot {
    /// Whether the server reports every ship type as placed.
    pub fn fleet_complete(&self) -> bool {
        crate::config::SHIPS
            .iter()
            .all(|s| self.placed.get(s).copied().unwrap_or(false))
    }
}

/// Resolve a board marker to the ship it stands for. Accepts the single
/// letter markers as well as full ship names.
fn ship_for_marker(content: &str) -> Option<ShipType> {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), None) => ShipType::from_marker(marker),
        _ => ShipType::from_wire_name(content),
    }
}

/// Replace the local view with `snapshot`. Nothing of the previous local
/// state survives, so applying the same snapshot twice is a no-op the second
/// time.
pub fn apply(session: &mut Session, snapshot: &Snapshot) {
    session.board.clear();

    let flags: Vec<(ShipType, bool)> = snapshot.placed.iter().map(|(s, p)| (*s, *p)).collect();
    session.placement.overwrite(&flags);

    for (coord, content) in &snapshot.board {
        let Some(content) = content.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let cell = session.board.cell_mut(*coord);
        match ship_for_marker(content) {
            Some(ship) => cell.occupy(ship),
            None => {
                cell.occupied = true;
                if let Some(ch) = content.chars().next() {
                    cell.mark = CellMark::Occupant(ch.to_ascii_uppercase());
                }
            }
        }
    }

    for (coord, code) in &snapshot.impacts {
        let cell = session.board.cell_mut(*coord);
        match code.as_str() {
            IMPACT_HIT => {
                cell.impact = Impact::Hit;
                cell.mark = CellMark::Hit;
            }
            IMPACT_MISS => {
                cell.impact = Impact::Miss;
                cell.mark = CellMark::Water;
            }
            _ => {}
        }
    }
}
