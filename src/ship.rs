//! Ship types of the fleet and their wire names.

use core::fmt;
use core::str::FromStr;

use crate::common::PlacementError;

/// Type of ship. Each type has a fixed number of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    #[cfg_attr(feature = "std", serde(rename = "submarino"))]
    Submarine,
    #[cfg_attr(feature = "std", serde(rename = "acorazado"))]
    Battleship,
    #[cfg_attr(feature = "std", serde(rename = "destructor"))]
    Destroyer,
}

impl ShipType {
    /// Number of cells this ship occupies.
    pub const fn size(&self) -> usize {
        match self {
            ShipType::Submarine => 2,
            ShipType::Battleship => 3,
            ShipType::Destroyer => 1,
        }
    }

    /// Name used by the server API.
    pub const fn wire_name(&self) -> &'static str {
        match self {
            ShipType::Submarine => "submarino",
            ShipType::Battleship => "acorazado",
            ShipType::Destroyer => "destructor",
        }
    }

    /// Single-letter marker the server stores on the board.
    pub const fn marker(&self) -> char {
        match self {
            ShipType::Submarine => 'S',
            ShipType::Battleship => 'A',
            ShipType::Destroyer => 'D',
        }
    }

    /// Position of the ship in [`crate::config::SHIPS`].
    pub const fn index(&self) -> usize {
        match self {
            ShipType::Submarine => 0,
            ShipType::Battleship => 1,
            ShipType::Destroyer => 2,
        }
    }

    pub fn from_marker(marker: char) -> Option<ShipType> {
        crate::config::SHIPS
            .into_iter()
            .find(|ship| ship.marker() == marker.to_ascii_uppercase())
    }

    pub fn from_wire_name(name: &str) -> Option<ShipType> {
        crate::config::SHIPS
            .into_iter()
            .find(|ship| ship.wire_name() == name)
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShipType::Submarine => "submarine",
            ShipType::Battleship => "battleship",
            ShipType::Destroyer => "destroyer",
        };
        f.write_str(name)
    }
}

/// Accepts the English names, the server's names and the board markers.
impl FromStr for ShipType {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "submarine" | "submarino" | "s" => Ok(ShipType::Submarine),
            "battleship" | "acorazado" | "a" => Ok(ShipType::Battleship),
            "destroyer" | "destructor" | "d" => Ok(ShipType::Destroyer),
            _ => Err(PlacementError::UnknownShip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SHIPS, TOTAL_SHIP_CELLS};

    #[test]
    fn sizes_match_fleet_total() {
        let total: usize = SHIPS.iter().map(|s| s.size()).sum();
        assert_eq!(total, TOTAL_SHIP_CELLS);
    }

    #[test]
    fn markers_and_names_round_back() {
        for (i, ship) in SHIPS.iter().enumerate() {
            assert_eq!(ship.index(), i);
            assert_eq!(ShipType::from_marker(ship.marker()), Some(*ship));
            assert_eq!(ShipType::from_wire_name(ship.wire_name()), Some(*ship));
        }
        assert_eq!(ShipType::from_marker('x'), None);
        assert_eq!("Destructor".parse::<ShipType>(), Ok(ShipType::Destroyer));
        assert_eq!("cruiser".parse::<ShipType>(), Err(PlacementError::UnknownShip));
    }
}
