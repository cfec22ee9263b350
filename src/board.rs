//! Local view of the 5x5 defence board.
//!
//! Each cell keeps what the player sees: the stored ship-type tag, the glyph
//! currently shown, the persistent impact marker and any transient effect.

use alloc::vec::Vec;

use crate::config::BOARD_SIZE;
use crate::coord::Coordinate;
use crate::ship::ShipType;

const CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Glyph displayed in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    /// The plain coordinate label.
    Label,
    /// Occupant marker as stored by the server (`S`, `A`, `D`).
    Occupant(char),
    Hit,
    Destroyed,
    Water,
}

/// Persistent impact state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Impact {
    #[default]
    None,
    Hit,
    Destroyed,
    Miss,
}

/// Short-lived animation shown on top of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    None,
    Explosion,
    /// Longer explosion used when a whole ship goes down.
    StrongExplosion,
    Splash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub tag: Option<ShipType>,
    pub occupied: bool,
    pub selected: bool,
    pub mark: CellMark,
    pub impact: Impact,
    /// Temporary water marker left by a miss.
    pub water: bool,
    pub emphasis: Emphasis,
}

impl Cell {
    const fn empty() -> Self {
        Cell {
            tag: None,
            occupied: false,
            selected: false,
            mark: CellMark::Label,
            impact: Impact::None,
            water: false,
            emphasis: Emphasis::None,
        }
    }

    /// Back to the plain labelled cell.
    pub fn reset(&mut self) {
        *self = Cell::empty();
    }

    /// Mark the cell as holding part of a confirmed ship.
    pub fn occupy(&mut self, ship: ShipType) {
        self.selected = false;
        self.occupied = true;
        self.tag = Some(ship);
        self.mark = CellMark::Occupant(ship.marker());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Board with every cell showing its label.
    pub fn new() -> Self {
        Self {
            cells: [Cell::empty(); CELLS],
        }
    }

    pub fn cell(&self, coord: Coordinate) -> &Cell {
        &self.cells[coord.index()]
    }

    pub fn cell_mut(&mut self, coord: Coordinate) -> &mut Cell {
        &mut self.cells[coord.index()]
    }

    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.cell(coord).occupied
    }

    /// Reset every cell to its label.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Coordinates whose stored tag equals `ship`.
    pub fn cells_tagged(&self, ship: ShipType) -> Vec<Coordinate> {
        Coordinate::all()
            .filter(|c| self.cell(*c).tag == Some(ship))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }

    /// Iterate cells in board order together with their coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Cell)> {
        Coordinate::all().map(move |c| (c, self.cell(c)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
