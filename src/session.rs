//! Client-side game state, owned explicitly and passed to every handler.

use alloc::string::{String, ToString};

use crate::board::Board;
use crate::common::PlacementError;
use crate::coord::Coordinate;
use crate::placement::{PlacementSession, Toggle};
use crate::ship::ShipType;

/// Current status line shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub board: Board,
    pub placement: PlacementSession,
    pub status: Status,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>) {
        self.status = Status {
            message: message.into(),
            is_error: false,
        };
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        self.status = Status {
            message: message.into(),
            is_error: true,
        };
    }

    /// Whether the ship picker and place button accept input.
    pub fn controls_enabled(&self) -> bool {
        self.placement.is_enabled()
    }

    pub fn set_ship_type(&mut self, ship: ShipType) {
        self.placement.set_ship_type(ship);
    }

    /// Toggle a cell for the ship being placed. Rejections are reported on the
    /// status line and leave the selection as it was.
    pub fn select_cell(&mut self, coord: Coordinate) -> Result<Toggle, PlacementError> {
        let result = self.placement.select_cell(&mut self.board, coord);
        if let Err(e) = &result {
            self.report_error(e.to_string());
        }
        result
    }

    /// Deselect everything and clear the board: the state right after a
    /// service restart.
    pub fn reset(&mut self) {
        self.placement.reset();
        self.board.clear();
    }
}
