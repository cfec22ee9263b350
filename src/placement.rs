//! Fleet placement: the in-progress selection and which ships the server has
//! confirmed.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::PlacementError;
use crate::config::{NUM_SHIPS, SHIPS};
use crate::coord::Coordinate;
use crate::ship::ShipType;
use crate::validator::{check_straight_run, validate_addition, Verdict};

/// Where a ship type is in its placement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipPhase {
    NotPlaced,
    Selecting,
    Submitting,
    /// Confirmed by the server. Terminal until a restart or snapshot says otherwise.
    Placed,
}

/// Effect of a successful [`PlacementSession::select_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Body of a placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PlacementRequest {
    #[cfg_attr(feature = "std", serde(rename = "tipo"))]
    pub ship: ShipType,
    #[cfg_attr(feature = "std", serde(rename = "posiciones"))]
    pub positions: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSession {
    ship: ShipType,
    selection: Vec<Coordinate>,
    placed: [bool; NUM_SHIPS],
    submitting: Option<ShipType>,
    enabled: bool,
}

impl PlacementSession {
    pub fn new() -> Self {
        Self {
            ship: SHIPS[0],
            selection: Vec::new(),
            placed: [false; NUM_SHIPS],
            submitting: None,
            enabled: true,
        }
    }

    /// Ship type currently being placed.
    pub fn ship_type(&self) -> ShipType {
        self.ship
    }

    /// Switch the ship being placed. The selection is kept.
    pub fn set_ship_type(&mut self, ship: ShipType) {
        self.ship = ship;
    }

    /// Selected cells in the order they were picked.
    pub fn selection(&self) -> &[Coordinate] {
        &self.selection
    }

    pub fn is_placed(&self, ship: ShipType) -> bool {
        self.placed[ship.index()]
    }

    pub fn all_placed(&self) -> bool {
        self.placed.iter().all(|p| *p)
    }

    /// Snapshot of the per-type placed flags, in fleet order.
    pub fn placed_flags(&self) -> [(ShipType, bool); NUM_SHIPS] {
        core::array::from_fn(|i| (SHIPS[i], self.placed[i]))
    }

    /// Whether placement input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self, ship: ShipType) -> ShipPhase {
        if self.is_placed(ship) {
            ShipPhase::Placed
        } else if self.submitting == Some(ship) {
            ShipPhase::Submitting
        } else if self.ship == ship && !self.selection.is_empty() {
            ShipPhase::Selecting
        } else {
            ShipPhase::NotPlaced
        }
    }

    /// Toggle `coord` in the selection for the current ship type.
    pub fn select_cell(
        &mut self,
        board: &mut Board,
        coord: Coordinate,
    ) -> Result<Toggle, PlacementError> {
        if !self.enabled {
            return Err(PlacementError::PlacementClosed);
        }
        if self.submitting.is_some() {
            return Err(PlacementError::Submitting);
        }
        if let Some(pos) = self.selection.iter().position(|c| *c == coord) {
            self.selection.remove(pos);
            board.cell_mut(coord).selected = false;
            return Ok(Toggle::Removed);
        }
        match validate_addition(board, &self.selection, coord, self.ship) {
            Verdict::Accept => {
                self.selection.push(coord);
                board.cell_mut(coord).selected = true;
                Ok(Toggle::Added)
            }
            Verdict::Reject(reason) => Err(reason.into()),
        }
    }

    /// Check the preconditions for placing `ship` and build the request.
    ///
    /// On success the ship is `Submitting` until [`confirm`](Self::confirm) or
    /// [`reject`](Self::reject) is called.
    pub fn begin_submit(&mut self, ship: ShipType) -> Result<PlacementRequest, PlacementError> {
        if !self.enabled {
            return Err(PlacementError::PlacementClosed);
        }
        if self.is_placed(ship) {
            return Err(PlacementError::AlreadyPlaced);
        }
        if self.submitting.is_some() {
            return Err(PlacementError::Submitting);
        }
        if self.selection.len() != ship.size() {
            return Err(PlacementError::WrongSelectionSize {
                expected: ship.size(),
                actual: self.selection.len(),
            });
        }
        check_straight_run(&self.selection)?;
        self.ship = ship;
        self.submitting = Some(ship);
        Ok(PlacementRequest {
            ship,
            positions: self.selection.clone(),
        })
    }

    /// The server accepted the placement of `ship`.
    pub fn confirm(&mut self, ship: ShipType, board: &mut Board) {
        self.submitting = None;
        self.placed[ship.index()] = true;
        for coord in self.selection.drain(..) {
            board.cell_mut(coord).occupy(ship);
        }
    }

    /// The server refused the placement; the selection stays for a retry.
    pub fn reject(&mut self, ship: ShipType) {
        if self.submitting == Some(ship) {
            self.submitting = None;
        }
    }

    /// Stop accepting placement input once the fleet is complete.
    pub fn close(&mut self) {
        self.enabled = false;
    }

    /// Replace the placed flags wholesale. Types missing from `flags` become
    /// not placed. Input is disabled exactly when every type is placed.
    pub fn overwrite(&mut self, flags: &[(ShipType, bool)]) {
        self.selection.clear();
        self.submitting = None;
        self.placed = [false; NUM_SHIPS];
        for (ship, placed) in flags {
            self.placed[ship.index()] = *placed;
        }
        self.enabled = !self.all_placed();
    }

    /// Back to the start of a game: nothing placed, nothing selected.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.submitting = None;
        self.placed = [false; NUM_SHIPS];
        self.enabled = true;
    }
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new()
    }
}
