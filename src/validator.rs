//! Legality checks for adding a cell to the ship being placed.

use crate::board::Board;
use crate::common::RejectReason;
use crate::coord::Coordinate;
use crate::ship::ShipType;

/// Outcome of [`validate_addition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Decide whether `candidate` may join `selection` for a ship of type `ship`.
///
/// `selection` is in insertion order; its first element is the anchor.
/// Removal of an already selected cell is not validated here.
pub fn validate_addition(
    board: &Board,
    selection: &[Coordinate],
    candidate: Coordinate,
    ship: ShipType,
) -> Verdict {
    if board.is_occupied(candidate) {
        return Verdict::Reject(RejectReason::Occupied);
    }
    if selection.len() >= ship.size() {
        return Verdict::Reject(RejectReason::SelectionFull);
    }
    let Some(anchor) = selection.first() else {
        return Verdict::Accept;
    };
    if !candidate.same_row(anchor) && !candidate.same_col(anchor) {
        return Verdict::Reject(RejectReason::NotCollinear);
    }
    // With two or more cells the line is fixed; stay on it.
    if let Some(second) = selection.get(1) {
        let on_line = if anchor.same_row(second) {
            candidate.same_row(anchor)
        } else {
            candidate.same_col(anchor)
        };
        if !on_line {
            return Verdict::Reject(RejectReason::NotCollinear);
        }
    }
    if selection.iter().any(|c| c.is_adjacent(&candidate)) {
        Verdict::Accept
    } else {
        Verdict::Reject(RejectReason::NotContiguous)
    }
}

/// Whether `cells` form one unbroken straight line. Removing a middle cell
/// can leave the selection split, so this is checked again before a
/// placement is sent. Cells are assumed distinct.
pub fn check_straight_run(cells: &[Coordinate]) -> Result<(), RejectReason> {
    let Some(first) = cells.first() else {
        return Ok(());
    };
    let along: fn(&Coordinate) -> u8 = if cells.iter().all(|c| c.same_row(first)) {
        Coordinate::col
    } else if cells.iter().all(|c| c.same_col(first)) {
        Coordinate::row
    } else {
        return Err(RejectReason::NotCollinear);
    };
    let (min, max) = cells
        .iter()
        .map(along)
        .fold((u8::MAX, 0), |(lo, hi), i| (lo.min(i), hi.max(i)));
    if usize::from(max - min) + 1 == cells.len() {
        Ok(())
    } else {
        Err(RejectReason::NotContiguous)
    }
}
