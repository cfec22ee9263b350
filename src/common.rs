//! Common types: validation errors and attack outcomes.

use core::fmt;

use alloc::string::String;

/// Errors produced while parsing a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// Nothing to parse.
    Empty,
    /// Row is not a letter `A`..`E`.
    InvalidRow,
    /// Column is not a number `1`..`5`.
    InvalidColumn,
    /// Index is outside the board.
    OutOfBounds,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::Empty => write!(f, "Empty coordinate"),
            CoordinateError::InvalidRow => write!(f, "Row must be a letter A-E"),
            CoordinateError::InvalidColumn => write!(f, "Column must be a number 1-5"),
            CoordinateError::OutOfBounds => write!(f, "Coordinate is outside the board"),
        }
    }
}

/// Why a cell could not be added to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Cell already holds a confirmed ship.
    Occupied,
    /// Selection already has as many cells as the ship needs.
    SelectionFull,
    /// Cell is on neither the row nor the column of the selection.
    NotCollinear,
    /// Cell does not touch any selected cell.
    NotContiguous,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Occupied => write!(f, "That cell is already occupied"),
            RejectReason::SelectionFull => {
                write!(f, "Selection is full, deselect a cell first")
            }
            RejectReason::NotCollinear => write!(f, "Cells must share a row or column"),
            RejectReason::NotContiguous => write!(f, "Cells must be contiguous"),
        }
    }
}

/// Local validation failures. These never reach the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Selection rule violated.
    Rejected(RejectReason),
    /// Ship type has already been confirmed by the server.
    AlreadyPlaced,
    /// Selection size does not match the ship size.
    WrongSelectionSize { expected: usize, actual: usize },
    /// Placement input is disabled (fleet complete).
    PlacementClosed,
    /// A placement request for this ship is still in flight.
    Submitting,
    /// Ship name not recognised.
    UnknownShip,
}

impl From<RejectReason> for PlacementError {
    fn from(reason: RejectReason) -> Self {
        PlacementError::Rejected(reason)
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Rejected(reason) => write!(f, "{}", reason),
            PlacementError::AlreadyPlaced => write!(f, "This ship type has already been placed"),
            PlacementError::WrongSelectionSize { expected, actual } => write!(
                f,
                "Select exactly {} cells for this ship ({} selected)",
                expected, actual
            ),
            PlacementError::PlacementClosed => write!(f, "The fleet is already complete"),
            PlacementError::Submitting => write!(f, "A placement request is already in progress"),
            PlacementError::UnknownShip => write!(f, "Unknown ship type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordinateError {}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

/// Result of an attack pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// `Impactado`: the cell is hit for good.
    Hit,
    /// `Hundido`: the whole ship sharing the cell's tag is destroyed.
    Sunk,
    /// `Fallido`: water, nothing persists.
    Miss,
    /// Anything else the server may send.
    Other(String),
}

impl ImpactOutcome {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Impactado" => ImpactOutcome::Hit,
            "Hundido" => ImpactOutcome::Sunk,
            "Fallido" => ImpactOutcome::Miss,
            other => ImpactOutcome::Other(String::from(other)),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            ImpactOutcome::Hit => "Impactado",
            ImpactOutcome::Sunk => "Hundido",
            ImpactOutcome::Miss => "Fallido",
            ImpactOutcome::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ImpactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
