//! Routing of pushed server events onto the local session.
//!
//! Dispatch is synchronous and side-effect free apart from the session it is
//! given: sounds, delayed reversals and the not-ready retry are returned as
//! [`Effect`]s for the caller to carry out.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use crate::board::{CellMark, Emphasis, Impact};
use crate::common::ImpactOutcome;
use crate::config::EffectTimings;
use crate::coord::Coordinate;
use crate::session::Session;
use crate::snapshot::{self, ServerPhase, Snapshot};

/// Event pushed over the control channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Result of an attack on one of our cells. The coordinate is kept as
    /// sent; it may not name a cell of the board.
    Impact {
        coordinate: String,
        outcome: ImpactOutcome,
    },
    /// Full state resynchronisation.
    Snapshot(Snapshot),
    /// The server cannot serve the channel yet.
    Error(String),
}

/// Sound to play for an attack outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Hit,
    Sunk,
    Splash,
}

/// Work to run once a timer expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    /// Drop the transient animation on these cells.
    ClearEmphasis(Vec<Coordinate>),
    /// Remove the water marker left by a miss.
    RevertWater(Coordinate),
    /// Try the control channel again.
    Reconnect,
    /// Fetch the server state again.
    ReloadState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Sound(SoundCue),
    Schedule { after: Duration, action: TimerAction },
    /// The server reported it is not ready; the channel manager decides what
    /// to do with it.
    NotReady(String),
}

/// Apply `event` to `session` and return what the caller still has to do.
pub fn dispatch(session: &mut Session, event: ServerEvent, timings: &EffectTimings) -> Vec<Effect> {
    match event {
        ServerEvent::Impact {
            coordinate,
            outcome,
        } => {
            let effects = match coordinate.parse::<Coordinate>() {
                Ok(coord) => apply_impact(session, coord, &outcome, timings),
                Err(_) => Vec::new(),
            };
            session.report(format!("Attack received at {}: {}", coordinate, outcome));
            effects
        }
        ServerEvent::Snapshot(state) => {
            snapshot::apply(session, &state);
            if state.phase == ServerPhase::FleetSunk {
                session.report("The whole fleet has been sunk");
            }
            Vec::new()
        }
        ServerEvent::Error(message) => {
            session.report_error(message.clone());
            vec![Effect::NotReady(message)]
        }
    }
}

fn apply_impact(
    session: &mut Session,
    coord: Coordinate,
    outcome: &ImpactOutcome,
    timings: &EffectTimings,
) -> Vec<Effect> {
    let board = &mut session.board;
    {
        let cell = board.cell_mut(coord);
        cell.water = false;
        cell.emphasis = Emphasis::None;
    }

    match outcome {
        ImpactOutcome::Hit => {
            let cell = board.cell_mut(coord);
            cell.impact = Impact::Hit;
            cell.mark = CellMark::Hit;
            cell.emphasis = Emphasis::Explosion;
            vec![
                Effect::Sound(SoundCue::Hit),
                Effect::Schedule {
                    after: timings.hit_emphasis,
                    action: TimerAction::ClearEmphasis(vec![coord]),
                },
            ]
        }
        ImpactOutcome::Sunk => {
            // Cells are correlated by their stored ship-type tag.
            let ship_cells = match board.cell(coord).tag {
                Some(ship) => board.cells_tagged(ship),
                None => Vec::new(),
            };
            for c in &ship_cells {
                let cell = board.cell_mut(*c);
                cell.impact = Impact::Destroyed;
                cell.mark = CellMark::Destroyed;
                cell.emphasis = Emphasis::StrongExplosion;
            }
            let mut effects = vec![Effect::Sound(SoundCue::Sunk)];
            if !ship_cells.is_empty() {
                effects.push(Effect::Schedule {
                    after: timings.sunk_emphasis,
                    action: TimerAction::ClearEmphasis(ship_cells),
                });
            }
            effects
        }
        ImpactOutcome::Miss => {
            let cell = board.cell_mut(coord);
            cell.water = true;
            cell.mark = CellMark::Water;
            cell.emphasis = Emphasis::Splash;
            vec![
                Effect::Sound(SoundCue::Splash),
                Effect::Schedule {
                    after: timings.miss_revert,
                    action: TimerAction::RevertWater(coord),
                },
            ]
        }
        ImpactOutcome::Other(_) => Vec::new(),
    }
}

/// Run the board part of an expired timer. Occupancy and persistent impacts
/// are never touched. `Reconnect` and `ReloadState` have no board part.
pub fn fire(session: &mut Session, action: &TimerAction) {
    match action {
        TimerAction::ClearEmphasis(cells) => {
            for c in cells {
                session.board.cell_mut(*c).emphasis = Emphasis::None;
            }
        }
        TimerAction::RevertWater(coord) => {
            let cell = session.board.cell_mut(*coord);
            // A snapshot may already have replaced the cell.
            if cell.water {
                cell.water = false;
                cell.emphasis = Emphasis::None;
                cell.mark = CellMark::Label;
            }
        }
        TimerAction::Reconnect | TimerAction::ReloadState => {}
    }
}
