use std::fmt::Write as _;

use crate::board::{Cell, CellMark};
use crate::config::{BOARD_SIZE, SHIPS};
use crate::coord::Coordinate;
use crate::dispatcher::SoundCue;
use crate::session::{Session, Status};
use crate::ship::ShipType;

/// Presentation hooks. Every method defaults to doing nothing.
pub trait Presenter {
    /// The session changed; redraw.
    fn render(&mut self, _session: &Session) {}
    /// An attack outcome wants a sound.
    fn play(&mut self, _cue: SoundCue) {}
}

/// Presenter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Prints the board and status line to stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    last_status: Option<Status>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, session: &Session) {
        println!("{}", render_board(session));
        if self.last_status.as_ref() != Some(&session.status) {
            println!("{}", render_status(&session.status));
            self.last_status = Some(session.status.clone());
        }
    }

    fn play(&mut self, cue: SoundCue) {
        tracing::debug!(?cue, "sound cue");
        print!("\x07");
    }
}

fn glyph(cell: &Cell) -> char {
    if cell.selected {
        return '*';
    }
    match cell.mark {
        CellMark::Label => '~',
        CellMark::Occupant(marker) => marker,
        CellMark::Hit => 'X',
        CellMark::Destroyed => '#',
        CellMark::Water => 'O',
    }
}

/// Text grid of the defence board with a legend and placement progress.
pub fn render_board(session: &Session) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for col in 1..=BOARD_SIZE {
        let _ = write!(out, " {}", col);
    }
    out.push('\n');
    out.push_str("  ┌───────────┐\n");
    for row in 0..BOARD_SIZE {
        let _ = write!(out, "{} │", (b'A' + row) as char);
        for col in 0..BOARD_SIZE {
            if let Ok(coord) = Coordinate::new(row, col) {
                let _ = write!(out, " {}", glyph(session.board.cell(coord)));
            }
        }
        out.push_str(" │\n");
    }
    out.push_str("  └───────────┘\n");
    out.push_str("  S: Submarine, A: Battleship, D: Destroyer\n");
    out.push_str("  ~: water, O: miss, X: hit, #: sunk, *: selected\n");

    let placement = &session.placement;
    let fleet: Vec<String> = SHIPS
        .iter()
        .map(|s| {
            let mark = if placement.is_placed(*s) { "placed" } else { "pending" };
            format!("{} ({}) {}", s, s.size(), mark)
        })
        .collect();
    let _ = write!(out, "  Fleet: {}", fleet.join(", "));
    if placement.is_enabled() {
        let _ = write!(out, "\n  Placing: {}", placement.ship_type());
    }
    out
}

pub fn render_status(status: &Status) -> String {
    if status.is_error {
        format!("[error] {}", status.message)
    } else {
        format!("[status] {}", status.message)
    }
}

/// Input understood by the interactive client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ship(ShipType),
    Select(Coordinate),
    Place,
    Restart,
    Refresh,
    Connect,
    Board,
    Quit,
}

pub const HELP: &str = "\
Commands:
  ship <submarine|battleship|destroyer>  choose the ship to place
  select <A1..E5> (or just A1)           toggle a cell
  place                                  send the current selection
  restart                                restart the server game
  refresh                                reload the server state
  connect                                (re)open the control channel
  board                                  redraw the board
  help                                   show this text
  quit                                   leave";

/// Parse one input line. `Ok(None)` for blank lines and `help`, which the
/// caller handles locally.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    let cmd = match head.to_ascii_lowercase().as_str() {
        "ship" | "tipo" => {
            let name = arg.ok_or("Usage: ship <submarine|battleship|destroyer>")?;
            Command::Ship(name.parse().map_err(|e| format!("{}: {}", e, name))?)
        }
        "select" | "sel" => {
            let coord = arg.ok_or("Usage: select <A1..E5>")?;
            Command::Select(coord.parse().map_err(|e| format!("{}: {}", e, coord))?)
        }
        "place" | "colocar" => Command::Place,
        "restart" | "reiniciar" => Command::Restart,
        "refresh" => Command::Refresh,
        "connect" => Command::Connect,
        "board" => Command::Board,
        "quit" | "exit" => Command::Quit,
        "help" | "?" => return Ok(None),
        other => match other.parse::<Coordinate>() {
            Ok(coord) => Command::Select(coord),
            Err(_) => return Err(format!("Unknown command '{}', try 'help'", head)),
        },
    };
    Ok(Some(cmd))
}
