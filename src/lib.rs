#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
mod coord;
pub mod dispatcher;
pub mod placement;
mod session;
mod ship;
pub mod snapshot;
mod validator;

#[cfg(feature = "std")]
pub mod api;
#[cfg(feature = "std")]
pub mod channel;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
mod error;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod timers;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use board::*;
pub use common::*;
pub use config::*;
pub use coord::Coordinate;
pub use dispatcher::{dispatch, Effect, ServerEvent, SoundCue, TimerAction};
pub use placement::{PlacementRequest, PlacementSession, ShipPhase, Toggle};
pub use session::{Session, Status};
pub use ship::ShipType;
pub use snapshot::{ServerPhase, Snapshot};
pub use validator::{check_straight_run, validate_addition, Verdict};

#[cfg(feature = "std")]
pub use api::{GameApi, HttpApi};
#[cfg(feature = "std")]
pub use channel::{ChannelEvent, ChannelManager, ChannelState};
#[cfg(feature = "std")]
pub use client::Client;
#[cfg(feature = "std")]
pub use error::ClientError;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use timers::Timers;
#[cfg(feature = "std")]
pub use transport::{Connector, Transport};
