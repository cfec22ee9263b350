use core::time::Duration;

use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 5;
pub const NUM_SHIPS: usize = 3;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::Submarine,
    ShipType::Battleship,
    ShipType::Destroyer,
];

/// Total number of cells occupied by a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 2 + 3 + 1;

/// Delay before retrying the control channel after a "not ready" error.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);
/// Lifetime of the explosion emphasis on a hit cell.
pub const HIT_EMPHASIS: Duration = Duration::from_millis(800);
/// Lifetime of the stronger emphasis on every cell of a sunk ship.
pub const SUNK_EMPHASIS: Duration = Duration::from_millis(1600);
/// How long the water marker stays on a missed cell.
pub const MISS_REVERT: Duration = Duration::from_millis(1000);
/// Wait between a successful restart and reloading the server state.
pub const RESTART_RELOAD: Duration = Duration::from_secs(2);
/// Default timeout for HTTP requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Runtime settings for a client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the HTTP API; the control channel URL is derived from it.
    pub api_url: alloc::string::String,
    pub reconnect_delay: Duration,
    pub hit_emphasis: Duration,
    pub sunk_emphasis: Duration,
    pub miss_revert: Duration,
    pub restart_reload: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<alloc::string::String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: alloc::string::String::from(DEFAULT_API_URL),
            reconnect_delay: RECONNECT_DELAY,
            hit_emphasis: HIT_EMPHASIS,
            sunk_emphasis: SUNK_EMPHASIS,
            miss_revert: MISS_REVERT,
            restart_reload: RESTART_RELOAD,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Timing knobs the pure core needs when it schedules transient effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTimings {
    pub hit_emphasis: Duration,
    pub sunk_emphasis: Duration,
    pub miss_revert: Duration,
}

impl Default for EffectTimings {
    fn default() -> Self {
        Self {
            hit_emphasis: HIT_EMPHASIS,
            sunk_emphasis: SUNK_EMPHASIS,
            miss_revert: MISS_REVERT,
        }
    }
}

impl From<&ClientConfig> for EffectTimings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            hit_emphasis: config.hit_emphasis,
            sunk_emphasis: config.sunk_emphasis,
            miss_revert: config.miss_revert,
        }
    }
}
