//! The client driver: one task that owns the session and reacts to user
//! commands, control channel events and timers in the order they arrive.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::GameApi;
use crate::channel::{ChannelEvent, ChannelManager, ChannelState};
use crate::config::{ClientConfig, EffectTimings};
use crate::coord::Coordinate;
use crate::dispatcher::{self, Effect, ServerEvent, TimerAction};
use crate::error::ClientError;
use crate::placement::Toggle;
use crate::protocol::{parse_server_event, PlacementResponse};
use crate::session::Session;
use crate::ship::ShipType;
use crate::snapshot::{self, ServerPhase};
use crate::timers::Timers;
use crate::transport::Connector;
use crate::ui::{Command, Presenter};

enum Wake {
    Command(Command),
    Channel(ChannelEvent),
    Timer(TimerAction),
}

pub struct Client<A: GameApi, C: Connector, P: Presenter> {
    session: Session,
    api: A,
    channel: ChannelManager<C>,
    timers: Timers,
    presenter: P,
    timings: EffectTimings,
    restart_reload: Duration,
}

impl<A: GameApi, C: Connector, P: Presenter> Client<A, C, P> {
    pub fn new(api: A, connector: C, presenter: P, config: &ClientConfig) -> Self {
        Self {
            session: Session::new(),
            api,
            channel: ChannelManager::new(connector, config.reconnect_delay),
            timers: Timers::new(),
            presenter,
            timings: EffectTimings::from(config),
            restart_reload: config.restart_reload,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    pub fn connector(&self) -> &C {
        self.channel.connector()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn publish(&mut self) {
        self.presenter.render(&self.session);
    }

    /// Fetch the server state and rebuild the local view from it. Connects
    /// the control channel unless the server is still waiting for a fleet.
    pub async fn load_initial_state(&mut self) {
        match self.api.fetch_state().await {
            Ok(state) => {
                snapshot::apply(&mut self.session, &state);
                match state.phase {
                    ServerPhase::AwaitingFleet => {
                        self.session.report("Server ready for ship placement");
                    }
                    phase => {
                        if self.channel.connect(&mut self.session).await.is_ok() {
                            self.session.report("Server active - connected");
                        }
                        if phase == ServerPhase::FleetSunk {
                            self.session.report("The whole fleet has been sunk");
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading server state failed");
                self.session
                    .report_error(format!("Error connecting to server: {}", e));
            }
        }
        self.publish();
    }

    pub fn select_ship(&mut self, ship: ShipType) {
        self.session.set_ship_type(ship);
        self.session
            .report(format!("Placing {} ({} cells)", ship, ship.size()));
        self.publish();
    }

    /// Toggle a cell of the current selection.
    pub fn select_cell(&mut self, coord: Coordinate) -> Result<Toggle, ClientError> {
        let result = self.session.select_cell(coord);
        self.publish();
        Ok(result?)
    }

    /// Send the current selection as the position of `ship`.
    ///
    /// Local checks run first and nothing is sent when they fail. On success
    /// the cells become occupied; when the server reports the fleet complete
    /// placement input is closed and the control channel is opened.
    pub async fn submit_fleet(&mut self, ship: ShipType) -> Result<PlacementResponse, ClientError> {
        let request = match self.session.placement.begin_submit(ship) {
            Ok(request) => request,
            Err(e) => {
                self.session.report_error(e.to_string());
                self.publish();
                return Err(e.into());
            }
        };
        tracing::info!(%ship, cells = ?request.positions, "submitting placement");

        match self.api.place_fleet(&request).await {
            Ok(response) => {
                self.session
                    .placement
                    .confirm(ship, &mut self.session.board);
                self.session.report(format!("{} placed", ship));
                if response.fleet_complete {
                    self.session.placement.close();
                    self.session
                        .report("Fleet complete. Connecting to control server...");
                    self.publish();
                    // Failure is already on the status line.
                    let _ = self.channel.connect(&mut self.session).await;
                }
                self.publish();
                Ok(response)
            }
            Err(e) => {
                self.session.placement.reject(ship);
                self.session.report_error(e.to_string());
                self.publish();
                Err(e)
            }
        }
    }

    /// Restart the server game and start over locally. The server state is
    /// reloaded after a short delay.
    pub async fn restart(&mut self) -> Result<(), ClientError> {
        self.channel.disconnect().await;
        match self.api.restart().await {
            Ok(()) => {
                self.session.reset();
                self.session
                    .report("Service restarted. You can place your ships again.");
                self.timers
                    .schedule(self.restart_reload, TimerAction::ReloadState);
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.session.report_error(format!("Error: {}", e));
                self.publish();
                Err(e)
            }
        }
    }

    /// Open the control channel, replacing any open one.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let result = self.channel.connect(&mut self.session).await;
        self.publish();
        result
    }

    pub async fn handle_channel_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Message(text) => match parse_server_event(&text) {
                Ok(event) => {
                    self.handle_server_event(event).await;
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unparseable control frame");
                    return;
                }
            },
            ChannelEvent::Closed => self.channel.on_closed(&mut self.session),
            ChannelEvent::Error(error) => self
                .channel
                .on_transport_error(&mut self.session, &error),
        }
        self.publish();
    }

    pub async fn handle_server_event(&mut self, event: ServerEvent) {
        let effects = dispatcher::dispatch(&mut self.session, event, &self.timings);
        for effect in effects {
            match effect {
                Effect::Sound(cue) => self.presenter.play(cue),
                Effect::Schedule { after, action } => self.timers.schedule(after, action),
                Effect::NotReady(message) => {
                    let retry = self.channel.on_not_ready(&mut self.session, &message);
                    if let Effect::Schedule { after, action } = retry {
                        self.timers.schedule(after, action);
                    }
                }
            }
        }
        self.publish();
    }

    pub async fn fire_timer(&mut self, action: TimerAction) {
        match action {
            TimerAction::Reconnect => {
                tracing::info!("reconnecting control channel");
                let _ = self.connect().await;
            }
            TimerAction::ReloadState => self.load_initial_state().await,
            other => {
                dispatcher::fire(&mut self.session, &other);
                self.publish();
            }
        }
    }

    /// Wait for the next channel event or timer and handle it.
    pub async fn step(&mut self) {
        let wake = tokio::select! {
            event = self.channel.next_event() => Wake::Channel(event),
            action = self.timers.next_due() => Wake::Timer(action),
        };
        self.handle(wake).await;
    }

    async fn handle(&mut self, wake: Wake) {
        match wake {
            Wake::Command(command) => self.execute(command).await,
            Wake::Channel(event) => self.handle_channel_event(event).await,
            Wake::Timer(action) => self.fire_timer(action).await,
        }
    }

    /// Run one user command. Errors end up on the status line.
    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::Ship(ship) => self.select_ship(ship),
            Command::Select(coord) => {
                let _ = self.select_cell(coord);
            }
            Command::Place => {
                let ship = self.session.placement.ship_type();
                let _ = self.submit_fleet(ship).await;
            }
            Command::Restart => {
                let _ = self.restart().await;
            }
            Command::Refresh => self.load_initial_state().await,
            Command::Connect => {
                let _ = self.connect().await;
            }
            Command::Board => self.publish(),
            Command::Quit => {}
        }
    }

    /// Load the server state, then serve commands, channel events and timers
    /// until `Quit` arrives or the command source goes away.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) -> anyhow::Result<()> {
        self.load_initial_state().await;
        loop {
            let wake = tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Quit) | None => break,
                    Some(command) => Wake::Command(command),
                },
                event = self.channel.next_event() => Wake::Channel(event),
                action = self.timers.next_due() => Wake::Timer(action),
            };
            self.handle(wake).await;
        }
        self.channel.disconnect().await;
        tracing::info!("client stopped");
        Ok(())
    }
}
