use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use naval_control::{
    protocol::{PlacementResponse, ServerMessage},
    transport::in_memory::InMemoryConnector,
    ui::{Command, Presenter},
    CellMark, ChannelState, Client, ClientConfig, ClientError, Coordinate, GameApi,
    PlacementRequest, Session, ShipType, Snapshot, SoundCue, TimerAction,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

/// Server double: records placements and answers from queued replies.
#[derive(Clone, Default)]
struct FakeApi {
    requests: Arc<Mutex<Vec<PlacementRequest>>>,
    replies: Arc<Mutex<VecDeque<Result<PlacementResponse, ClientError>>>>,
    state: Arc<Mutex<Snapshot>>,
    state_fetches: Arc<Mutex<usize>>,
    restarts: Arc<Mutex<usize>>,
}

impl FakeApi {
    fn reply(&self, reply: Result<PlacementResponse, ClientError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn complete(&self, fleet_complete: bool) {
        self.reply(Ok(PlacementResponse {
            fleet_complete,
            message: None,
        }));
    }

    fn requests(&self) -> Vec<PlacementRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn set_state(&self, json: &str) {
        *self.state.lock().unwrap() = serde_json::from_str(json).unwrap();
    }

    fn state_fetches(&self) -> usize {
        *self.state_fetches.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl GameApi for FakeApi {
    async fn place_fleet(
        &self,
        request: &PlacementRequest,
    ) -> Result<PlacementResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Request("no reply queued".into())))
    }

    async fn fetch_state(&self) -> Result<Snapshot, ClientError> {
        *self.state_fetches.lock().unwrap() += 1;
        Ok(self.state.lock().unwrap().clone())
    }

    async fn restart(&self) -> Result<(), ClientError> {
        *self.restarts.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
struct Recorder {
    renders: usize,
    sounds: Vec<SoundCue>,
}

impl Presenter for Recorder {
    fn render(&mut self, _session: &Session) {
        self.renders += 1;
    }

    fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }
}

type TestClient = Client<FakeApi, InMemoryConnector, Recorder>;

fn client() -> (TestClient, FakeApi, InMemoryConnector) {
    let api = FakeApi::default();
    let connector = InMemoryConnector::new();
    let client = Client::new(
        api.clone(),
        connector.clone(),
        Recorder::default(),
        &ClientConfig::default(),
    );
    (client, api, connector)
}

#[tokio::test(start_paused = true)]
async fn destroyer_placed_while_fleet_incomplete() {
    let (mut client, api, connector) = client();
    api.complete(false);

    client.select_ship(ShipType::Destroyer);
    client.select_cell(c("A1")).unwrap();
    let response = client.submit_fleet(ShipType::Destroyer).await.unwrap();
    assert!(!response.fleet_complete);

    let session = client.session();
    assert!(session.placement.is_placed(ShipType::Destroyer));
    let cell = session.board.cell(c("A1"));
    assert!(cell.occupied);
    assert_eq!(cell.mark, CellMark::Occupant('D'));
    assert!(session.controls_enabled());
    assert_eq!(connector.attempts(), 0);
    assert_eq!(client.channel_state(), ChannelState::Disconnected);
    assert!(client.presenter().renders > 0);
}

#[tokio::test(start_paused = true)]
async fn completing_the_fleet_disables_input_and_connects() {
    let (mut client, api, connector) = client();
    let _peer = connector.expect_connection();
    api.complete(true);

    client.select_ship(ShipType::Submarine);
    client.select_cell(c("A1")).unwrap();
    client.select_cell(c("A2")).unwrap();
    client.submit_fleet(ShipType::Submarine).await.unwrap();

    assert_eq!(
        api.requests(),
        vec![PlacementRequest {
            ship: ShipType::Submarine,
            positions: vec![c("A1"), c("A2")],
        }]
    );
    assert!(!client.session().controls_enabled());
    assert_eq!(connector.attempts(), 1);
    assert_eq!(client.channel_state(), ChannelState::Open);
}

#[tokio::test(start_paused = true)]
async fn wrong_selection_size_sends_nothing() {
    let (mut client, api, _connector) = client();
    client.select_ship(ShipType::Battleship);
    client.select_cell(c("B1")).unwrap();

    let err = client.submit_fleet(ShipType::Battleship).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(api.requests().is_empty());
    assert!(client.session().status.is_error);
    assert_eq!(client.session().placement.selection(), &[c("B1")]);
}

#[tokio::test(start_paused = true)]
async fn server_rejection_keeps_the_selection() {
    let (mut client, api, _connector) = client();
    api.reply(Err(ClientError::Request("Posición ocupada".into())));

    client.select_ship(ShipType::Destroyer);
    client.select_cell(c("E5")).unwrap();
    assert!(client.submit_fleet(ShipType::Destroyer).await.is_err());

    let session = client.session();
    assert_eq!(session.status.message, "Posición ocupada");
    assert!(session.status.is_error);
    assert!(!session.placement.is_placed(ShipType::Destroyer));
    assert_eq!(session.placement.selection(), &[c("E5")]);

    api.complete(false);
    assert!(client.submit_fleet(ShipType::Destroyer).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn not_ready_error_reconnects_after_the_delay() -> anyhow::Result<()> {
    let (mut client, _api, connector) = client();
    let peer = connector.expect_connection();
    client.connect().await?;

    peer.send(&ServerMessage::Error {
        message: "fleet not ready".into(),
    })?;
    client.step().await;
    assert_eq!(client.session().status.message, "fleet not ready");
    assert!(client.session().status.is_error);
    assert_eq!(client.channel_state(), ChannelState::AwaitingRetry);
    assert_eq!(client.timers().pending(), vec![&TimerAction::Reconnect]);
    assert_eq!(connector.attempts(), 1);

    // The server follows the error with its state on the same socket.
    peer.send_text(
        r#"{"tipo":"estado_inicial","estado":{"estado_actual":"q0","tablero":{"B2":"D"},"barcos_colocados":{"destructor":true}}}"#,
    )?;
    client.step().await;
    assert!(client.session().placement.is_placed(ShipType::Destroyer));
    assert_eq!(client.session().board.cell(c("B2")).tag, Some(ShipType::Destroyer));
    assert_eq!(connector.attempts(), 1);

    let _second = connector.expect_connection();
    let start = Instant::now();
    client.step().await;
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert_eq!(connector.attempts(), 2);
    assert_eq!(client.channel_state(), ChannelState::Open);
    assert!(peer.is_closed());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn plain_close_never_reconnects() -> anyhow::Result<()> {
    let (mut client, _api, connector) = client();
    let peer = connector.expect_connection();
    client.connect().await?;

    peer.close()?;
    client.step().await;
    assert_eq!(client.channel_state(), ChannelState::Disconnected);
    assert!(client.timers().is_empty());

    let idle = tokio::time::timeout(Duration::from_secs(60), client.step()).await;
    assert!(idle.is_err());
    assert_eq!(connector.attempts(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn missed_shot_reverts_after_a_second() -> anyhow::Result<()> {
    let (mut client, _api, connector) = client();
    let peer = connector.expect_connection();
    client.connect().await?;

    peer.send(&ServerMessage::Impact {
        coordinate: "B3".into(),
        outcome: "Fallido".into(),
    })?;
    client.step().await;
    assert_eq!(client.session().board.cell(c("B3")).mark, CellMark::Water);
    assert_eq!(client.presenter().sounds, vec![SoundCue::Splash]);

    let start = Instant::now();
    client.step().await;
    assert!(start.elapsed() >= Duration::from_millis(1000));
    let cell = client.session().board.cell(c("B3"));
    assert_eq!(cell.mark, CellMark::Label);
    assert!(!cell.occupied);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn garbage_frames_are_dropped() -> anyhow::Result<()> {
    let (mut client, _api, connector) = client();
    let peer = connector.expect_connection();
    client.connect().await?;
    let before = client.session().clone();

    peer.send_text("{\"tipo\":\"saludo\"}")?;
    peer.send_text("not json")?;
    client.step().await;
    client.step().await;
    assert_eq!(client.session(), &before);
    assert_eq!(client.channel_state(), ChannelState::Open);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn impacts_apply_in_arrival_order() -> anyhow::Result<()> {
    let (mut client, api, connector) = client();
    api.set_state(
        r#"{"estado_actual":"q1","tablero":{"C1":"D","A1":"S","A2":"S"},
            "barcos_colocados":{"submarino":true,"acorazado":true,"destructor":true}}"#,
    );
    let peer = connector.expect_connection();
    client.load_initial_state().await;
    assert_eq!(client.channel_state(), ChannelState::Open);
    assert_eq!(client.session().status.message, "Server active - connected");

    for (coord, outcome) in [("A1", "Impactado"), ("C1", "Hundido")] {
        peer.send(&ServerMessage::Impact {
            coordinate: coord.into(),
            outcome: outcome.into(),
        })?;
    }
    client.step().await;
    client.step().await;
    assert_eq!(client.presenter().sounds, vec![SoundCue::Hit, SoundCue::Sunk]);
    assert_eq!(client.session().status.message, "Attack received at C1: Hundido");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn initial_load_waiting_for_fleet_stays_offline() {
    let (mut client, api, connector) = client();
    api.set_state(r#"{"estado_actual":"q0","barcos_colocados":{"submarino":true}}"#);
    client.load_initial_state().await;

    assert_eq!(connector.attempts(), 0);
    assert_eq!(
        client.session().status.message,
        "Server ready for ship placement"
    );
    assert!(client.session().placement.is_placed(ShipType::Submarine));
    assert!(client.session().controls_enabled());
}

#[tokio::test(start_paused = true)]
async fn restart_resets_and_reloads_later() -> anyhow::Result<()> {
    let (mut client, api, connector) = client();
    let _peer = connector.expect_connection();
    api.complete(true);
    client.select_ship(ShipType::Destroyer);
    client.select_cell(c("A1")).unwrap();
    client.submit_fleet(ShipType::Destroyer).await?;

    client.restart().await?;
    assert_eq!(*api.restarts.lock().unwrap(), 1);
    assert_eq!(client.channel_state(), ChannelState::Disconnected);
    assert_eq!(client.session().board.occupied_count(), 0);
    assert!(client.session().controls_enabled());
    assert_eq!(
        client.session().status.message,
        "Service restarted. You can place your ships again."
    );
    assert_eq!(client.timers().pending(), vec![&TimerAction::ReloadState]);

    let start = Instant::now();
    client.step().await;
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(api.state_fetches(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn run_serves_commands_until_quit() -> anyhow::Result<()> {
    let (mut client, api, _connector) = client();
    api.complete(false);
    let (tx, rx) = mpsc::channel(8);
    for command in [
        Command::Ship(ShipType::Destroyer),
        Command::Select(c("C3")),
        Command::Place,
        Command::Quit,
    ] {
        tx.send(command).await?;
    }

    client.run(rx).await?;
    assert_eq!(api.state_fetches(), 1);
    assert!(client.session().placement.is_placed(ShipType::Destroyer));
    assert_eq!(client.session().board.cell(c("C3")).tag, Some(ShipType::Destroyer));
    Ok(())
}
