#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use naval_control::{
    init_logging,
    protocol::control_url,
    transport::ws::WsConnector,
    ui::{parse_command, render_board, Command, TerminalPresenter, HELP},
    Client, ClientConfig, GameApi, HttpApi, Session, DEFAULT_API_URL,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::sync::mpsc;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Base URL of the game server.
    #[arg(long, global = true, env = "NAVAL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Delay before reconnecting after the server reports it is not ready.
    #[arg(long, global = true, env = "NAVAL_RECONNECT_DELAY_MS", default_value_t = 5000)]
    reconnect_delay_ms: u64,
    /// Timeout for each HTTP request.
    #[arg(long, global = true, env = "NAVAL_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    request_timeout_ms: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Place the fleet and watch incoming attacks interactively.
    Play,
    /// Print the current server board once.
    Status,
    /// Restart the server game.
    Restart,
}

#[cfg(feature = "std")]
impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_url.clone());
        config.reconnect_delay = Duration::from_millis(self.reconnect_delay_ms);
        config.request_timeout = Duration::from_millis(self.request_timeout_ms);
        config
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config();
    let api = HttpApi::new(config.api_url.clone(), config.request_timeout)?;

    match cli.command {
        Commands::Play => {
            let connector = WsConnector::new(control_url(&config.api_url)?);
            tracing::info!(api = %config.api_url, control = %connector.url(), "starting client");
            println!("{}", HELP);

            let (tx, rx) = mpsc::channel(16);
            tokio::spawn(read_commands(tx));

            let mut client = Client::new(api, connector, TerminalPresenter::new(), &config);
            client.run(rx).await?;
        }
        Commands::Status => {
            let snapshot = api.fetch_state().await?;
            let mut session = Session::new();
            naval_control::snapshot::apply(&mut session, &snapshot);
            println!("{}", render_board(&session));
            println!("Server phase: {:?}", snapshot.phase);
        }
        Commands::Restart => {
            api.restart().await?;
            println!("Service restarted. You can place your ships again.");
        }
    }
    Ok(())
}

/// Forward parsed stdin lines to the client until EOF or `quit`.
#[cfg(feature = "std")]
async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "reading stdin failed");
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(command)) => {
                let quit = command == Command::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            }
            Ok(None) => {
                if !line.trim().is_empty() {
                    println!("{}", HELP);
                }
            }
            Err(message) => println!("{}", message),
        }
    }
}
