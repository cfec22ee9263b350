//! JSON shapes exchanged with the defence server.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::common::ImpactOutcome;
use crate::dispatcher::ServerEvent;
use crate::snapshot::Snapshot;

pub const PLACE_FLEET_PATH: &str = "/colocar-flota";
pub const STATE_PATH: &str = "/estado";
pub const RESTART_PATH: &str = "/reiniciar";
pub const CONTROL_PATH: &str = "/ws/control";

/// Messages pushed over the control channel, discriminated by `tipo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum ServerMessage {
    #[serde(rename = "impacto")]
    Impact {
        #[serde(rename = "coordenada")]
        coordinate: String,
        #[serde(rename = "resultado")]
        outcome: String,
    },
    #[serde(rename = "estado_inicial")]
    InitialState {
        #[serde(rename = "estado")]
        state: Snapshot,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(rename = "mensaje")]
        message: String,
    },
}

impl From<ServerMessage> for ServerEvent {
    fn from(msg: ServerMessage) -> Self {
        match msg {
            ServerMessage::Impact {
                coordinate,
                outcome,
            } => ServerEvent::Impact {
                coordinate,
                outcome: ImpactOutcome::from_wire(&outcome),
            },
            ServerMessage::InitialState { state } => ServerEvent::Snapshot(state),
            ServerMessage::Error { message } => ServerEvent::Error(message),
        }
    }
}

/// Decode one text frame from the control channel.
pub fn parse_server_event(text: &str) -> Result<ServerEvent, serde_json::Error> {
    let msg: ServerMessage = serde_json::from_str(text)?;
    Ok(msg.into())
}

/// Successful reply to a placement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlacementResponse {
    #[serde(rename = "flota_completa", default)]
    pub fleet_complete: bool,
    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error reply body. `detail` is usually a string but validation failures
/// carry a structured value.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The server message when it is plain text.
    pub fn detail_text(&self) -> Option<&str> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Join an API path onto the base URL, tolerating a trailing slash.
pub fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), path)
}

/// Control channel URL for an HTTP base URL: `http` becomes `ws` and `https`
/// becomes `wss`.
pub fn control_url(api_url: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(&endpoint(api_url, CONTROL_PATH))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(anyhow::anyhow!("Unsupported URL scheme: {}", other)),
    };
    url.set_scheme(scheme)
        .map_err(|_| anyhow::anyhow!("Cannot switch {} to {}", url, scheme))?;
    Ok(url)
}
