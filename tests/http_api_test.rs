use std::time::Duration;

use naval_control::{
    api::{RESTART_FALLBACK, STATE_FALLBACK},
    ClientError, Coordinate, GameApi, HttpApi, PlacementRequest, ServerPhase, ShipType,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned HTTP response and hand back the raw request.
async fn serve_once(
    status: &str,
    body: &str,
) -> anyhow::Result<(String, JoinHandle<anyhow::Result<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request_complete(&request) {
                break;
            }
        }
        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;
        Ok(String::from_utf8_lossy(&request).into_owned())
    });
    Ok((base, handle))
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(split) = text.find("\r\n\r\n") else {
        return false;
    };
    let length = text[..split]
        .lines()
        .find_map(|l| {
            let (name, value) = l.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= split + 4 + length
}

fn api(base: &str) -> HttpApi {
    HttpApi::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn place_fleet_posts_the_selection() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", r#"{"mensaje":"ok","flota_completa":true}"#).await?;
    let request = PlacementRequest {
        ship: ShipType::Battleship,
        positions: vec!["B2".parse()?, "C2".parse()?, "D2".parse()?],
    };

    let response = api(&base).place_fleet(&request).await?;
    assert!(response.fleet_complete);

    let raw = server.await??;
    assert!(raw.starts_with("POST /colocar-flota "));
    assert!(raw.contains(r#""tipo":"acorazado""#));
    assert!(raw.contains(r#""posiciones":["B2","C2","D2"]"#));
    Ok(())
}

#[tokio::test]
async fn rejection_carries_the_server_detail() -> anyhow::Result<()> {
    let (base, server) = serve_once("400 Bad Request", r#"{"detail":"Barco ya colocado"}"#).await?;
    let request = PlacementRequest {
        ship: ShipType::Destroyer,
        positions: vec!["A1".parse()?],
    };

    let err = api(&base).place_fleet(&request).await.unwrap_err();
    assert_eq!(err, ClientError::Request("Barco ya colocado".into()));
    server.await??;
    Ok(())
}

#[tokio::test]
async fn restart_without_detail_uses_the_fallback() -> anyhow::Result<()> {
    let (base, server) = serve_once("500 Internal Server Error", "{}").await?;
    let err = api(&base).restart().await.unwrap_err();
    assert_eq!(err, ClientError::Request(RESTART_FALLBACK.into()));
    let raw = server.await??;
    assert!(raw.starts_with("POST /reiniciar "));
    Ok(())
}

#[tokio::test]
async fn fetch_state_decodes_the_snapshot() -> anyhow::Result<()> {
    let body = r#"{"estado_actual":"q1","tablero":{"A1":"S"},"impactos":{"A1":"X"},"barcos_colocados":{"submarino":true}}"#;
    let (base, server) = serve_once("200 OK", body).await?;
    let snapshot = api(&base).fetch_state().await?;
    assert_eq!(snapshot.phase, ServerPhase::FleetIntact);
    let a1: Coordinate = "A1".parse()?;
    assert_eq!(snapshot.impacts.get(&a1).map(String::as_str), Some("X"));
    let raw = server.await??;
    assert!(raw.starts_with("GET /estado "));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    drop(listener);
    let err = api(&base).fetch_state().await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert_ne!(err, ClientError::Request(STATE_FALLBACK.into()));
    Ok(())
}
