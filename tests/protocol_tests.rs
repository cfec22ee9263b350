use naval_control::{
    protocol::{parse_server_event, PlacementResponse, ServerMessage},
    Coordinate, ImpactOutcome, PlacementRequest, ServerEvent, ServerPhase, ShipType,
};
use serde_json::json;

#[test]
fn placement_request_uses_server_field_names() {
    let request = PlacementRequest {
        ship: ShipType::Submarine,
        positions: vec!["A1".parse().unwrap(), "A2".parse().unwrap()],
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"tipo": "submarino", "posiciones": ["A1", "A2"]})
    );
}

#[test]
fn placement_response_tolerates_extra_fields() {
    let resp: PlacementResponse =
        serde_json::from_str(r#"{"mensaje":"ok","flota_completa":true,"extra":1}"#).unwrap();
    assert!(resp.fleet_complete);
    assert_eq!(resp.message.as_deref(), Some("ok"));
}

#[test]
fn impact_messages_decode() {
    let event =
        parse_server_event(r#"{"tipo":"impacto","coordenada":"C1","resultado":"Hundido"}"#)
            .unwrap();
    assert_eq!(
        event,
        ServerEvent::Impact {
            coordinate: "C1".into(),
            outcome: ImpactOutcome::Sunk,
        }
    );
}

#[test]
fn initial_state_messages_decode() {
    let event = parse_server_event(
        r#"{"tipo":"estado_inicial","estado":{"estado_actual":"q1","tablero":{"A1":"S"}}}"#,
    )
    .unwrap();
    let ServerEvent::Snapshot(snapshot) = event else {
        panic!("expected a snapshot, got {:?}", event);
    };
    assert_eq!(snapshot.phase, ServerPhase::FleetIntact);
    let a1: Coordinate = "A1".parse().unwrap();
    assert_eq!(snapshot.board.get(&a1), Some(&Some("S".to_string())));
}

#[test]
fn unknown_or_malformed_frames_are_errors() {
    assert!(parse_server_event(r#"{"tipo":"saludo"}"#).is_err());
    assert!(parse_server_event(r#"{"tipo":"impacto"}"#).is_err());
    assert!(parse_server_event("not json").is_err());
}

#[test]
fn server_message_encodes_like_the_server() {
    let msg = ServerMessage::Error {
        message: "fleet not ready".into(),
    };
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({"tipo": "error", "mensaje": "fleet not ready"})
    );
}
