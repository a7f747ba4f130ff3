use std::time::Duration;

use fatigue_core::api::{
    ActivityType, ApiClient, ApiErrorKind, FeedbackRequest, PollOptions, Position,
    SessionRequest,
};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::events::UiEvent;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Some(Duration::from_secs(5))).unwrap()
}

fn request() -> SessionRequest {
    SessionRequest {
        player_name: "Ana".to_string(),
        position: Position::Midfielder,
        activity_type: ActivityType::Practice,
        sleep_hours: 6.5,
        stress_level: 4,
        distance_km: 5.0,
        sprint_count: 9,
        soreness: None,
        rpe: None,
        injury_illness: None,
    }
}

#[tokio::test]
async fn test_submit_session_reports_queue_ack() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "queued",
            "session_id": 7,
            "message": "Session queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = submit_session(client(&server), request(), CancellationToken::new()).await;
    let UiEvent::SessionQueued(Ok(queued)) = event else {
        panic!("expected queued ack, got {event:?}");
    };
    assert_eq!(queued.session_id, 7);
}

#[tokio::test]
async fn test_cancelled_submit_sends_nothing() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let event = submit_session(client(&server), request(), cancel).await;
    let UiEvent::SessionQueued(Err(err)) = event else {
        panic!("expected cancellation, got {event:?}");
    };
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_poll_session_carries_session_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/predictions/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processed",
            "session_id": 7,
            "fatigue_score": 22.5,
            "risk_level": "low",
            "predicted_action": "cleared",
            "confidence": 0.9
        })))
        .mount(&server)
        .await;

    let options = PollOptions {
        max_attempts: 3,
        interval: Duration::from_millis(10),
    };
    let event = poll_session(client(&server), 7, options, CancellationToken::new()).await;
    let UiEvent::PollFinished { session_id, result } = event else {
        panic!("expected poll result, got {event:?}");
    };
    assert_eq!(session_id, 7);
    let result = result.unwrap();
    assert!((result.fatigue_score - 22.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_submit_feedback_surfaces_http_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Session 7 not found"
        })))
        .mount(&server)
        .await;

    let feedback = FeedbackRequest {
        session_id: 7,
        correct: true,
        user_label: "cleared".to_string(),
        comment: None,
    };
    let event = submit_feedback(client(&server), feedback, CancellationToken::new()).await;
    let UiEvent::FeedbackSent(Err(err)) = event else {
        panic!("expected feedback error, got {event:?}");
    };
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn test_status_loop_refreshes_until_cancelled() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agent/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_running": true,
            "processed_count": 3
        })))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(status_refresh_loop(
        client(&server),
        Duration::from_millis(20),
        tx,
        cancel.clone(),
    ));

    for _ in 0..2 {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let UiEvent::AgentStatusLoaded(Ok(status)) = event else {
            panic!("expected agent status, got {event:?}");
        };
        assert!(status.is_running);
        assert_eq!(status.processed_count, 3);
    }

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_status_loop_reports_unreachable_agent() {
    let api = ApiClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(status_refresh_loop(
        api,
        Duration::from_secs(60),
        tx,
        cancel.clone(),
    ));

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    let UiEvent::AgentStatusLoaded(Err(err)) = event else {
        panic!("expected connection error, got {event:?}");
    };
    assert_eq!(err.kind, ApiErrorKind::Network);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
