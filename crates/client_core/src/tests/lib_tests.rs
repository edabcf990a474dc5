use super::*;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone, Copy)]
enum Reply {
    Plate,
    ServiceError,
    NotJson,
    Slow,
}

#[derive(Clone)]
struct ServerState {
    reply: Reply,
    requests: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

struct FakeService {
    base_url: String,
    requests: Arc<AtomicUsize>,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

async fn handle_recognize(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.parts.lock().await.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    match state.reply {
        Reply::Plate => Json(json!({"plate": "ABC123", "confidence": 0.97})).into_response(),
        Reply::ServiceError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Roboflow detection failed: upstream timeout"})),
        )
            .into_response(),
        Reply::NotJson => (StatusCode::OK, "plates: none").into_response(),
        Reply::Slow => {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Json(json!({"plates": []})).into_response()
        }
    }
}

async fn spawn_recognition_server(route: &str, reply: Reply) -> FakeService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(AtomicUsize::new(0));
    let parts = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        reply,
        requests: Arc::clone(&requests),
        parts: Arc::clone(&parts),
    };
    let app = Router::new()
        .route(route, post(handle_recognize))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    FakeService {
        base_url: format!("http://{addr}"),
        requests,
        parts,
    }
}

fn plate_upload() -> ImageUpload {
    ImageUpload::new("car.jpg", "image/jpeg", b"\xff\xd8\xff-jpeg-bytes".to_vec())
}

#[tokio::test]
async fn recognize_posts_image_field_and_passes_payload_through() {
    let service = spawn_recognition_server("/api/recognize-plate", Reply::Plate).await;
    let client = RecognitionClient::new(&service.base_url).expect("client");

    let result = client.recognize(plate_upload()).await.expect("recognize");

    assert_eq!(
        result.as_value(),
        &json!({"plate": "ABC123", "confidence": 0.97})
    );
    assert_eq!(service.requests.load(Ordering::SeqCst), 1);
    let parts = service.parts.lock().await;
    assert_eq!(
        *parts,
        vec![ReceivedPart {
            name: "image".to_string(),
            file_name: Some("car.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            bytes: b"\xff\xd8\xff-jpeg-bytes".to_vec(),
        }]
    );
}

#[tokio::test]
async fn base_url_path_prefix_and_trailing_slash_are_respected() {
    let service = spawn_recognition_server("/plates/api/recognize-plate", Reply::Plate).await;
    let client = RecognitionClient::new(&format!("{}/plates/", service.base_url)).expect("client");

    client.recognize(plate_upload()).await.expect("recognize");
    assert_eq!(service.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_success_status_carries_service_message() {
    let service = spawn_recognition_server("/api/recognize-plate", Reply::ServiceError).await;
    let client = RecognitionClient::new(&service.base_url).expect("client");

    let err = client
        .recognize(plate_upload())
        .await
        .expect_err("server error");

    assert_eq!(err.kind(), FailureKind::Status);
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        RecognitionError::Status { message, .. } => assert_eq!(
            message.as_deref(),
            Some("Roboflow detection failed: upstream timeout")
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(service.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_route_is_a_status_failure_without_message() {
    let service = spawn_recognition_server("/elsewhere", Reply::Plate).await;
    let client = RecognitionClient::new(&service.base_url).expect("client");

    let err = client.recognize(plate_upload()).await.expect_err("404");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("no error body"));
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_failure() {
    let service = spawn_recognition_server("/api/recognize-plate", Reply::NotJson).await;
    let client = RecognitionClient::new(&service.base_url).expect("client");

    let err = client.recognize(plate_upload()).await.expect_err("decode");
    assert_eq!(err.kind(), FailureKind::Decode);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = RecognitionClient::new(&format!("http://{addr}")).expect("client");
    let err = client
        .recognize(plate_upload())
        .await
        .expect_err("connection refused");
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn slow_service_hits_the_client_timeout() {
    let service = spawn_recognition_server("/api/recognize-plate", Reply::Slow).await;
    let client = RecognitionClient::from_settings(&ClientSettings {
        api_base_url: service.base_url.clone(),
        request_timeout_secs: Some(1),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.recognize(plate_upload()).await.expect_err("timeout");
    assert_eq!(err.kind(), FailureKind::Timeout);
}

#[test]
fn endpoint_is_joined_onto_base_url() {
    assert_eq!(
        recognize_endpoint("http://127.0.0.1:5000").expect("url").as_str(),
        "http://127.0.0.1:5000/api/recognize-plate"
    );
    assert_eq!(
        recognize_endpoint(" https://lpr.example.com/v1/ ")
            .expect("url")
            .as_str(),
        "https://lpr.example.com/v1/api/recognize-plate"
    );
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(
        recognize_endpoint("not a url"),
        Err(RecognitionError::InvalidBaseUrl { .. })
    ));
    let err = recognize_endpoint("ftp://files.example.com").expect_err("scheme");
    assert!(matches!(err, RecognitionError::UnsupportedScheme(ref s) if s == "ftp"));
    assert_eq!(err.kind(), FailureKind::Configuration);
}
