//! End-to-end tests of the HTTP AI client against a local stub service.

mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::runtime::Handle;

use study_desktop_lib::ai::{AiClient, AiSettings, HttpAiClient};
use study_desktop_lib::controller::StudyController;

use common::fixtures::{self, RUST_BOARD};
use common::{notes, EventLog};

fn completion(content: &str) -> Json<Value> {
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

async fn cards(Json(request): Json<Value>) -> Json<Value> {
    let prompt = request["messages"][1]["content"].as_str().unwrap_or_default();
    if !prompt.contains("Every value has a single owner.") {
        return completion("[]");
    }
    let cards = serde_json::to_string(&fixtures::remote_cards()).unwrap();
    completion(&format!("```json\n{}\n```", cards))
}

async fn answer(headers: HeaderMap, Json(request): Json<Value>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    let prompt = request["messages"][1]["content"].as_str().unwrap_or_default();
    let question = prompt.rsplit("Question: ").next().unwrap_or_default();
    completion(&format!("{} | {}", auth, question))
}

async fn failing() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded")
}

async fn empty() -> Json<Value> {
    Json(json!({ "choices": [] }))
}

/// Start the stub service and return its base url.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/cards", post(cards))
        .route("/answer", post(answer))
        .route("/fail", post(failing))
        .route("/empty", post(empty));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn controller(base: &str, path: &str, api_key: Option<&str>) -> (StudyController, EventLog) {
    let settings = AiSettings {
        endpoint: format!("{}{}", base, path),
        api_key: api_key.map(str::to_string),
        ..AiSettings::default()
    };
    let client: Box<dyn AiClient> = Box::new(HttpAiClient::new(settings, Handle::current()));
    let mut controller = StudyController::new(notes(fixtures::boards()), Some(client));
    let log = EventLog::attach(&mut controller);
    (controller, log)
}

async fn settle(controller: &mut StudyController) {
    while controller.is_busy() {
        assert!(controller.wait_for_ai_event().await);
    }
}

#[tokio::test]
async fn flashcards_round_trip() {
    let base = spawn_stub().await;
    let (mut controller, log) = controller(&base, "/cards", None);

    controller.generate_flashcards_for_board(RUST_BOARD);
    assert!(controller.is_busy());
    settle(&mut controller).await;

    assert_eq!(
        controller.flashcards().as_slice(),
        fixtures::remote_cards().as_slice()
    );
    assert!(log.errors().is_empty());
}

#[tokio::test]
async fn answer_uses_api_key_override() {
    let base = spawn_stub().await;
    let (mut controller, log) = controller(&base, "/answer", Some("configured"));
    controller.set_ai_api_key("override");

    controller.ask_ai_about_board(RUST_BOARD, "Who owns a value?");
    settle(&mut controller).await;

    assert_eq!(
        controller.last_ai_answer(),
        "Bearer override | Who owns a value?"
    );
    assert!(log.errors().is_empty());
}

#[tokio::test]
async fn endpoint_override_redirects_requests() {
    let base = spawn_stub().await;
    let (mut controller, _log) = controller(&base, "/fail", None);
    controller.set_ai_endpoint(&format!("{}/answer", base));

    controller.ask_ai_about_board(RUST_BOARD, "Anyone?");
    settle(&mut controller).await;

    assert_eq!(controller.last_ai_answer(), "none | Anyone?");
}

#[tokio::test]
async fn service_error_surfaces_as_error_event() {
    let base = spawn_stub().await;
    let (mut controller, log) = controller(&base, "/fail", None);

    controller.generate_flashcards_for_board(RUST_BOARD);
    settle(&mut controller).await;

    assert_eq!(
        log.errors(),
        vec!["AI service error: 500 - model overloaded"]
    );
    assert_eq!(controller.flashcards().count(), 0);
}

#[tokio::test]
async fn empty_reply_is_an_error() {
    let base = spawn_stub().await;
    let (mut controller, log) = controller(&base, "/empty", None);

    controller.ask_ai_about_board(RUST_BOARD, "Hello?");
    settle(&mut controller).await;

    assert_eq!(log.errors(), vec!["AI service returned an empty response"]);
    assert_eq!(controller.last_ai_answer(), "");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (mut controller, log) = controller(&format!("http://{}", addr), "/cards", None);
    controller.generate_flashcards_for_board(RUST_BOARD);
    settle(&mut controller).await;

    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Network error:"), "{}", errors[0]);
}
