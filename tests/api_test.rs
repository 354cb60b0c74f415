//! HTTP API integration tests using the Router::oneshot pattern.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use strictly_gridtoe::{ServerConfig, SessionManager, router};
use tower::ServiceExt;

fn test_router() -> Router {
    let config = ServerConfig::default();
    router(SessionManager::from_config(&config), &config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn start(app: &Router, body: Value) -> String {
    let (status, body) = send(app, "POST", "/api/new_game", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_new_game_defaults() {
    let app = test_router();
    let (status, body) = send(&app, "POST", "/api/new_game", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grid_size"], 3);
    assert_eq!(body["game_mode"], "two_player");
    assert_eq!(body["current_player"], "X");
    assert_eq!(body["game_over"], false);
    assert_eq!(body["winner"], Value::Null);
    assert_eq!(body["board"], json!([["", "", ""], ["", "", ""], ["", "", ""]]));
}

#[tokio::test]
async fn test_ai_refused_on_large_grid() {
    let app = test_router();
    let (status, body) = send(
        &app,
        "POST",
        "/api/new_game",
        Some(json!({"grid_size": 4, "game_mode": "single_player"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("3x3"));
}

#[tokio::test]
async fn test_large_two_player_grid_allowed() {
    let app = test_router();
    let (status, body) = send(
        &app,
        "POST",
        "/api/new_game",
        Some(json!({"grid_size": 5, "game_mode": "two_player"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_oversized_grid_refused() {
    let app = test_router();
    for grid_size in [16_u64, 100_000, 8_589_934_592] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/new_game",
            Some(json!({"grid_size": grid_size, "game_mode": "two_player"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{grid_size}");
        assert_eq!(
            body["error"],
            format!("Grid size {grid_size} exceeds the maximum of 15")
        );
    }
}

#[tokio::test]
async fn test_two_player_win_and_scores() {
    let app = test_router();
    let id = start(&app, json!({"session_id": "alice"})).await;
    assert_eq!(id, "alice");

    let mut last = Value::Null;
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/make_move",
            Some(json!({"session_id": id, "row": row, "col": col})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("ai_move").is_none());
        last = body;
    }

    assert_eq!(last["game_over"], true);
    assert_eq!(last["winner"], "X");
    assert_eq!(last["winning_line"], json!([[0, 0], [0, 1], [0, 2]]));

    let (_, scores) = send(&app, "GET", "/api/get_scores?session_id=alice", None).await;
    assert_eq!(scores["scores"], json!({"player_x": 1, "player_o": 0, "computer": 0}));

    let (status, scores) = send(
        &app,
        "POST",
        "/api/reset_scores",
        Some(json!({"session_id": "alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores["scores"], json!({"player_x": 0, "player_o": 0, "computer": 0}));
}

#[tokio::test]
async fn test_single_player_gets_reply() {
    let app = test_router();
    let id = start(
        &app,
        json!({"game_mode": "single_player", "difficulty": "hard"}),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/make_move",
        Some(json!({"session_id": id, "row": 0, "col": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_move"], json!([1, 1]));
    assert_eq!(body["board"][1][1], "O");
    assert_eq!(body["current_player"], "X");

    let (status, state) = send(
        &app,
        "GET",
        &format!("/api/game_state?session_id={id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["board"], body["board"]);
}

#[tokio::test]
async fn test_invalid_moves_rejected() {
    let app = test_router();
    let id = start(&app, json!({})).await;

    let moves = [json!({"row": 3, "col": 0}), json!({"row": -1, "col": 0})];
    for mv in moves {
        let mut req = mv.clone();
        req["session_id"] = json!(id);
        let (status, body) = send(&app, "POST", "/api/make_move", Some(req)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{mv}");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid move"));
    }

    send(
        &app,
        "POST",
        "/api/make_move",
        Some(json!({"session_id": id, "row": 1, "col": 1})),
    )
    .await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/make_move",
        Some(json!({"session_id": id, "row": 1, "col": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, state) = send(&app, "GET", &format!("/api/game_state?session_id={id}"), None).await;
    assert_eq!(state["current_player"], "O");
}

#[tokio::test]
async fn test_unknown_session() {
    let app = test_router();
    let (status, body) = send(
        &app,
        "POST",
        "/api/make_move",
        Some(json!({"session_id": "nobody", "row": 0, "col": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Game not found");

    let (status, _) = send(&app, "GET", "/api/game_state?session_id=nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, scores) = send(&app, "GET", "/api/get_scores?session_id=nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores["scores"]["player_x"], 0);
}
