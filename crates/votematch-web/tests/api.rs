//! HTTP API tests, driven in-process through the router.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use votematch_db::InMemoryStore;
use votematch_test_utils::sample_catalog;
use votematch_web::{build_router, AppState};

fn app() -> Router {
    build_router(AppState::in_memory(InMemoryStore::new(sample_catalog()), 3))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_questions_listed_in_order_with_options() {
    let (status, body) = send(&app(), get("/api/questions")).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    let ids: Vec<&str> = questions.iter().map(|q| q["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["q1", "q2", "q3"]);
    assert_eq!(questions[0]["type"], "single_choice");
    assert_eq!(questions[0]["options"][0]["value"], "market");
}

#[tokio::test]
async fn test_submit_complete_and_read_back() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/answers",
            json!({
                "sessionId": "s1",
                "answers": [
                    { "questionId": "q1", "value": "market" },
                    { "questionId": "q3", "value": "agree" }
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "count": 2 }));

    let (status, live) = send(&app, get("/api/results/s1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(live["source"], "computed");
    assert_eq!(live["axisScores"]["economy"], 70.0);

    let (status, completed) = send(&app, post_json("/api/complete", json!({ "sessionId": "s1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["partySimilarities"]["liberal"], 93);
    assert_eq!(completed["parties"][0]["partyId"], "empty");
    assert_eq!(completed["parties"][0]["comparedAxes"], 0);
    assert_eq!(completed["parties"][1]["partyId"], "liberal");
    assert_eq!(completed["parties"][1]["comparedAxes"], 3);

    let (status, stored) = send(&app, get("/api/results/s1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["source"], "snapshot");
    assert_eq!(stored["axisScores"], completed["axisScores"]);
    assert_eq!(stored["parties"], completed["parties"]);
}

#[tokio::test]
async fn test_complete_twice_returns_same_result() {
    let app = app();
    let request = || post_json("/api/complete", json!({ "sessionId": "s9" }));
    let (first_status, first) = send(&app, request()).await;
    let (second_status, second) = send(&app, request()).await;
    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["source"], "snapshot");
    assert_eq!(first["partySimilarities"], second["partySimilarities"]);
}

#[tokio::test]
async fn test_explanation() {
    let app = app();
    send(
        &app,
        post_json(
            "/api/answers",
            json!({ "sessionId": "s1", "answers": [{ "questionId": "q1", "value": "state" }] }),
        ),
    )
    .await;

    let (status, body) = send(&app, get("/api/results/s1/explanation")).await;
    assert_eq!(status, StatusCode::OK);
    // the unpositioned party ties at 100 but is never explained
    assert_eq!(body["partyId"], "labour");
    assert_eq!(body["similarity"], 60);
    assert_eq!(body["topAxes"][0]["axisId"], "economy");
    assert!(body["text"]
        .as_str()
        .unwrap()
        .starts_with("Your views are 60% similar to Labour Party"));
}

#[tokio::test]
async fn test_explanation_without_parties_is_not_found() {
    let app = build_router(AppState::in_memory(
        InMemoryStore::new(votematch_test_utils::CatalogBuilder::new().axis("economy", "Economy").build()),
        3,
    ));
    let (status, body) = send(&app, get("/api/results/s1/explanation")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_bad_answer_submissions_are_rejected() {
    let app = app();
    let cases = vec![
        json!({ "answers": [{ "questionId": "q1", "value": "market" }] }),
        json!({ "sessionId": "s1" }),
        json!({ "sessionId": "s1", "answers": [] }),
        json!({ "sessionId": "  ", "answers": [{ "questionId": "q1", "value": "market" }] }),
        json!({ "sessionId": "s1", "answers": [{ "questionId": "q404", "value": "market" }] }),
        json!({ "sessionId": "s1", "answers": [{ "questionId": "q1", "value": "anarchy" }] }),
    ];
    for case in cases {
        let (status, body) = send(&app, post_json("/api/answers", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {case}");
        assert!(body["error"].is_string(), "payload {case}");
    }

    // nothing was recorded
    let (_, results) = send(&app, get("/api/results/s1")).await;
    assert_eq!(results["axisScores"]["economy"], 0.0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/answers")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_complete_requires_session_id() {
    let (status, body) = send(&app(), post_json("/api/complete", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Session ID required");
}
