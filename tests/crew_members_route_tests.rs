use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use fleet::config::WebConfig;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

async fn test_app() -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "fleet-crew-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", temp_path.display());
    let db = fleet::db::spawn(&database_url).await.expect("spawn DbActor");
    let app = fleet::fleet_router(fleet::FleetState::new(db), &WebConfig::default());
    (app, temp_path)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn ship_ids(app: &Router) -> Vec<i64> {
    let (_, body) = call(app, "GET", "/ships?sortField=id", None).await;
    body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn crew_member_routes_scope_validate_and_cascade() {
    let (app, path) = test_app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/ships?bulk=on",
        Some(json!([
            {"name": "Pequod", "displacement": 900},
            {"name": "Rachel", "displacement": 800}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let ids = ship_ids(&app).await;
    let (pequod, rachel) = (ids[0], ids[1]);
    let crew_uri = format!("/ships/{pequod}/crewmembers");

    // 1. Role must be one of the enumerated values
    let (status, body) = call(
        &app,
        "POST",
        &crew_uri,
        Some(json!({"name": "Ishmael", "role": "COOK"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = call(
        &app,
        "POST",
        &crew_uri,
        Some(json!({"name": "Ishmael", "role": "CAPTAIN"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Crewmember created");

    // 2. Name needs five characters
    let (status, _) = call(
        &app,
        "POST",
        &crew_uri,
        Some(json!({"name": "Pip", "role": "DECKHAND"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 3. Listing carries the parent id; the body's shipId is ignored
    let (status, body) = call(&app, "GET", &crew_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let crew = body.as_array().unwrap();
    assert_eq!(crew.len(), 1);
    assert_eq!(crew[0]["shipId"], pequod);
    assert_eq!(crew[0]["role"], "CAPTAIN");
    let cid = crew[0]["id"].as_i64().unwrap();

    // 4. Update
    let (status, body) = call(
        &app,
        "PUT",
        &format!("{crew_uri}/{cid}"),
        Some(json!({"role": "DECKHAND", "shipId": rachel})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Crewmember updated");
    let (_, body) = call(&app, "GET", &format!("{crew_uri}/{cid}"), None).await;
    assert_eq!(body["role"], "DECKHAND");
    assert_eq!(body["name"], "Ishmael");
    assert_eq!(body["shipId"], pequod);

    // 5. Wrong parent or missing parent
    let (status, body) = call(
        &app,
        "GET",
        &format!("/ships/{rachel}/crewmembers/{cid}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Crewmember not found");

    let (status, body) = call(&app, "GET", "/ships/9999/crewmembers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Ship not found");

    let (status, _) = call(
        &app,
        "POST",
        "/ships/9999/crewmembers",
        Some(json!({"name": "X", "role": "COOK"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/ships/{rachel}/crewmembers/{cid}"),
        Some(json!({"role": "COOK"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "POST",
        "/ships/9999/crewmembers",
        Some(json!({"name": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Ship not found");

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/ships/{rachel}/crewmembers/{cid}"),
        Some(json!({"role": ["CAPTAIN"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/ships/{rachel}/crewmembers"),
        Some(json!({"name": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");

    let (status, body) = call(
        &app,
        "POST",
        &crew_uri,
        Some(json!({"name": "Stub\u{0}b", "role": "DECKHAND"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // 6. Deleting the ship takes the crew with it
    let (status, _) = call(&app, "DELETE", &format!("/ships/{pequod}"), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, _) = call(&app, "GET", &crew_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 7. Delete on a surviving ship
    let rachel_uri = format!("/ships/{rachel}/crewmembers");
    let (status, _) = call(
        &app,
        "POST",
        &rachel_uri,
        Some(json!({"name": "Gardiner", "role": "BOATSWAIN"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = call(&app, "GET", &rachel_uri, None).await;
    let cid = body[0]["id"].as_i64().unwrap();
    let (status, body) = call(&app, "DELETE", &format!("{rachel_uri}/{cid}"), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["message"], "Crewmember deleted");
    let (_, body) = call(&app, "GET", &rachel_uri, None).await;
    assert!(body.as_array().unwrap().is_empty());

    let _ = tokio::fs::remove_file(&path).await;
}
