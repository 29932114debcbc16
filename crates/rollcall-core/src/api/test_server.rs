//! In-process roster server with the routes of the Flask app, for tests.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

pub type Stored = Arc<Mutex<Vec<Value>>>;

/// Serve `GET`/`POST /api/athletes` and `DELETE /api/athletes/all` on a
/// random local port. Returns the base URL and the server's roster.
pub async fn spawn(initial: Vec<Value>) -> (String, Stored) {
    let stored: Stored = Arc::new(Mutex::new(initial));
    let app = Router::new()
        .route("/api/athletes", get(list_athletes).post(add_athlete))
        .route("/api/athletes/all", delete(remove_all))
        .with_state(stored.clone());
    (serve(app).await, stored)
}

/// Serve a server that only lists athletes; every write is a 404.
pub async fn spawn_read_only(initial: Vec<Value>) -> String {
    let stored: Stored = Arc::new(Mutex::new(initial));
    let app = Router::new()
        .route("/api/athletes", get(list_athletes))
        .with_state(stored);
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

async fn list_athletes(State(stored): State<Stored>) -> Json<Vec<Value>> {
    let athletes = stored.lock().unwrap().clone();
    Json(athletes)
}

async fn add_athlete(State(stored): State<Stored>, Json(athlete): Json<Value>) -> Json<Value> {
    stored.lock().unwrap().push(athlete.clone());
    Json(athlete)
}

async fn remove_all(State(stored): State<Stored>) -> Json<Value> {
    stored.lock().unwrap().clear();
    Json(json!({ "message": "All athletes removed successfully" }))
}
