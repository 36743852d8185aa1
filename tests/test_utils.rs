#![allow(dead_code)] // not every scenario file uses every helper

use backend_smoke::config::AppConfig;
use backend_smoke::report::MemoryReporter;
use backend_smoke::verifier::Verifier;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Canned responses served by the stub backend, one instance per scenario
pub struct StubBehavior {
    pub health_status: u16,
    pub health_body: Value,
    pub create_status: u16,
    /// None means echo a full record back (the healthy-backend behavior)
    pub create_body: Option<Value>,
    pub list_status: u16,
    pub list_body: Value,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            health_status: 200,
            health_body: json!({ "message": "Hello World" }),
            create_status: 200,
            create_body: None,
            list_status: 200,
            list_body: json!([]),
        }
    }
}

pub const STUB_RECORD_ID: &str = "stub-id-1";

#[get("/")]
fn root(stub: &State<StubBehavior>) -> Custom<Json<Value>> {
    Custom(Status::new(stub.health_status), Json(stub.health_body.clone()))
}

#[post("/status", data = "<request>")]
fn create_status(request: Json<Value>, stub: &State<StubBehavior>) -> Custom<Json<Value>> {
    let body = stub.create_body.clone().unwrap_or_else(|| {
        json!({
            "id": STUB_RECORD_ID,
            "client_name": request["client_name"].clone(),
            "timestamp": "2024-01-01T00:00:00Z",
        })
    });
    Custom(Status::new(stub.create_status), Json(body))
}

#[get("/status")]
fn list_status(stub: &State<StubBehavior>) -> Custom<Json<Value>> {
    Custom(Status::new(stub.list_status), Json(stub.list_body.clone()))
}

/// Launch the stub backend on a free local port and return its base URL
/// (including the /api prefix the verifier expects)
pub async fn spawn_stub(stub: StubBehavior) -> String {
    let port = portpicker::pick_unused_port().expect("no free port");
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "127.0.0.1"))
        .merge(("log_level", "off"));

    let rocket = rocket::custom(figment)
        .manage(stub)
        .mount("/api", rocket::routes![root, create_status, list_status]);
    tokio::spawn(rocket.launch());

    wait_until_ready(port).await;
    format!("http://127.0.0.1:{port}/api")
}

async fn wait_until_ready(port: u16) {
    for _ in 0..100 {
        if tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .is_ok()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("stub backend did not come up on port {port}");
}

/// Verifier pointed at `base_url`, with a capturing reporter for assertions
pub fn verifier_for(base_url: &str) -> (Verifier, Arc<MemoryReporter>) {
    let config = AppConfig {
        base_url: base_url.to_string(),
        ..AppConfig::default()
    };
    let reporter = Arc::new(MemoryReporter::default());
    let verifier = Verifier::new(&config, reporter.clone()).expect("valid verifier");
    (verifier, reporter)
}
