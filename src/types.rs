use serde::{Deserialize, Serialize};

/// Payload sent to POST /status
#[derive(Debug, Clone, Serialize)]
pub struct NewStatusCheck {
    pub client_name: String,
}

/// Shape of a status check record as observed over HTTP. The backend owns
/// the canonical shape; we only read these three fields back.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckRecord {
    pub id: String,
    pub client_name: String,
    pub timestamp: String,
}

/// Recorded result of one check, collected in execution order
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
}

impl CheckOutcome {
    pub fn new(name: &'static str, passed: bool) -> Self {
        Self { name, passed }
    }
}
