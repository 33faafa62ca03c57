//! HTTP request handlers.
//!
//! # Responsibilities
//! - Decode the flash-verify request body and answer checksum lookups
//! - Serve the firmware, device family, and project lists
//! - Liveness and status endpoints
//!
//! # Design Decisions
//! - The verify endpoint never rejects a request: malformed bodies and
//!   absent or non-normalizable ids all produce `{"status":"failed"}`
//!   with HTTP 200, matching what flashing clients expect
//! - `message` is serialized only on success, so a failed lookup is
//!   exactly `{"status":"failed"}`

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::record::{DeviceFamily, Firmware, FirmwareId, Project};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /api/flash_verify/`.
///
/// Flashing clients also report which flasher they are and its version;
/// both are logged for diagnostics and never validated.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub firmware_id: Option<FirmwareId>,
    #[serde(default)]
    pub flasher: Option<String>,
    #[serde(default)]
    pub flasher_version: Option<String>,
}

/// Response of `POST /api/flash_verify/`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyResponse {
    fn success(checksum: String) -> Self {
        Self {
            status: "success",
            message: Some(checksum),
        }
    }

    fn failed() -> Self {
        Self {
            status: "failed",
            message: None,
        }
    }
}

/// Checksum lookup endpoint.
///
/// Takes the raw body so a malformed payload degrades to a failed lookup
/// instead of a 4xx rejection.
pub async fn flash_verify(State(state): State<AppState>, body: Bytes) -> Json<VerifyResponse> {
    let start_time = Instant::now();
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let request: Option<VerifyRequest> = serde_json::from_slice(&body).ok();

    if let Some(ref req) = request {
        tracing::debug!(
            firmware_id = ?req.firmware_id,
            flasher = req.flasher.as_deref().unwrap_or("unknown"),
            flasher_version = req.flasher_version.as_deref().unwrap_or("unknown"),
            "Flash verify request"
        );
    } else {
        tracing::debug!(body_len = body.len(), "Flash verify request body did not decode");
    }

    let catalog = state.catalog.load();
    let checksum = request
        .as_ref()
        .and_then(|req| req.firmware_id.as_ref())
        .and_then(|id| catalog.lookup_checksum(id))
        .map(str::to_string);

    let response = match checksum {
        Some(checksum) => {
            metrics::record_lookup("hit");
            VerifyResponse::success(checksum)
        }
        None => {
            metrics::record_lookup("miss");
            VerifyResponse::failed()
        }
    };

    metrics::record_request("POST", 200, "flash_verify", start_time);
    Json(response)
}

/// Full firmware list, in catalog order.
pub async fn list_firmware(State(state): State<AppState>) -> Json<Vec<Firmware>> {
    let start_time = Instant::now();
    let catalog = state.catalog.load();
    let firmware = catalog.firmware().to_vec();
    metrics::record_request("GET", 200, "firmware_list", start_time);
    Json(firmware)
}

/// Device family list, in catalog order.
pub async fn list_families(State(state): State<AppState>) -> Json<Vec<DeviceFamily>> {
    let start_time = Instant::now();
    let catalog = state.catalog.load();
    let families = catalog.families().to_vec();
    metrics::record_request("GET", 200, "firmware_family_list", start_time);
    Json(families)
}

/// Project list, in catalog order.
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let start_time = Instant::now();
    let catalog = state.catalog.load();
    let projects = catalog.projects().to_vec();
    metrics::record_request("GET", 200, "project_list", start_time);
    Json(projects)
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub requests_served: usize,
}

/// Service status endpoint.
pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        requests_served: state.request_count.load(Ordering::Relaxed),
    })
}

/// Liveness endpoint with catalog counts.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let catalog = state.catalog.load();
    Json(serde_json::json!({
        "status": "ok",
        "firmware_records": catalog.firmware_count(),
        "device_families": catalog.family_count(),
        "projects": catalog.project_count(),
    }))
}
