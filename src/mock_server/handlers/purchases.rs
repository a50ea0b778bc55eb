//! Purchase endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::{MockState, RecordedRequest};
use crate::{Fault, FaultError, Purchase};

/// Query parameters accepted on every entity endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct EntityQuery {
    pub minorversion: Option<String>,
}

/// POST /v3/company/{realm_id}/purchase
pub async fn create_purchase(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(realm_id): Path<String>,
    Query(query): Query<EntityQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    state.requests.push(RecordedRequest {
        method: "POST".to_string(),
        path: format!("/v3/company/{realm_id}/purchase"),
        minor_version: query.minorversion,
    });

    if let Some(rejection) = authorize(&state, &headers, &realm_id) {
        return rejection;
    }

    let purchase: Purchase = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            return fault_response(
                StatusCode::BAD_REQUEST,
                validation_fault("2010", "Request has invalid or unsupported property", &e.to_string()),
            )
        }
    };

    match state.create_purchase(purchase) {
        Ok(created) => envelope(created),
        Err(fault) => fault_response(StatusCode::BAD_REQUEST, fault),
    }
}

/// GET /v3/company/{realm_id}/purchase/{id}
pub async fn get_purchase(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((realm_id, id)): Path<(String, String)>,
    Query(query): Query<EntityQuery>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    state.requests.push(RecordedRequest {
        method: "GET".to_string(),
        path: format!("/v3/company/{realm_id}/purchase/{id}"),
        minor_version: query.minorversion,
    });

    if let Some(rejection) = authorize(&state, &headers, &realm_id) {
        return rejection;
    }

    match state.get_purchase(&id) {
        Some(purchase) => envelope(purchase.clone()),
        None => fault_response(
            StatusCode::BAD_REQUEST,
            validation_fault(
                "610",
                "Object Not Found",
                &format!("Object Not Found : Purchase {id} does not exist"),
            ),
        ),
    }
}

/// Check the bearer token and realm the way the API gateway does.
fn authorize(state: &MockState, headers: &HeaderMap, realm_id: &str) -> Option<Response> {
    if let Some(required) = &state.required_token {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if presented != Some(required.as_str()) {
            // The gateway answers with lowercase keys.
            let body = serde_json::json!({
                "fault": {
                    "error": [{
                        "message": "message=AuthenticationFailed; errorCode=003200; statusCode=401",
                        "detail": "Token invalid",
                        "code": "3200"
                    }],
                    "type": "SERVICE"
                }
            });
            return Some((StatusCode::UNAUTHORIZED, Json(body)).into_response());
        }
    }

    if !state.accepts_realm(realm_id) {
        let fault = Fault {
            kind: Some("AUTHORIZATION".to_string()),
            errors: vec![FaultError {
                message: Some(
                    "message=ApplicationAuthorizationFailed; errorCode=003100; statusCode=403"
                        .to_string(),
                ),
                code: Some("3100".to_string()),
                ..Default::default()
            }],
        };
        return Some(fault_response(StatusCode::FORBIDDEN, fault));
    }

    None
}

fn validation_fault(code: &str, message: &str, detail: &str) -> Fault {
    Fault {
        kind: Some("ValidationFault".to_string()),
        errors: vec![FaultError {
            message: Some(message.to_string()),
            detail: Some(detail.to_string()),
            code: Some(code.to_string()),
            element: None,
        }],
    }
}

fn envelope(purchase: Purchase) -> Response {
    let body = serde_json::json!({
        "Purchase": purchase,
        "time": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body)).into_response()
}

fn fault_response(status: StatusCode, fault: Fault) -> Response {
    let body = serde_json::json!({
        "Fault": fault,
        "time": Utc::now().to_rfc3339(),
    });
    (status, Json(body)).into_response()
}
