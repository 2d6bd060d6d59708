//! Response wrapper for successful HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful payload plus content type, mirroring `ProblemDetails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetmatch_lib::ServiceInfo;

    #[test]
    fn payload_fields_are_flattened() {
        let response = ServiceResponse::new(ServiceInfo::new("0.1.0", "/api/transport-optimizer", 4));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["demoDrivers"], 4);
        assert_eq!(json["content_type"], "application/json");
    }

    #[test]
    fn into_response_is_ok() {
        let response = ServiceResponse::new(serde_json::json!({"success": true})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
