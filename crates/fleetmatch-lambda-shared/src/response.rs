//! Response wrapper for successful Lambda responses.

use serde::{Deserialize, Serialize};

/// Successful payload plus content type, mirroring `ProblemDetails`.
///
/// ```
/// use fleetmatch_lambda_shared::LambdaResponse;
/// use fleetmatch_lib::ServiceInfo;
///
/// let response = LambdaResponse::new(ServiceInfo::new("0.1.0", "/api/transport-optimizer", 4));
/// assert_eq!(response.content_type, "application/json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> LambdaResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for LambdaResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed_now, fixture_roster, standard_trip};
    use fleetmatch_lib::{match_trip, OptimizationResponse};

    #[test]
    fn optimization_fields_are_flattened() {
        let trip = standard_trip();
        let set = match_trip(fixture_roster().drivers(), &trip, fixed_now());
        let echo = serde_json::to_value(&trip).unwrap();
        let response = LambdaResponse::new(OptimizationResponse::from_match_set(echo, set));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["content_type"], "application/json");
        assert_eq!(json["bestMatch"]["driverId"], "driver-1");
        assert!(json.get("data").is_none());
    }
}
