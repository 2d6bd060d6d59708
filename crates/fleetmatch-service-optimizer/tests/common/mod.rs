#![allow(dead_code)]

use axum_test::TestServer;
use fleetmatch_lib::Roster;
use fleetmatch_service_optimizer::build_router;
use fleetmatch_service_shared::test_utils::{test_state, valid_trip};
use fleetmatch_service_shared::{AppState, MatchRequest};
use serde_json::Value;

pub fn server() -> TestServer {
    TestServer::new(build_router(test_state(), "/metrics")).expect("test server starts")
}

pub fn server_with_roster(roster: Roster) -> TestServer {
    TestServer::new(build_router(AppState::from_roster(roster), "/metrics"))
        .expect("test server starts")
}

pub fn valid_body() -> Value {
    serde_json::to_value(MatchRequest::new(valid_trip())).expect("serializable request")
}
