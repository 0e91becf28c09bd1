use actix_web::test;
use backend::config::ServerConfig;
use backend::state::app_state::AppState;
use serde_json::Value;

use crate::support::game_setup::Table;
use crate::test_app;

#[actix_web::test]
async fn health_reports_ok_with_counts() {
    let app = test_app!(AppState::new(ServerConfig::default()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rooms"], 0);
    assert_eq!(body["connections"], 0);
}

#[actix_web::test]
async fn health_counts_open_rooms() {
    let table = Table::scripted(11);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rooms"], 1);
}
