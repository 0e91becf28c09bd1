use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::game_setup::Table;
use crate::test_app;

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let table = Table::scripted(2);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/rooms/2/play")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"player_id": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("unexpected end of input"),
    )
    .await;
}

#[actix_web::test]
async fn missing_field_is_bad_request() {
    let table = Table::scripted(2);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/rooms/2/play")
        .set_payload(format!(r#"{{"player_id": "{}", "cards": ["3D"]}}"#, table.players[0]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

#[actix_web::test]
async fn oversized_body_respects_configured_limit() {
    let mut table = Table::scripted(2);
    table.state.config.max_json_payload_size = 32;
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/rooms/2/announce")
        .set_payload(format!(r#"{{"message": "{}"}}"#, "x".repeat(64)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("exceeds 32 bytes"),
    )
    .await;
}
