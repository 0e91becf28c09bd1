use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;

use crate::support::game_setup::Table;
use crate::test_app;

#[actix_web::test]
async fn unknown_room_is_problem_details_404() {
    let table = Table::scripted(1);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/rooms/999/play")
        .set_json(json!({ "player_id": table.players[0], "cards": ["3D"], "hand_size": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "ROOM_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("999"),
    )
    .await;
    assert_eq!(problem.title, "Room Not Found");
    assert!(problem.type_.ends_with("ROOM_NOT_FOUND"));
}

#[actix_web::test]
async fn inbound_trace_id_is_echoed_in_problem_details() {
    let table = Table::scripted(1);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::post()
        .uri("/api/rooms/1/play")
        .insert_header(("x-trace-id", "table-1-check"))
        .set_json(json!({ "player_id": table.players[1], "cards": ["4C"], "hand_size": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "OUT_OF_TURN",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
    assert_eq!(problem.trace_id, "table-1-check");
}

#[actix_web::test]
async fn malformed_inbound_trace_id_is_replaced() {
    let table = Table::scripted(1);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-trace-id", "not a valid id!"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let header = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(!header.is_empty());
    assert_ne!(header, "not a valid id!");
}

#[actix_web::test]
async fn bad_room_path_is_bad_request() {
    let table = Table::scripted(1);
    let app = test_app!(table.state.clone());

    let req = test::TestRequest::get()
        .uri("/api/rooms/lobby/state")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid path"),
    )
    .await;
}
