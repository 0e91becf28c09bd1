// Seating over websockets, the first deal, and ending the game on disconnect

use std::sync::Arc;
use std::time::Duration;

use backend::config::ServerConfig;
use backend::domain::{Phase, ShuffleDealer};
use backend::state::app_state::AppState;

use crate::support::websocket::{room_url, start_test_server, wait_until};
use crate::support::websocket_client::WebSocketClient;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

fn seeded_state() -> AppState {
    AppState::with_dealer(ServerConfig::default(), Arc::new(ShuffleDealer::seeded(11)))
}

/// Connect four clients one after another, checking each welcome.
async fn seat_four(url: &str) -> Result<Vec<WebSocketClient>, Box<dyn std::error::Error>> {
    let mut clients = Vec::new();
    for seat in 0..4 {
        let mut client = WebSocketClient::connect_retry(url, CONNECT_TIMEOUT).await?;
        let welcome = client.expect("welcome").await?;
        assert_eq!(welcome["seat"], seat);
        assert_eq!(welcome["players"], seat + 1);
        clients.push(client);
    }
    Ok(clients)
}

#[tokio::test]
async fn fourth_connection_deals_round_one_to_everyone() -> Result<(), Box<dyn std::error::Error>> {
    let state = seeded_state();
    let (server_handle, addr, server_join) = start_test_server(state.clone()).await?;
    let url = room_url(addr, 71);

    let mut clients = seat_four(&url).await?;

    let mut sizes = Vec::new();
    for client in &mut clients {
        let started = client.expect("round_started").await?;
        assert_eq!(started["round_no"], 1);
        assert_eq!(started["exchange_open"], false);
        assert_eq!(started["turn_order"].as_array().map(Vec::len), Some(4));
        sizes.push(started["hand"].as_array().map_or(0, Vec::len));
    }
    assert_eq!(sizes, vec![14, 13, 14, 13]);

    let snap = state.flow.snapshot(71, None)?;
    assert_eq!(snap.phase, Phase::InRound);
    assert_eq!(snap.players.len(), 4);
    assert_eq!(state.hub.len(), 4);

    for client in &mut clients {
        client.close().await?;
    }
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn fifth_connection_is_refused_with_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = seeded_state();
    let (server_handle, addr, server_join) = start_test_server(state.clone()).await?;
    let url = room_url(addr, 72);

    let _clients = seat_four(&url).await?;

    let mut late = WebSocketClient::connect_retry(&url, CONNECT_TIMEOUT).await?;
    let err = late.expect("error").await?;
    assert_eq!(err["code"], "GAME_IN_PROGRESS");
    assert!(late.recv_json().await?.is_none(), "server closes the refused socket");

    assert_eq!(state.flow.snapshot(72, None)?.players.len(), 4);

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn disconnect_ends_the_game_for_the_rest() -> Result<(), Box<dyn std::error::Error>> {
    let state = seeded_state();
    let (server_handle, addr, server_join) = start_test_server(state.clone()).await?;
    let url = room_url(addr, 73);

    let mut clients = seat_four(&url).await?;
    for client in &mut clients {
        client.expect("round_started").await?;
    }

    let mut leaver = clients.remove(1);
    leaver.close().await?;

    for client in &mut clients {
        let ended = client.expect("game_ended").await?;
        assert_eq!(ended["reason"], "player_disconnected");
        assert!(client.recv_json().await?.is_none(), "socket closes after game_ended");
    }

    let sessions = state.sessions.clone();
    wait_until("room removal", SETTLE_TIMEOUT, || {
        let sessions = sessions.clone();
        async move { sessions.is_empty() }
    })
    .await?;
    let hub = state.hub.clone();
    wait_until("push channels to drain", SETTLE_TIMEOUT, || {
        let hub = hub.clone();
        async move { hub.is_empty() }
    })
    .await?;

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
