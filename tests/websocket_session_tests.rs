use std::time::Duration;

use poker::{cli::InputError, websockets::GameSession, BlindConfig, PlayerStore};

mod utils;

use utils::*;

#[tokio::test]
async fn test_socket_game_streams_blinds_and_records_winner() {
    let EngineSetup { engine, store } = engine_with_config(BlindConfig::default());
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), engine).run());

    client.send("5");
    assert!(client.wait_for("Blind is now 100\n").await);

    client.send("Ruth");
    session.await.unwrap().unwrap();

    assert_eq!(store.get_player_score("Ruth").await.unwrap(), 1);
    assert!(client.is_closed());
}

#[tokio::test]
async fn test_socket_game_delivers_later_blinds() {
    let EngineSetup { engine, .. } = engine_with_config(fast_blind_config());
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), engine).run());

    client.send("2");
    assert!(client.wait_for("Blind is now 8000\n").await);

    let blinds: Vec<String> = client
        .received()
        .into_iter()
        .filter(|m| m.starts_with("Blind is now"))
        .collect();
    assert_eq!(blinds.len(), 11);
    assert_eq!(blinds.first().map(String::as_str), Some("Blind is now 100\n"));

    client.send("Chris");
    session.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_bad_player_count_is_answered_and_can_be_retried() {
    let game = GameSpy::new();
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), game.clone()).run());

    client.send("lots");
    assert!(
        client
            .wait_for(&InputError::InvalidPlayerCount.to_string())
            .await
    );
    assert!(!game.start_called());

    client.send("4");
    client.send("Cleo");
    session.await.unwrap().unwrap();

    assert_eq!(game.started_with(), Some(4));
    assert_eq!(game.finished_with().as_deref(), Some("Cleo"));
}

#[tokio::test]
async fn test_blank_winner_is_rejected() {
    let game = GameSpy::new();
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), game.clone()).run());

    client.send("3");
    client.send("   ");
    assert!(client.wait_for(&InputError::InvalidWinner.to_string()).await);
    assert!(!game.finish_called());

    client.send("Chris");
    session.await.unwrap().unwrap();
    assert_eq!(game.finished_with().as_deref(), Some("Chris"));
}

#[tokio::test]
async fn test_failed_finish_is_reported_to_the_client() {
    let game = GameSpy::failing_finish();
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), game.clone()).run());

    client.send("3");
    client.send("Chris");

    let mut reported = false;
    for _ in 0..100 {
        if client
            .received()
            .iter()
            .any(|m| m.starts_with("Failed to record winner"))
        {
            reported = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(reported);
    assert!(!session.is_finished());

    session.abort();
}

#[tokio::test]
async fn test_disconnect_abandons_the_game() {
    let game = GameSpy::new();
    let (socket, client) = FakeSocket::pair();
    let session = tokio::spawn(GameSession::new(Box::new(socket), game.clone()).run());

    client.send("3");
    drop(client);
    session.await.unwrap().unwrap();

    assert!(game.start_called());
    assert!(!game.finish_called());
    assert!(game.abandoned());
}
