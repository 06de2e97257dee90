use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::session::GameSession;
use crate::shared::AppState;

/// WebSocket endpoint that plays one game per connection
/// GET /ws
pub async fn game_websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| async move {
        let game = app_state.new_game();
        let game_id = game.id();
        info!(game_id = %game_id, "Game connection opened");

        match GameSession::new(Box::new(socket), game).run().await {
            Ok(()) => info!(game_id = %game_id, "Game connection closed"),
            Err(e) => warn!(game_id = %game_id, error = %e, "Game connection failed"),
        }
    })
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/ws", get(game_websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
