//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: one drains the outbound channel into the
//! socket, the other parses inbound frames and dispatches them one at a time,
//! which keeps every client's intents in arrival order.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{
        CharacterType, Color, Movement, SessionChange, SessionId, SessionProfile, World, XoxMove,
    },
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::IntentError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Ends when the channel closes or the socket refuses a write.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::unbounded_channel();

    // Allocate the session, queue its initial state and register the channel
    let session_id = match state.connect_player_usecase.execute(tx).await {
        Ok(session) => session.id,
        Err(e) => {
            tracing::warn!("Failed to connect session: {}", e);
            return;
        }
    };
    tracing::info!("Session '{}' connected", session_id);

    let (sender, mut receiver) = socket.split();
    let state_clone = state.clone();
    let id_clone = session_id.clone();

    // Spawn a task to receive intents from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Dropping malformed frame from '{}': {}", id_clone, e);
                            continue;
                        }
                    };
                    let name = event.name();
                    tracing::trace!("Received '{}' from '{}'", name, id_clone);

                    match dispatch(&state_clone, &id_clone, event).await {
                        Ok(()) => {}
                        Err(IntentError::Rejected(e)) => {
                            tracing::debug!("Rejected '{}' from '{}': {}", name, id_clone, e);
                        }
                        Err(IntentError::BroadcastFailed(e)) => {
                            tracing::warn!(
                                "Failed to broadcast '{}' from '{}': {}",
                                name,
                                id_clone,
                                e
                            );
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", id_clone);
                    break;
                }
                // ping/pong is answered by axum; binary frames are ignored
                _ => {}
            }
        }
    });

    // Spawn a task to push facts from the relay to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_player_usecase.execute(&session_id).await {
        Ok(departure) => {
            tracing::info!(
                "Session '{}' disconnected, released {} house(s)",
                session_id,
                departure.released_houses.len()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect '{}': {}", session_id, e);
        }
    }
}

/// Route one client intent to its use case.
async fn dispatch(
    state: &AppState,
    id: &SessionId,
    event: ClientEvent,
) -> Result<(), IntentError> {
    match event {
        ClientEvent::InitPlayer(payload) => {
            let profile = SessionProfile::try_from(payload)?;
            state.update_player_usecase.init(id, profile).await?;
        }
        ClientEvent::SwitchWorld(world) => {
            let change = SessionChange::World(World::try_from(world.as_str())?);
            state.update_player_usecase.change(id, change).await?;
        }
        ClientEvent::Move(payload) => {
            let movement = Movement::try_from(payload)?;
            state.update_player_usecase.move_player(id, movement).await?;
        }
        ClientEvent::ChangeColor(color) => {
            let change = SessionChange::Color(Color::new(color)?);
            state.update_player_usecase.change(id, change).await?;
        }
        ClientEvent::ChangeVehicle(is_driving) => {
            let change = SessionChange::Driving(is_driving);
            state.update_player_usecase.change(id, change).await?;
        }
        ClientEvent::UpdateCharacterType(kind) => {
            let change = SessionChange::CharacterType(CharacterType::try_from(kind.as_str())?);
            state.update_player_usecase.change(id, change).await?;
        }
        ClientEvent::Chat(text) => {
            state.send_chat_usecase.execute(id, text).await?;
        }
        ClientEvent::MathSolved(points) => {
            state.solve_math_usecase.execute(id, points).await?;
        }
        ClientEvent::BuyHouse(payload) => {
            state.manage_house_usecase.buy(id, payload).await?;
        }
        ClientEvent::UpgradeHouse(house_id) => {
            state.manage_house_usecase.upgrade(id, &house_id).await?;
        }
        ClientEvent::ChangeHouseColor(payload) => {
            state.manage_house_usecase.change_color(id, payload).await?;
        }
        ClientEvent::PublishArt(payload) => {
            state.manage_art_usecase.publish(id, payload).await?;
        }
        ClientEvent::DeleteArt(art_id) => {
            state.manage_art_usecase.delete(id, art_id).await?;
        }
        ClientEvent::XoxMove(payload) => {
            let movement = XoxMove::try_from(payload)?;
            state.relay_usecase.xox_move(id, movement).await?;
        }
        ClientEvent::VoiceJoin => {
            state.relay_usecase.voice_join(id).await?;
        }
        ClientEvent::VoiceSignal(payload) => {
            state
                .relay_usecase
                .voice_signal(id, payload.target_id, payload.signal)
                .await?;
        }
    }
    Ok(())
}
