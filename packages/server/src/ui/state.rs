//! Shared application state.

use std::{collections::HashMap, sync::Arc};

use plaza_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::Plaza,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryPlazaRepository},
    usecase::{
        ConnectPlayerUseCase, DisconnectPlayerUseCase, GetPlazaStateUseCase, ManageArtUseCase,
        ManageHouseUseCase, RelayUseCase, SendChatUseCase, SolveMathUseCase, UpdatePlayerUseCase,
    },
};

/// Use cases reachable from the handlers
pub struct AppState {
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub update_player_usecase: Arc<UpdatePlayerUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub solve_math_usecase: Arc<SolveMathUseCase>,
    pub manage_house_usecase: Arc<ManageHouseUseCase>,
    pub manage_art_usecase: Arc<ManageArtUseCase>,
    pub relay_usecase: Arc<RelayUseCase>,
    pub get_plaza_state_usecase: Arc<GetPlazaStateUseCase>,
}

impl AppState {
    /// Wire an in-memory plaza and the WebSocket pusher into every use case.
    pub fn in_memory(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        // 1. Repository
        let plaza = Arc::new(Mutex::new(Plaza::new(config.limits())));
        let repository = Arc::new(InMemoryPlazaRepository::new(plaza));

        // 2. MessagePusher
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));

        // 3. UseCases
        Self {
            connect_player_usecase: Arc::new(ConnectPlayerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_player_usecase: Arc::new(DisconnectPlayerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            update_player_usecase: Arc::new(UpdatePlayerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            send_chat_usecase: Arc::new(SendChatUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            solve_math_usecase: Arc::new(SolveMathUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            manage_house_usecase: Arc::new(ManageHouseUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            manage_art_usecase: Arc::new(ManageArtUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
                config.max_art_bytes,
            )),
            relay_usecase: Arc::new(RelayUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            get_plaza_state_usecase: Arc::new(GetPlazaStateUseCase::new(repository, clock)),
        }
    }
}
