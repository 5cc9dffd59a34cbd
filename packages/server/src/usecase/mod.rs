//! UseCase layer.
//!
//! One struct per group of intents. Each use case performs a single atomic
//! repository operation and then fans the resulting fact out to the audience
//! the protocol prescribes (everyone, everyone but the sender, or one target).

mod broadcast;
pub mod connect_player;
pub mod disconnect_player;
pub mod error;
pub mod get_plaza_state;
pub mod manage_art;
pub mod manage_house;
pub mod relay;
pub mod send_chat;
pub mod solve_math;
pub mod update_player;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_player::ConnectPlayerUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::{BroadcastError, ConnectError, DisconnectError, IntentError};
pub use get_plaza_state::{GetPlazaStateUseCase, PlazaOverview};
pub use manage_art::ManageArtUseCase;
pub use manage_house::ManageHouseUseCase;
pub use relay::RelayUseCase;
pub use send_chat::SendChatUseCase;
pub use solve_math::SolveMathUseCase;
pub use update_player::UpdatePlayerUseCase;
