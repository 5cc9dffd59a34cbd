//! UseCase: house ownership
//!
//! Slots are `house-1` through `house-N`. A slot can be claimed only while
//! it is unowned; upgrades and recoloring are limited to the owner. Every
//! accepted change is echoed to all sessions.

use std::sync::Arc;

use crate::{
    domain::{Audience, Color, House, HouseId, MessagePusher, PlazaRepository, SessionId},
    infrastructure::dto::websocket::{BuyHousePayload, HouseColorPayload, HouseDto, ServerEvent},
};

use super::{
    broadcast::{fan_out, publishing},
    error::IntentError,
};

pub struct ManageHouseUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ManageHouseUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Claim an unowned slot. Without an explicit color the buyer's avatar
    /// color is used.
    pub async fn buy(
        &self,
        buyer: &SessionId,
        payload: BuyHousePayload,
    ) -> Result<House, IntentError> {
        let house_id = self.parse_house_id(&payload.house_id).await?;
        let color = payload.color.map(Color::new).transpose()?;
        let _publishing = publishing(self.repository.as_ref()).await;
        let house = self.repository.buy_house(buyer, house_id, color).await?;

        self.announce(ServerEvent::HouseBought(house.clone().into()))
            .await?;
        Ok(house)
    }

    /// Raise the rank by one, up to the maximum rank.
    pub async fn upgrade(
        &self,
        caller: &SessionId,
        house_id: &str,
    ) -> Result<House, IntentError> {
        let house_id = self.parse_house_id(house_id).await?;
        let _publishing = publishing(self.repository.as_ref()).await;
        let house = self.repository.upgrade_house(caller, &house_id).await?;

        self.announce(ServerEvent::HouseUpgraded(house.clone().into()))
            .await?;
        Ok(house)
    }

    pub async fn change_color(
        &self,
        caller: &SessionId,
        payload: HouseColorPayload,
    ) -> Result<House, IntentError> {
        let house_id = self.parse_house_id(&payload.house_id).await?;
        let color = Color::new(payload.color)?;
        let _publishing = publishing(self.repository.as_ref()).await;
        let house = self
            .repository
            .change_house_color(caller, &house_id, color)
            .await?;

        self.announce(ServerEvent::HouseColorChanged(HouseDto::from(house.clone())))
            .await?;
        Ok(house)
    }

    async fn parse_house_id(&self, value: &str) -> Result<HouseId, IntentError> {
        let slots = self.repository.limits().await.house_slots;
        Ok(HouseId::parse(value, slots)?)
    }

    async fn announce(&self, event: ServerEvent) -> Result<(), IntentError> {
        fan_out(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            Audience::All,
            &event,
        )
        .await?;
        Ok(())
    }
}
