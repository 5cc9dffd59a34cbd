//! UseCase: shared gallery
//!
//! Publishing appends to a bounded gallery (oldest evicted first) and is
//! announced incrementally with `new-art`. Deleting resends the whole
//! gallery with `load-art`. Any session may delete any artwork.

use std::sync::Arc;

use plaza_shared::time::Clock;

use crate::{
    domain::{
        ArtId, ArtIdFactory, ArtImage, Artwork, Audience, DisplayName, HouseId, MessagePusher,
        PlazaRepository, SessionId, Timestamp, Vec3,
    },
    infrastructure::dto::websocket::{PublishArtPayload, ServerEvent},
};

use super::{
    broadcast::{fan_out, publishing},
    error::IntentError,
};

pub struct ManageArtUseCase {
    repository: Arc<dyn PlazaRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    max_art_bytes: usize,
}

impl ManageArtUseCase {
    pub fn new(
        repository: Arc<dyn PlazaRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        max_art_bytes: usize,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            max_art_bytes,
        }
    }

    pub async fn publish(
        &self,
        publisher: &SessionId,
        payload: PublishArtPayload,
    ) -> Result<Artwork, IntentError> {
        let slots = self.repository.limits().await.house_slots;
        let house_id = payload
            .house_id
            .as_deref()
            .map(|id| HouseId::parse(id, slots))
            .transpose()?;
        let id = ArtIdFactory::generate(
            Timestamp::new(self.clock.now_millis()),
            &mut rand::thread_rng(),
        );
        let artwork = Artwork {
            id,
            image: ArtImage::new(payload.image, self.max_art_bytes)?,
            artist: DisplayName::new(payload.artist)?,
            position: Vec3::try_from(payload.position)?,
            rotation: Vec3::try_from(payload.rotation)?,
            house_id,
        };
        let _publishing = publishing(self.repository.as_ref()).await;
        let artwork = self.repository.publish_art(publisher, artwork).await?;

        self.announce(ServerEvent::NewArt(artwork.clone().into()))
            .await?;
        Ok(artwork)
    }

    /// Returns the gallery as it stands after the deletion.
    pub async fn delete(
        &self,
        caller: &SessionId,
        art_id: String,
    ) -> Result<Vec<Artwork>, IntentError> {
        let art_id = ArtId::new(art_id)?;
        let _publishing = publishing(self.repository.as_ref()).await;
        let gallery = self.repository.delete_art(caller, &art_id).await?;

        let event = ServerEvent::LoadArt(gallery.iter().cloned().map(Into::into).collect());
        self.announce(event).await?;
        Ok(gallery)
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
