//! The `Plaza` aggregate: the authoritative in-memory state of the relay.
//!
//! All shared registries live here (sessions, houses, artworks, chat history)
//! and every mutation goes through a method that enforces the invariants:
//!
//! - at most one owner per house, rank in `1..=30`, only the owner may
//!   upgrade or recolor, houses are released when the owner leaves
//! - the artwork gallery and chat history are ring buffers (oldest evicted)
//! - events referencing an unknown session are rejected

use std::collections::{BTreeMap, HashMap, VecDeque};

use super::{
    entity::{
        Artwork, ChatRecord, House, LeaderboardEntry, Movement, ScoreAward, Session,
        SessionChange, SessionProfile,
    },
    error::DomainError,
    value_object::{ArtId, Color, HouseId, HouseRank, MessageContent, Points, SessionId, Timestamp},
};

pub const DEFAULT_HOUSE_SLOTS: u32 = 30;
pub const DEFAULT_ART_CAPACITY: usize = 50;
pub const DEFAULT_CHAT_CAPACITY: usize = 50;
pub const LEADERBOARD_SIZE: usize = 10;

/// Capacities of the bounded registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlazaLimits {
    pub house_slots: u32,
    pub art_capacity: usize,
    pub chat_capacity: usize,
}

impl Default for PlazaLimits {
    fn default() -> Self {
        Self {
            house_slots: DEFAULT_HOUSE_SLOTS,
            art_capacity: DEFAULT_ART_CAPACITY,
            chat_capacity: DEFAULT_CHAT_CAPACITY,
        }
    }
}

/// What a departing session left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub session: Session,
    pub released_houses: Vec<House>,
}

#[derive(Debug, Clone, Default)]
pub struct Plaza {
    sessions: HashMap<SessionId, Session>,
    houses: BTreeMap<HouseId, House>,
    artworks: VecDeque<Artwork>,
    chat_history: VecDeque<ChatRecord>,
    limits: PlazaLimits,
}

impl Plaza {
    pub fn new(limits: PlazaLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> PlazaLimits {
        self.limits
    }

    // ========================================
    // Sessions
    // ========================================

    pub fn add_session(&mut self, session: Session) {
        self.sessions.insert(session.id.clone(), session);
    }

    /// Remove a session and release every house it owned.
    pub fn remove_session(&mut self, id: &SessionId) -> Option<Departure> {
        let session = self.sessions.remove(id)?;
        let owned: Vec<HouseId> = self
            .houses
            .values()
            .filter(|house| &house.owner_id == id)
            .map(|house| house.id.clone())
            .collect();
        let released_houses = owned
            .iter()
            .filter_map(|house_id| self.houses.remove(house_id))
            .collect();
        Some(Departure {
            session,
            released_houses,
        })
    }

    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    fn session_mut(&mut self, id: &SessionId) -> Result<&mut Session, DomainError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| DomainError::SessionNotFound(id.to_string()))
    }

    /// All sessions, sorted by id for a stable roster order.
    pub fn sessions(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        sessions
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().cloned().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn init_session(
        &mut self,
        id: &SessionId,
        profile: SessionProfile,
    ) -> Result<Session, DomainError> {
        let session = self.session_mut(id)?;
        session.apply_profile(profile);
        Ok(session.clone())
    }

    pub fn move_session(&mut self, id: &SessionId, movement: Movement) -> Result<(), DomainError> {
        let session = self.session_mut(id)?;
        session.position = movement.position;
        session.rotation = movement.rotation;
        session.world = movement.world;
        Ok(())
    }

    pub fn apply_change(
        &mut self,
        id: &SessionId,
        change: &SessionChange,
    ) -> Result<(), DomainError> {
        let session = self.session_mut(id)?;
        match change {
            SessionChange::World(world) => session.world = *world,
            SessionChange::Color(color) => session.color = color.clone(),
            SessionChange::Driving(driving) => session.is_driving = *driving,
            SessionChange::CharacterType(kind) => session.character_type = *kind,
        }
        Ok(())
    }

    // ========================================
    // Score
    // ========================================

    pub fn add_score(
        &mut self,
        id: &SessionId,
        points: Points,
    ) -> Result<ScoreAward, DomainError> {
        let session = self.session_mut(id)?;
        session.score = session.score.saturating_add(points.value());
        Ok(ScoreAward {
            id: session.id.clone(),
            name: session.name.clone(),
            points: points.value(),
            total: session.score,
        })
    }

    /// Top sessions by score. Only positive scores are listed.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .sessions
            .values()
            .filter(|session| session.score > 0)
            .map(|session| LeaderboardEntry {
                id: session.id.clone(),
                name: session.name.clone(),
                score: session.score,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        entries.truncate(LEADERBOARD_SIZE);
        entries
    }

    // ========================================
    // Chat
    // ========================================

    pub fn post_chat(
        &mut self,
        from: &SessionId,
        content: MessageContent,
        time: Timestamp,
    ) -> Result<ChatRecord, DomainError> {
        let name = self
            .session(from)
            .map(|session| session.name.clone())
            .ok_or_else(|| DomainError::SessionNotFound(from.to_string()))?;
        let record = ChatRecord {
            from: from.clone(),
            content,
            name,
            time,
        };
        push_bounded(&mut self.chat_history, record.clone(), self.limits.chat_capacity);
        Ok(record)
    }

    /// Chat history, oldest first.
    pub fn chat_history(&self) -> Vec<ChatRecord> {
        self.chat_history.iter().cloned().collect()
    }

    pub fn chat_count(&self) -> usize {
        self.chat_history.len()
    }

    // ========================================
    // Houses
    // ========================================

    pub fn parse_house_id(&self, value: &str) -> Result<HouseId, DomainError> {
        HouseId::parse(value, self.limits.house_slots)
    }

    /// Claim an unowned house. `color` defaults to the buyer's avatar color.
    pub fn buy_house(
        &mut self,
        buyer: &SessionId,
        house_id: HouseId,
        color: Option<Color>,
    ) -> Result<House, DomainError> {
        if self.houses.contains_key(&house_id) {
            return Err(DomainError::HouseAlreadyOwned(house_id.into_string()));
        }
        let session = self
            .session(buyer)
            .ok_or_else(|| DomainError::SessionNotFound(buyer.to_string()))?;
        let house = House {
            id: house_id.clone(),
            owner_id: buyer.clone(),
            owner_name: session.name.clone(),
            color: color.unwrap_or_else(|| session.color.clone()),
            rank: HouseRank::MIN,
        };
        self.houses.insert(house_id, house.clone());
        Ok(house)
    }

    pub fn upgrade_house(
        &mut self,
        caller: &SessionId,
        house_id: &HouseId,
    ) -> Result<House, DomainError> {
        let house = self.owned_house_mut(caller, house_id)?;
        house.rank = house
            .rank
            .next()
            .ok_or_else(|| DomainError::HouseMaxRank(house_id.as_str().to_string()))?;
        Ok(house.clone())
    }

    pub fn change_house_color(
        &mut self,
        caller: &SessionId,
        house_id: &HouseId,
        color: Color,
    ) -> Result<House, DomainError> {
        let house = self.owned_house_mut(caller, house_id)?;
        house.color = color;
        Ok(house.clone())
    }

    fn owned_house_mut(
        &mut self,
        caller: &SessionId,
        house_id: &HouseId,
    ) -> Result<&mut House, DomainError> {
        let house = self
            .houses
            .get_mut(house_id)
            .ok_or_else(|| DomainError::HouseNotOwned(house_id.as_str().to_string()))?;
        if &house.owner_id != caller {
            return Err(DomainError::NotHouseOwner(house_id.as_str().to_string()));
        }
        Ok(house)
    }

    pub fn house(&self, house_id: &HouseId) -> Option<&House> {
        self.houses.get(house_id)
    }

    /// Owned houses, ordered by id.
    pub fn houses(&self) -> Vec<House> {
        self.houses.values().cloned().collect()
    }

    // ========================================
    // Art
    // ========================================

    /// Append to the gallery, evicting the oldest entry past capacity.
    pub fn publish_art(
        &mut self,
        publisher: &SessionId,
        artwork: Artwork,
    ) -> Result<Artwork, DomainError> {
        if !self.sessions.contains_key(publisher) {
            return Err(DomainError::SessionNotFound(publisher.to_string()));
        }
        push_bounded(&mut self.artworks, artwork.clone(), self.limits.art_capacity);
        Ok(artwork)
    }

    /// Any session may delete any artwork.
    pub fn delete_art(&mut self, caller: &SessionId, art_id: &ArtId) -> Result<(), DomainError> {
        if !self.sessions.contains_key(caller) {
            return Err(DomainError::SessionNotFound(caller.to_string()));
        }
        let index = self
            .artworks
            .iter()
            .position(|artwork| &artwork.id == art_id)
            .ok_or_else(|| DomainError::ArtNotFound(art_id.as_str().to_string()))?;
        self.artworks.remove(index);
        Ok(())
    }

    /// Gallery, oldest first.
    pub fn artworks(&self) -> Vec<Artwork> {
        self.artworks.iter().cloned().collect()
    }

    pub fn artwork_count(&self) -> usize {
        self.artworks.len()
    }
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, item: T, capacity: usize) {
    buffer.push_back(item);
    while buffer.len() > capacity {
        buffer.pop_front();
    }
}
