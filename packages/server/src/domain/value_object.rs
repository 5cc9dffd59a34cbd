//! Value objects.
//!
//! Every value that arrives from a client is converted into one of these types
//! before it reaches the `Plaza` aggregate, so invalid input is rejected at the
//! boundary instead of deep inside a handler.

use std::fmt;

use super::error::DomainError;

const MAX_DISPLAY_NAME_CHARS: usize = 24;
const MAX_COLOR_CHARS: usize = 32;
const MAX_MESSAGE_CHARS: usize = 200;
const MAX_BOARD_ID_CHARS: usize = 64;
const MAX_POINTS_PER_EVENT: u32 = 1000;
const BOARD_CELLS: u8 = 9;
const HOUSE_ID_PREFIX: &str = "house-";
const ART_IMAGE_PREFIX: &str = "data:image/";
const DEFAULT_DISPLAY_NAME: &str = "Guest";
const DEFAULT_COLOR: &str = "#4f9dff";

/// Trim `value` and check that it has between 1 and `max_chars` characters.
fn bounded_text(value: String, max_chars: usize) -> Option<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > max_chars {
        return None;
    }
    Some(trimmed.to_string())
}

// ========================================
// SessionId
// ========================================

/// Transient identity of one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(super) String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidSessionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// DisplayName / Color
// ========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        bounded_text(value, MAX_DISPLAY_NAME_CHARS)
            .map(Self)
            .ok_or(DomainError::InvalidDisplayName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_string())
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque CSS color string; clients interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, DomainError> {
        bounded_text(value, MAX_COLOR_CHARS)
            .map(Self)
            .ok_or(DomainError::InvalidColor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ========================================
// World / CharacterType
// ========================================

/// Named world partition. Only used to filter what clients render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum World {
    #[default]
    Hub,
    Town,
    School,
    Race,
}

impl World {
    pub fn as_str(&self) -> &'static str {
        match self {
            World::Hub => "hub",
            World::Town => "town",
            World::School => "school",
            World::Race => "race",
        }
    }
}

impl TryFrom<&str> for World {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "hub" => Ok(World::Hub),
            "town" => Ok(World::Town),
            "school" => Ok(World::School),
            "race" => Ok(World::Race),
            other => Err(DomainError::UnknownWorld(other.to_string())),
        }
    }
}

/// Avatar archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterType {
    #[default]
    Child,
    Mother,
    Father,
    Baby,
    Grandma,
    Grandpa,
    Cat,
    Dog,
    Vehicle,
}

impl CharacterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterType::Child => "child",
            CharacterType::Mother => "mother",
            CharacterType::Father => "father",
            CharacterType::Baby => "baby",
            CharacterType::Grandma => "grandma",
            CharacterType::Grandpa => "grandpa",
            CharacterType::Cat => "cat",
            CharacterType::Dog => "dog",
            CharacterType::Vehicle => "vehicle",
        }
    }
}

impl TryFrom<&str> for CharacterType {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "child" => Ok(CharacterType::Child),
            "mother" => Ok(CharacterType::Mother),
            "father" => Ok(CharacterType::Father),
            "baby" => Ok(CharacterType::Baby),
            "grandma" => Ok(CharacterType::Grandma),
            "grandpa" => Ok(CharacterType::Grandpa),
            "cat" => Ok(CharacterType::Cat),
            "dog" => Ok(CharacterType::Dog),
            "vehicle" => Ok(CharacterType::Vehicle),
            other => Err(DomainError::UnknownCharacterType(other.to_string())),
        }
    }
}

// ========================================
// Vec3
// ========================================

/// Position or Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, DomainError> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(DomainError::NonFiniteVector);
        }
        Ok(Self { x, y, z })
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl TryFrom<[f64; 3]> for Vec3 {
    type Error = DomainError;

    fn try_from([x, y, z]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

// ========================================
// Timestamp
// ========================================

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

// ========================================
// Chat
// ========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, DomainError> {
        bounded_text(value, MAX_MESSAGE_CHARS)
            .map(Self)
            .ok_or(DomainError::InvalidMessageContent)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ========================================
// Score
// ========================================

/// Points awarded by one solved quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Points(u32);

impl Points {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 || value > MAX_POINTS_PER_EVENT {
            return Err(DomainError::InvalidPoints(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

// ========================================
// Houses
// ========================================

/// Key of one of the predetermined building slots (`house-1` ..= `house-N`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HouseId(String);

impl HouseId {
    /// Parse a house id and check it names one of `slot_count` slots.
    pub fn parse(value: &str, slot_count: u32) -> Result<Self, DomainError> {
        let slot = value
            .strip_prefix(HOUSE_ID_PREFIX)
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| DomainError::UnknownHouse(value.to_string()))?;
        if slot == 0 || slot > slot_count || value != format!("{HOUSE_ID_PREFIX}{slot}") {
            return Err(DomainError::UnknownHouse(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn slot(number: u32) -> Self {
        Self(format!("{HOUSE_ID_PREFIX}{number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// House level, 1 ..= 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HouseRank(u8);

impl HouseRank {
    pub const MIN: HouseRank = HouseRank(1);
    pub const MAX: HouseRank = HouseRank(30);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(DomainError::InvalidHouseRank(value));
        }
        Ok(Self(value))
    }

    /// The next rank, or `None` when already at the cap.
    pub fn next(self) -> Option<Self> {
        if self >= Self::MAX {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

// ========================================
// Art
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtId(pub(super) String);

impl ArtId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidArtId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Client-generated raster as a `data:image/...` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtImage(String);

impl ArtImage {
    pub fn new(value: String, max_bytes: usize) -> Result<Self, DomainError> {
        if !value.starts_with(ART_IMAGE_PREFIX) {
            return Err(DomainError::InvalidArtImage);
        }
        if value.len() > max_bytes {
            return Err(DomainError::ArtImageTooLarge {
                size: value.len(),
                max: max_bytes,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// ========================================
// Tic-tac-toe
// ========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardId(String);

impl BoardId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() || value.chars().count() > MAX_BOARD_ID_CHARS {
            return Err(DomainError::InvalidBoardId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Cell on a 3x3 board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex(u8);

impl CellIndex {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value >= BOARD_CELLS {
            return Err(DomainError::InvalidCellIndex(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

impl TryFrom<&str> for Symbol {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "X" | "x" => Ok(Symbol::X),
            "O" | "o" => Ok(Symbol::O),
            other => Err(DomainError::InvalidSymbol(other.to_string())),
        }
    }
}
