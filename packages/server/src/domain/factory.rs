//! Factories for server-generated identities and spawn points.

use std::f64::consts::TAU;

use rand::{Rng, distributions::Alphanumeric};
use uuid::Uuid;

use super::value_object::{ArtId, SessionId, Timestamp, Vec3};

/// Inner and outer radius of the spawn ring around the central landmark.
pub const SPAWN_RADIUS_MIN: f64 = 15.0;
pub const SPAWN_RADIUS_MAX: f64 = 25.0;
pub const SPAWN_HEIGHT: f64 = 1.0;

const ART_ID_SUFFIX_LEN: usize = 6;

pub struct SessionIdFactory;

impl SessionIdFactory {
    pub fn generate() -> SessionId {
        SessionId(Uuid::new_v4().to_string())
    }
}

pub struct ArtIdFactory;

impl ArtIdFactory {
    /// `<millis>-<random suffix>`
    pub fn generate<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> ArtId {
        let suffix: String = rng
            .sample_iter(&Alphanumeric)
            .take(ART_ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        ArtId(format!("{}-{}", now.value(), suffix.to_lowercase()))
    }
}

pub struct SpawnPointFactory;

impl SpawnPointFactory {
    /// Random point on the ring `SPAWN_RADIUS_MIN..=SPAWN_RADIUS_MAX` around the origin.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(SPAWN_RADIUS_MIN..=SPAWN_RADIUS_MAX);
        Vec3 {
            x: radius * angle.cos(),
            y: SPAWN_HEIGHT,
            z: radius * angle.sin(),
        }
    }
}
