//! Utilities shared by the Plaza relay packages.

pub mod logger;
pub mod time;
