//! In-memory repository implementations.

pub mod plaza;

pub use plaza::InMemoryPlazaRepository;
