pub mod board;
pub mod config;
pub mod id_generator;
pub mod identifiers;
pub mod logger;
pub mod movability;
pub mod protocol;

pub use identifiers::RoomCode;
