//! Adapters implementing the ports.
//!
//! This module contains the concrete storage, input and output
//! implementations of the traits defined in [`crate::ports`].

pub mod console_renderer;
pub mod msgpack_repository;
pub mod participants;

pub use console_renderer::ConsoleRenderer;
pub use msgpack_repository::MsgPackRepository;
pub use participants::{ConsoleHuman, LineSource, RandomParticipant, ScriptedParticipant};
