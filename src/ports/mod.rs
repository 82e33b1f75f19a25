//! Ports (trait boundaries) for external collaborators.
//!
//! The engine and the agent never talk to a terminal, a file or a progress
//! bar directly; they go through these traits, and the concrete adapters
//! live in [`crate::adapters`] and [`crate::pipeline::observers`].

pub mod observer;
pub mod participant;
pub mod renderer;
pub mod repository;

pub use observer::TrainingObserver;
pub use participant::Participant;
pub use renderer::Renderer;
pub use repository::TableRepository;
