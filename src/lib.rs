//! Formation board library.
//!
//! A headless roster/formation board: players are dragged from a bench onto
//! a field and stored at resolution-independent positions, a match clock
//! runs independently of rendering, and on-field players accrue playing time
//! in coalesced batches. Session state lives in a `bevy_ecs` world owned by
//! [`board::Board`]; this crate exposes its components, resources, systems
//! and events for reuse and for integration tests.

pub mod board;
pub mod components;
pub mod events;
pub mod format;
pub mod math;
pub mod resources;
pub mod systems;
