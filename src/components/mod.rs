//! ECS components for entities.
//!
//! The only entities in a board session are its drop zones; a zone is a
//! [`dropzone::DropZone`] placed by a [`mapposition::MapPosition`] and sized
//! by a [`boxcollider::BoxCollider`].
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangle with overlap tests
//! - [`dropzone`] – which zone (field or bench) an entity represents
//! - [`mapposition`] – top-left corner in pointer coordinates

pub mod boxcollider;
pub mod dropzone;
pub mod mapposition;
