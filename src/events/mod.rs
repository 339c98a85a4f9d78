//! Event types and observers used by the board.
//!
//! Events carry discrete user intents into the session; observers apply them
//! to the resources synchronously, between frames.
//!
//! Submodules:
//! - [`drag`] – token pick-up, release and the resulting outcome
//! - [`matchcontrol`] – start/stop/pause/resume/add-time for the match clock
//! - [`viewport`] – viewport resizes that re-layout the field and bench
pub mod drag;
pub mod matchcontrol;
pub mod viewport;
