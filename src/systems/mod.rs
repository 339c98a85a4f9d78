//! Board systems.
//!
//! Submodules overview
//! - [`drag`] – drop-target hit testing and the drag observers
//! - [`matchclock`] – advance the match clock each frame
//! - [`migration`] – one-time conversion of legacy pixel positions
//! - [`persistence`] – write the roster back to the store when it changed
//! - [`playtime`] – credit batched playing time to on-field players
//! - [`ticker`] – run conditions for the per-frame continuations
//! - [`time`] – frame timestamps and frame sources

pub mod drag;
pub mod matchclock;
pub mod migration;
pub mod persistence;
pub mod playtime;
pub mod ticker;
pub mod time;
