//! ECS resources made available to systems.
//!
//! Overview
//! - `boardconfig` – INI-backed settings (token size, grid, batching, store)
//! - `drag` – single-gesture drag controller
//! - `fieldgeometry` – measured field surface and the coordinate normalizer
//! - `kvstore` – opaque key-value persistence and JSON helpers
//! - `matchclock` – stopped/running/paused match clock
//! - `playtime` – batching accumulator for players' playing time
//! - `roster` – players, saved formations and persisted preferences
//! - `ticker` – per-frame continuations and their cancellation
//! - `worldtime` – frame timestamp and delta
pub mod boardconfig;
pub mod drag;
pub mod fieldgeometry;
pub mod kvstore;
pub mod matchclock;
pub mod playtime;
pub mod roster;
pub mod ticker;
pub mod worldtime;
