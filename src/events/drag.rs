//! Drag gesture events.
//!
//! The pointer layer reports a gesture with a [`DragStartEvent`] when a token
//! is picked up and a [`DragEndEvent`] when it is released. The observers in
//! [`crate::systems::drag`] hit-test the release against the drop zones,
//! commit the result through the
//! [`DragController`](crate::resources::drag::DragController) and announce it
//! with a [`DragOutcomeEvent`].

use bevy_ecs::prelude::*;

use crate::math::Vec2;
use crate::resources::drag::DragOutcome;

/// A token was picked up.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DragStartEvent {
    pub player_id: String,
}

/// The dragged token was released.
///
/// `token_pos`/`token_size` describe the token's bounding rectangle at
/// release in pointer coordinates; `delta` is the total pointer movement since
/// pick-up.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DragEndEvent {
    pub token_pos: Vec2,
    pub token_size: Vec2,
    pub delta: Vec2,
}

/// Result of a finished gesture, for whoever shows notifications.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DragOutcomeEvent {
    pub player_id: String,
    pub outcome: DragOutcome,
}
