//! Element definitions for the blueprint.

mod label;
mod linear;
mod room;

pub use label::TextLabel;
pub use linear::{DoorSwing, LinearElement, LinearKind, MIN_ELEMENT_LENGTH};
pub use room::{Room, RoomKind, DEFAULT_CEILING_HEIGHT};

use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// The element families the store keeps as separate collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementFamily {
    Wall,
    Door,
    Window,
    Stairs,
    Measurement,
    Room,
    TextLabel,
}
