//! PlanForge Core Library
//!
//! Platform-agnostic blueprint drawing engine for the PlanForge floor-plan
//! editor: element model, snapping, room boundary detection, selection and
//! transforms, undo/redo history, and the viewport transform. Rendering,
//! event wiring, and persistence UI live in host crates.

pub mod document;
pub mod elements;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod history;
pub mod rooms;
pub mod selection;
pub mod snap;
pub mod store;
pub mod tools;
pub mod viewport;

pub use document::PlanDocument;
pub use elements::{
    DoorSwing, ElementFamily, ElementId, LinearElement, LinearKind, Room, RoomKind, TextLabel,
};
pub use engine::Engine;
pub use error::EngineError;
pub use selection::{Alignment, ElementGroup, Selection};
pub use snap::{AlignmentGuide, GuideAxis, SnapKind, SnapPoint};
pub use store::ElementStore;
pub use tools::{Gesture, Tool};
pub use viewport::Viewport;
