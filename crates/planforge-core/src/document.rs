//! The persistence contract shared with the project-file collaborator.

use crate::elements::{LinearElement, Room, TextLabel};
use crate::store::ElementStore;
use crate::viewport::Viewport;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

/// A plain record of everything needed to reopen a blueprint.
///
/// All coordinates are plain numbers in world units; the external
/// persistence collaborator stores and loads this record as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub version: u32,
    /// Pixels per foot.
    pub scale: f64,
    /// Grid spacing in world units.
    pub grid_size: f64,
    pub zoom: f64,
    pub pan_offset: Vec2,
    pub walls: Vec<LinearElement>,
    pub doors: Vec<LinearElement>,
    pub windows: Vec<LinearElement>,
    pub stairs: Vec<LinearElement>,
    pub rooms: Vec<Room>,
    pub text_labels: Vec<TextLabel>,
    pub measurements: Vec<LinearElement>,
}

impl PlanDocument {
    /// Capture the engine's live state into a document record.
    pub fn capture(store: &ElementStore, viewport: &Viewport, scale: f64, grid_size: f64) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            scale,
            grid_size,
            zoom: viewport.zoom,
            pan_offset: viewport.pan_offset,
            walls: store.walls.clone(),
            doors: store.doors.clone(),
            windows: store.windows.clone(),
            stairs: store.stairs.clone(),
            rooms: store.rooms.clone(),
            text_labels: store.text_labels.clone(),
            measurements: store.measurements.clone(),
        }
    }

    /// Rebuild an element store from the document's collections.
    pub fn into_store(self) -> ElementStore {
        ElementStore {
            walls: self.walls,
            doors: self.doors,
            windows: self.windows,
            stairs: self.stairs,
            measurements: self.measurements,
            rooms: self.rooms,
            text_labels: self.text_labels,
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
