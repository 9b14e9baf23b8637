//! Snapping resolver and alignment guides.

use crate::geometry;
use crate::store::ElementStore;
use kurbo::Point;

/// Screen-space snap radius; divided by zoom to get world units.
pub const SNAP_RADIUS: f64 = 20.0;

/// Screen-space threshold for alignment guides.
pub const GUIDE_THRESHOLD: f64 = 5.0;

/// What a raw pointer position resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Endpoint of a wall, door, or window.
    Endpoint,
    /// Midpoint of a wall.
    Midpoint,
    /// Grid intersection.
    Grid,
    /// No anchor in range; the raw point passes through.
    None,
}

/// A resolved snap anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoint {
    pub point: Point,
    pub kind: SnapKind,
}

impl SnapPoint {
    pub fn none(point: Point) -> Self {
        Self {
            point,
            kind: SnapKind::None,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.kind != SnapKind::None
    }
}

/// Axis of an advisory alignment guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// Shared y coordinate.
    Horizontal,
    /// Shared x coordinate.
    Vertical,
}

/// An advisory guide line; visual aid only, never moves the snap point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentGuide {
    pub axis: GuideAxis,
    pub coordinate: f64,
}

/// Resolve a raw pointer position to a priority-ordered snap anchor.
///
/// Order, first match wins: nearest wall/door/window endpoint within the
/// radius, nearest wall midpoint within the radius, then the grid
/// intersection when grid snapping is on (no radius limit), otherwise the
/// raw point unchanged.
pub fn resolve(
    raw: Point,
    store: &ElementStore,
    zoom: f64,
    grid_snap: bool,
    grid_size: f64,
) -> SnapPoint {
    let radius = SNAP_RADIUS / zoom;

    if let Some(point) = store.nearest_snap_endpoint(raw, radius) {
        return SnapPoint {
            point,
            kind: SnapKind::Endpoint,
        };
    }
    if let Some(point) = store.nearest_wall_midpoint(raw, radius) {
        return SnapPoint {
            point,
            kind: SnapKind::Midpoint,
        };
    }
    if grid_snap {
        return SnapPoint {
            point: geometry::snap_to_grid(raw, grid_size),
            kind: SnapKind::Grid,
        };
    }
    SnapPoint::none(raw)
}

/// Scan wall endpoints for near-equal x or y and emit advisory guides.
pub fn find_alignment_guides(raw: Point, store: &ElementStore, zoom: f64) -> Vec<AlignmentGuide> {
    let threshold = GUIDE_THRESHOLD / zoom;
    let mut guides = Vec::new();
    for wall in &store.walls {
        for endpoint in wall.endpoints() {
            if (endpoint.y - raw.y).abs() <= threshold {
                push_unique(
                    &mut guides,
                    AlignmentGuide {
                        axis: GuideAxis::Horizontal,
                        coordinate: endpoint.y,
                    },
                );
            }
            if (endpoint.x - raw.x).abs() <= threshold {
                push_unique(
                    &mut guides,
                    AlignmentGuide {
                        axis: GuideAxis::Vertical,
                        coordinate: endpoint.x,
                    },
                );
            }
        }
    }
    guides
}

fn push_unique(guides: &mut Vec<AlignmentGuide>, guide: AlignmentGuide) {
    if !guides.contains(&guide) {
        guides.push(guide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LinearElement, LinearKind};

    fn store_with_wall(x0: f64, y0: f64, x1: f64, y1: f64) -> ElementStore {
        let mut store = ElementStore::new();
        store.insert_linear(
            LinearElement::new(LinearKind::wall(), Point::new(x0, y0), Point::new(x1, y1))
                .unwrap(),
        );
        store
    }

    #[test]
    fn test_endpoint_beats_midpoint() {
        let store = store_with_wall(0.0, 0.0, 100.0, 0.0);
        // Raw point near the start endpoint.
        let snap = resolve(Point::new(2.0, 2.0), &store, 1.0, true, 20.0);
        assert_eq!(snap.kind, SnapKind::Endpoint);
        assert_eq!(snap.point, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_endpoint_resolution_is_exact() {
        let store = store_with_wall(5.1, 5.2, 100.0, 100.0);
        let snap = resolve(Point::new(5.0, 5.0), &store, SNAP_RADIUS, true, 20.0);
        // Snap radius is 20/zoom = 1 here; the endpoint is ~0.22 away.
        assert_eq!(snap.kind, SnapKind::Endpoint);
        assert_eq!(snap.point, Point::new(5.1, 5.2));
    }

    #[test]
    fn test_midpoint_when_no_endpoint_in_range() {
        let store = store_with_wall(0.0, 0.0, 100.0, 0.0);
        let snap = resolve(Point::new(50.0, 5.0), &store, 1.0, false, 20.0);
        assert_eq!(snap.kind, SnapKind::Midpoint);
        assert_eq!(snap.point, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_grid_fallback() {
        let store = ElementStore::new();
        let snap = resolve(Point::new(23.0, 47.0), &store, 1.0, true, 20.0);
        assert_eq!(snap.kind, SnapKind::Grid);
        assert_eq!(snap.point, Point::new(20.0, 40.0));
    }

    #[test]
    fn test_no_snap_passes_raw_point_through() {
        let store = ElementStore::new();
        let raw = Point::new(23.0, 47.0);
        let snap = resolve(raw, &store, 1.0, false, 20.0);
        assert_eq!(snap.kind, SnapKind::None);
        assert_eq!(snap.point, raw);
        assert!(!snap.is_snapped());
    }

    #[test]
    fn test_radius_scales_with_zoom() {
        let store = store_with_wall(0.0, 0.0, 100.0, 0.0);
        // At zoom 4 the radius is 5 world units; a point 10 away misses.
        let snap = resolve(Point::new(0.0, 10.0), &store, 4.0, false, 20.0);
        assert_eq!(snap.kind, SnapKind::None);
    }

    #[test]
    fn test_alignment_guides() {
        let store = store_with_wall(0.0, 0.0, 100.0, 0.0);
        let guides = find_alignment_guides(Point::new(50.0, 2.0), &store, 1.0);
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].axis, GuideAxis::Horizontal);
        assert!((guides[0].coordinate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_guides_do_not_duplicate() {
        // Both wall endpoints share y = 0; only one horizontal guide.
        let store = store_with_wall(0.0, 0.0, 100.0, 0.0);
        let guides = find_alignment_guides(Point::new(200.0, 1.0), &store, 1.0);
        assert_eq!(guides.len(), 1);
    }
}
