//! Room boundary detection over the wall graph.
//!
//! Walls form an undirected graph whose nodes are endpoint coordinates.
//! Closed loops in that graph are candidate room boundaries; each detection
//! run rebuilds the graph from scratch and replaces the Room collection
//! wholesale, so edits can never leave stale geometry behind.

use crate::elements::{LinearElement, Room};
use crate::geometry;
use kurbo::Point;
use std::collections::{HashMap, HashSet};

/// Upper bound on enumerated cycles, to bound work on dense graphs.
pub const MAX_CYCLES: usize = 20;

/// Minimum room area in square feet; slivers below this are noise.
pub const MIN_ROOM_AREA: f64 = 20.0;

/// Node keys quantize coordinates to this grain so endpoints that differ
/// by sub-pixel drift still merge into one graph node.
const NODE_QUANTUM: f64 = 1e-3;

fn node_key(p: Point) -> String {
    // Integer milli-units; rounding through i64 folds -0.0 into 0 so
    // endpoints straddling zero share a node.
    let qx = (p.x / NODE_QUANTUM).round() as i64;
    let qy = (p.y / NODE_QUANTUM).round() as i64;
    format!("{qx},{qy}")
}

struct WallGraph {
    /// Node key → neighbor keys, in wall insertion order.
    adjacency: HashMap<String, Vec<String>>,
    /// Node key → representative world coordinate (first seen).
    positions: HashMap<String, Point>,
}

impl WallGraph {
    fn build(walls: &[LinearElement]) -> Self {
        let mut graph = Self {
            adjacency: HashMap::new(),
            positions: HashMap::new(),
        };
        for wall in walls {
            let (a, b) = (node_key(wall.start), node_key(wall.end));
            // Self-loop from a quantized zero-length wall; skip.
            if a == b {
                continue;
            }
            graph.positions.entry(a.clone()).or_insert(wall.start);
            graph.positions.entry(b.clone()).or_insert(wall.end);
            graph.add_edge(a.clone(), b.clone());
            graph.add_edge(b, a);
        }
        graph
    }

    fn add_edge(&mut self, from: String, to: String) {
        let neighbors = self.adjacency.entry(from).or_default();
        if !neighbors.contains(&to) {
            neighbors.push(to);
        }
    }
}

struct CycleSearch<'g> {
    graph: &'g WallGraph,
    cycles: Vec<Vec<String>>,
    seen: HashSet<String>,
}

impl<'g> CycleSearch<'g> {
    /// Canonical key of a cycle: its node keys, sorted and joined, so the
    /// same loop found from different start nodes deduplicates.
    fn canonical_key(cycle: &[String]) -> String {
        let mut keys: Vec<&str> = cycle.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.join("|")
    }

    fn run(graph: &'g WallGraph) -> Vec<Vec<String>> {
        let mut search = Self {
            graph,
            cycles: Vec::new(),
            seen: HashSet::new(),
        };
        // Sorted start order keeps detection deterministic across runs.
        let mut starts: Vec<&String> = graph.adjacency.keys().collect();
        starts.sort_unstable();
        for start in starts {
            if search.cycles.len() >= MAX_CYCLES {
                break;
            }
            let mut path = vec![start.clone()];
            search.visit(start, start, None, &mut path);
        }
        search.cycles
    }

    fn visit(&mut self, start: &str, current: &str, previous: Option<&str>, path: &mut Vec<String>) {
        if self.cycles.len() >= MAX_CYCLES {
            return;
        }
        let Some(neighbors) = self.graph.adjacency.get(current) else {
            return;
        };
        for neighbor in neighbors {
            // No immediate backtracking along the edge we came in on.
            if previous == Some(neighbor.as_str()) {
                continue;
            }
            if neighbor == start {
                if path.len() >= 3 {
                    let key = Self::canonical_key(path);
                    if self.seen.insert(key) {
                        self.cycles.push(path.clone());
                        if self.cycles.len() >= MAX_CYCLES {
                            return;
                        }
                    }
                }
                continue;
            }
            if path.iter().any(|n| n == neighbor) {
                continue;
            }
            path.push(neighbor.clone());
            self.visit(start, neighbor, Some(current), path);
            path.pop();
        }
    }
}

/// Enumerate closed wall loops and materialize them as rooms.
///
/// Cycles below [`MIN_ROOM_AREA`] square feet (area is divided by `scale²`
/// to convert from world units) are discarded. Survivors get sequential
/// default names. An empty result is informational, not an error.
pub fn detect_rooms(walls: &[LinearElement], scale: f64) -> Vec<Room> {
    let graph = WallGraph::build(walls);
    let cycles = CycleSearch::run(&graph);

    let mut rooms = Vec::new();
    for cycle in cycles {
        let points: Vec<Point> = cycle
            .iter()
            .filter_map(|key| graph.positions.get(key))
            .copied()
            .collect();
        if points.len() < 3 {
            continue;
        }
        let area = geometry::polygon_area(&points) / (scale * scale);
        if area < MIN_ROOM_AREA {
            continue;
        }
        let name = format!("Room {}", rooms.len() + 1);
        rooms.push(Room::from_boundary(name, points, area));
    }
    log::debug!(
        "room detection: {} walls -> {} rooms",
        walls.len(),
        rooms.len()
    );
    rooms
}
