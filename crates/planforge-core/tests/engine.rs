//! End-to-end scenarios exercising the engine through its public surface.

use kurbo::Point;
use planforge_core::{Engine, PlanDocument, SnapKind, Tool};

fn draw_wall(engine: &mut Engine, start: Point, end: Point) {
    engine.set_tool(Tool::Wall);
    engine.begin_draw(start);
    engine.update_drawing(end);
    assert!(engine.commit_drawing().is_some());
}

/// Draw a closed square of the given side length starting at the origin.
fn draw_square(engine: &mut Engine, side: f64) {
    draw_wall(engine, Point::new(0.0, 0.0), Point::new(side, 0.0));
    draw_wall(engine, Point::new(side, 0.0), Point::new(side, side));
    draw_wall(engine, Point::new(side, side), Point::new(0.0, side));
    draw_wall(engine, Point::new(0.0, side), Point::new(0.0, 0.0));
}

#[test]
fn square_plan_detects_one_room_with_correct_area() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    // 10 ft × 10 ft at the default 20 px/ft scale.
    draw_square(&mut engine, 200.0);

    assert_eq!(engine.detect_rooms(), 1);
    let room = &engine.store().rooms[0];
    assert_eq!(room.name, "Room 1");
    let error = (room.area - 100.0).abs() / 100.0;
    assert!(error < 0.01, "area {} out of 1% tolerance", room.area);
}

#[test]
fn open_wall_detects_no_rooms() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(400.0, 0.0));
    assert_eq!(engine.detect_rooms(), 0);
    assert!(engine.store().rooms.is_empty());
}

#[test]
fn undo_redo_restores_drawn_walls_exactly() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    draw_wall(&mut engine, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
    draw_wall(&mut engine, Point::new(0.0, 100.0), Point::new(200.0, 100.0));
    let after_draw = engine.store().clone();

    assert!(engine.undo());
    assert_eq!(engine.store().walls.len(), 1);
    assert!(engine.undo());
    assert!(engine.store().walls.is_empty());
    assert!(!engine.undo());

    assert!(engine.redo());
    assert!(engine.redo());
    assert!(!engine.redo());
    assert_eq!(engine.store(), &after_draw);
}

#[test]
fn history_caps_at_fifty_snapshots() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    for i in 0..61 {
        let y = i as f64 * 50.0;
        draw_wall(&mut engine, Point::new(0.0, y), Point::new(200.0, y));
    }
    // Walk the history to its floor: the earliest reachable state is not
    // the empty baseline anymore.
    let mut undos = 0;
    while engine.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    assert_eq!(engine.store().walls.len(), 12);
}

#[test]
fn snapping_resolves_to_nearby_endpoint() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    draw_wall(&mut engine, Point::new(5.1, 5.2), Point::new(300.0, 300.0));

    let snap = planforge_core::snap::resolve(
        Point::new(5.0, 5.0),
        engine.store(),
        20.0, // zoom 20 -> snap radius 1 world unit
        false,
        engine.grid_size(),
    );
    assert_eq!(snap.kind, SnapKind::Endpoint);
    assert_eq!(snap.point, Point::new(5.1, 5.2));
}

#[test]
fn align_left_matches_minimum_x() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    draw_wall(&mut engine, Point::new(10.0, 0.0), Point::new(110.0, 0.0));
    draw_wall(&mut engine, Point::new(60.0, 100.0), Point::new(160.0, 100.0));
    draw_wall(&mut engine, Point::new(30.0, 200.0), Point::new(130.0, 200.0));

    engine.set_tool(Tool::Select);
    engine.select_all();
    engine.align(planforge_core::Alignment::Left).unwrap();

    for wall in &engine.store().walls {
        assert!((wall.bounds().x0 - 10.0).abs() < 1e-9);
    }
}

#[test]
fn export_import_roundtrip_preserves_everything() {
    let mut engine = Engine::new();
    engine.set_grid_snap(false);
    draw_square(&mut engine, 200.0);
    engine.detect_rooms();
    engine.add_text_label(Point::new(100.0, 100.0), "Studio");
    engine.set_zoom(2.0);

    let json = engine.export_json().unwrap();
    let document = PlanDocument::from_json(&json).unwrap();

    let mut restored = Engine::new();
    restored.import_data(document);
    assert_eq!(restored.store(), engine.store());
    assert!((restored.viewport().zoom - 2.0).abs() < f64::EPSILON);
    // The import committed one snapshot, so it can be undone back to empty.
    assert!(restored.can_undo());
}

#[test]
fn import_commits_a_single_history_entry() {
    let mut source = Engine::new();
    source.set_grid_snap(false);
    draw_wall(&mut source, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
    let document = source.export_data();

    let mut engine = Engine::new();
    engine.import_data(document);
    assert_eq!(engine.store().walls.len(), 1);
    assert!(engine.undo());
    assert!(engine.store().walls.is_empty());
    assert!(!engine.undo());
}
