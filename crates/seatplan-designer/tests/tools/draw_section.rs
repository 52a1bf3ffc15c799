use seatplan_designer::geometry::{BoundingBox, Point};
use seatplan_designer::input::HostEvent;
use seatplan_designer::model::VenueStore;
use seatplan_designer::overlay::{EngineNotification, Overlay};
use seatplan_designer::tools::{ToolId, ToolState};
use seatplan_designer::Engine;
use seatplan_settings::EditorConfig;

use crate::support::{click, drag, engine_with, engine_with_config, selected_sections, store, undo_depth};

fn drawing_engine() -> Engine {
    let mut engine = engine_with(VenueStore::new());
    engine.set_tool(ToolId::DrawSection);
    engine
}

fn draft_len(engine: &Engine) -> usize {
    match engine.tool_state() {
        ToolState::DrawSection(tool) => tool.vertices().len(),
        other => panic!("unexpected tool {:?}", other.id()),
    }
}

#[test]
fn test_click_near_first_vertex_closes_polygon() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    click(&mut engine, 100.0, 100.0);
    click(&mut engine, 0.0, 100.0);
    assert_eq!(draft_len(&engine), 4);
    assert!(matches!(
        engine.overlay(),
        Some(Overlay::SectionPreview { points, .. }) if points.len() == 4
    ));

    let response = click(&mut engine, 3.0, 2.0);

    let sections = store(&engine).sections();
    assert_eq!(sections.len(), 1);
    let section = &sections[0];
    // The closing click is not a vertex.
    assert_eq!(section.points.len(), 4);
    assert_eq!(section.points[0], Point::new(0.0, 0.0));
    assert_eq!(section.name, "Section 1");
    assert_eq!(
        response.notifications,
        vec![EngineNotification::PolygonAutoClosed { section_id: section.id }]
    );
    assert!(response.model_changed);
    assert_eq!(selected_sections(&engine), vec![section.id]);
    assert_eq!(draft_len(&engine), 0);
    assert!(engine.overlay().is_none());
    assert_eq!(undo_depth(&engine), 1);
}

#[test]
fn test_hover_near_first_vertex_reports_can_close() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    click(&mut engine, 100.0, 100.0);

    engine.handle_event(HostEvent::moved(4.0, 4.0));
    assert!(matches!(
        engine.overlay(),
        Some(Overlay::SectionPreview { can_close: true, cursor, .. }) if *cursor == Point::new(0.0, 0.0)
    ));
}

#[test]
fn test_collinear_outline_is_rejected_and_draft_kept() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 50.0, 0.0);
    click(&mut engine, 100.0, 0.0);

    let response = engine.handle_event(HostEvent::key("Enter"));
    assert!(!response.model_changed);
    assert!(store(&engine).is_empty());
    assert_eq!(draft_len(&engine), 3);

    click(&mut engine, 50.0, 80.0);
    engine.handle_event(HostEvent::key("Enter"));
    assert_eq!(store(&engine).len(), 1);
    assert_eq!(store(&engine).sections()[0].points.len(), 4);
}

#[test]
fn test_too_few_vertices_do_not_complete() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    engine.handle_event(HostEvent::key("Enter"));
    assert!(store(&engine).is_empty());
    assert_eq!(draft_len(&engine), 2);
}

#[test]
fn test_escape_discards_draft() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);

    let response = engine.handle_event(HostEvent::key("Escape"));
    assert!(response.handled);
    assert_eq!(draft_len(&engine), 0);
    assert!(engine.overlay().is_none());
    assert!(store(&engine).is_empty());
}

#[test]
fn test_backspace_drops_last_vertex() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    click(&mut engine, 100.0, 100.0);

    engine.handle_event(HostEvent::key("Backspace"));
    assert_eq!(draft_len(&engine), 2);
}

#[test]
fn test_double_click_completes_without_duplicate_vertex() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    click(&mut engine, 100.0, 100.0);
    click(&mut engine, 0.0, 100.0);
    click(&mut engine, 0.0, 100.0);
    engine.handle_event(HostEvent::double_click(0.0, 100.0));

    assert_eq!(store(&engine).len(), 1);
    assert_eq!(store(&engine).sections()[0].points.len(), 4);
}

#[test]
fn test_click_snapping_onto_previous_vertex_is_ignored() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    // Within the snap radius of (100, 0).
    click(&mut engine, 102.0, 1.0);
    assert_eq!(draft_len(&engine), 2);

    click(&mut engine, 100.0, 100.0);
    let response = engine.handle_event(HostEvent::key("Enter"));
    assert!(response.model_changed);
    assert_eq!(
        store(&engine).sections()[0].points,
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)]
    );
}

#[test]
fn test_vertex_cap_completes_polygon() {
    let mut config = EditorConfig::default();
    config.drawing.max_vertices = 4;
    let mut engine = engine_with_config(VenueStore::new(), config);
    engine.set_tool(ToolId::DrawSection);

    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    click(&mut engine, 100.0, 100.0);
    let response = click(&mut engine, 0.0, 100.0);

    assert_eq!(store(&engine).len(), 1);
    let id = store(&engine).sections()[0].id;
    assert_eq!(
        response.notifications,
        vec![EngineNotification::MaxVerticesReached { section_id: id }]
    );
}

#[test]
fn test_clicks_snap_to_existing_vertices() {
    let mut store_with_square = VenueStore::new();
    store_with_square
        .push_section(crate::support::square(1, 0.0, 0.0, 100.0))
        .unwrap();
    let mut engine = engine_with(store_with_square);
    engine.set_tool(ToolId::DrawSection);

    click(&mut engine, 103.0, 98.0);
    match engine.tool_state() {
        ToolState::DrawSection(tool) => assert_eq!(tool.vertices(), &[Point::new(100.0, 100.0)]),
        other => panic!("unexpected tool {:?}", other.id()),
    }
}

#[test]
fn test_programmatic_drawing() {
    let mut engine = drawing_engine();
    engine.add_section_point(Point::new(0.0, 0.0));
    engine.add_section_point(Point::new(60.0, 0.0));
    engine.add_section_point(Point::new(30.0, 40.0));
    let response = engine.complete_section_drawing();

    assert!(response.model_changed);
    assert_eq!(store(&engine).sections()[0].points.len(), 3);
}

#[test]
fn test_programmatic_drawing_requires_draw_tool() {
    let mut engine = engine_with(VenueStore::new());
    let response = engine.add_section_point(Point::new(0.0, 0.0));
    assert!(!response.handled);
    assert!(!engine.complete_section_drawing().handled);
}

#[test]
fn test_switching_tools_discards_draft() {
    let mut engine = drawing_engine();
    click(&mut engine, 0.0, 0.0);
    click(&mut engine, 100.0, 0.0);
    engine.set_tool(ToolId::Select);
    engine.set_tool(ToolId::DrawSection);
    assert_eq!(draft_len(&engine), 0);
}

#[test]
fn test_box_mode_creates_rectangle() {
    let mut engine = engine_with(VenueStore::new());
    engine.set_tool(ToolId::DrawSectionBox);

    let mid = crate::support::press_and_move(&mut engine, (10.0, 10.0), (60.0, 40.0));
    assert_eq!(
        mid.overlay,
        Some(Overlay::BoxPreview {
            bounds: BoundingBox::new(10.0, 10.0, 60.0, 40.0)
        })
    );
    engine.handle_event(HostEvent::up(60.0, 40.0));

    let sections = store(&engine).sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].points.len(), 4);
    assert_eq!(sections[0].bounds(), Some(BoundingBox::new(10.0, 10.0, 60.0, 40.0)));
    assert_eq!(undo_depth(&engine), 1);
}

#[test]
fn test_box_mode_rejects_small_boxes() {
    let mut config = EditorConfig::default();
    config.drawing.min_box_size = 20.0;
    let mut engine = engine_with_config(VenueStore::new(), config);
    engine.set_tool(ToolId::DrawSectionBox);

    drag(&mut engine, (10.0, 10.0), (15.0, 60.0));
    assert!(store(&engine).is_empty());

    // A click is not a box.
    click(&mut engine, 10.0, 10.0);
    assert!(store(&engine).is_empty());
    assert_eq!(undo_depth(&engine), 0);
}
