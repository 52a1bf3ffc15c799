use seatplan_designer::geometry::Point;
use seatplan_designer::input::HostEvent;
use seatplan_designer::overlay::Cursor;
use seatplan_designer::tools::{MoveTool, ToolId, ToolState};
use seatplan_designer::Engine;

use crate::support::{click, drag, engine_with, press_and_move, selected_sections, store, undo_depth, venue};

fn move_tool(engine: &Engine) -> &MoveTool {
    match engine.tool_state() {
        ToolState::Move(tool) => tool,
        other => panic!("unexpected tool {:?}", other.id()),
    }
}

fn first_point(engine: &Engine, section: u64) -> Point {
    store(engine).section(section).unwrap().points[0]
}

fn engine_moving_section_2() -> Engine {
    let mut engine = engine_with(venue());
    engine.select_sections([2], false);
    engine.set_tool(ToolId::Move);
    engine
}

#[test]
fn test_activation_arms_selection() {
    let engine = engine_moving_section_2();
    assert_eq!(move_tool(&engine).armed_len(), 1);
    assert_eq!(engine.cursor(), Cursor::Move);
}

#[test]
fn test_drag_anywhere_moves_selection() {
    let mut engine = engine_moving_section_2();
    press_and_move(&mut engine, (500.0, 500.0), (510.0, 500.0));
    assert!(move_tool(&engine).is_dragging());
    assert_eq!(first_point(&engine, 2), Point::new(210.0, 0.0));

    engine.handle_event(HostEvent::up(520.0, 505.0));
    assert!(!move_tool(&engine).is_dragging());
    assert_eq!(first_point(&engine, 2), Point::new(220.0, 5.0));
    assert_eq!(first_point(&engine, 1), Point::new(0.0, 0.0));
    assert_eq!(undo_depth(&engine), 1);

    assert!(engine.undo());
    assert_eq!(first_point(&engine, 2), Point::new(200.0, 0.0));
}

#[test]
fn test_movement_below_noise_threshold_is_discarded() {
    let mut engine = engine_moving_section_2();
    // At 20x an 8 px drag is 0.4 world units.
    engine.viewport_mut().set_zoom(20.0);

    let response = drag(&mut engine, (10000.0, 10000.0), (10008.0, 10000.0));
    assert!(response.handled);
    assert_eq!(first_point(&engine, 2), Point::new(200.0, 0.0));
    assert_eq!(undo_depth(&engine), 0);
}

#[test]
fn test_click_without_drag_changes_nothing() {
    let mut engine = engine_moving_section_2();
    click(&mut engine, 500.0, 500.0);
    assert_eq!(first_point(&engine, 2), Point::new(200.0, 0.0));
    assert_eq!(undo_depth(&engine), 0);
    assert_eq!(selected_sections(&engine), vec![2]);
}

#[test]
fn test_escape_restores_and_records_nothing() {
    let mut engine = engine_moving_section_2();
    press_and_move(&mut engine, (500.0, 500.0), (540.0, 530.0));

    let response = engine.handle_event(HostEvent::key("Escape"));
    assert!(response.handled);
    assert_eq!(first_point(&engine, 2), Point::new(200.0, 0.0));

    engine.handle_event(HostEvent::up(540.0, 530.0));
    assert_eq!(first_point(&engine, 2), Point::new(200.0, 0.0));
    assert_eq!(undo_depth(&engine), 0);
}

#[test]
fn test_press_on_unselected_entity_selects_and_moves_it() {
    let mut engine = engine_with(venue());
    engine.set_tool(ToolId::Move);
    assert_eq!(move_tool(&engine).armed_len(), 0);

    drag(&mut engine, (20.0, 20.0), (30.0, 20.0));
    assert_eq!(selected_sections(&engine), vec![1]);
    assert_eq!(first_point(&engine, 1), Point::new(10.0, 0.0));
}

#[test]
fn test_nothing_selected_nothing_moves() {
    let mut engine = engine_with(venue());
    engine.set_tool(ToolId::Move);
    drag(&mut engine, (150.0, 150.0), (170.0, 150.0));
    assert_eq!(undo_depth(&engine), 0);
}

#[test]
fn test_rearms_after_undo() {
    let mut engine = engine_moving_section_2();
    drag(&mut engine, (500.0, 500.0), (520.0, 500.0));
    assert!(engine.undo());

    // The second drag starts from the restored geometry.
    drag(&mut engine, (500.0, 500.0), (505.0, 500.0));
    assert_eq!(first_point(&engine, 2), Point::new(205.0, 0.0));
}
