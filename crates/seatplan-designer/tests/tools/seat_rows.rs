use seatplan_designer::input::HostEvent;
use seatplan_designer::model::VenueStore;
use seatplan_designer::overlay::Overlay;
use seatplan_designer::tools::{ToolId, ToolState};
use seatplan_designer::Engine;

use crate::support::{click, drag, engine_with, press_and_move, selected_seats, square, store, undo_depth};

// Default seats are 10 wide with gaps of 2 in a row and 4 between rows, so
// the row pitch is 12 and the rows are 14 apart.

fn rows_engine(size: f64) -> Engine {
    let mut store = VenueStore::new();
    store.push_section(square(1, 0.0, 0.0, size)).unwrap();
    let mut engine = engine_with(store);
    engine.set_tool(ToolId::PlaceSeatRows);
    engine
}

fn in_second_phase(engine: &Engine) -> bool {
    match engine.tool_state() {
        ToolState::PlaceSeatRows(tool) => tool.in_second_phase(),
        other => panic!("unexpected tool {:?}", other.id()),
    }
}

#[test]
fn test_first_row_seat_count_follows_drag_length() {
    let mut engine = rows_engine(200.0);

    let mid = press_and_move(&mut engine, (10.0, 10.0), (70.0, 10.0));
    assert!(matches!(
        mid.overlay,
        Some(Overlay::SeatPreview { ref seats, rows: 1, .. }) if seats.len() == 5
    ));
    engine.handle_event(HostEvent::up(70.0, 10.0));

    // 60 / 12 = 5 seats, in the model but not yet in history.
    assert_eq!(store(&engine).seat_count(), 5);
    assert_eq!(undo_depth(&engine), 0);
    assert!(in_second_phase(&engine));

    let xs: Vec<f64> = store(&engine).seats().map(|s| s.x).collect();
    assert_eq!(xs, vec![10.0, 22.0, 34.0, 46.0, 58.0]);
    let group = store(&engine).seats().next().unwrap().group_id;
    assert!(group.is_some());
    assert!(store(&engine).seats().all(|s| s.group_id == group));
}

#[test]
fn test_seats_outside_the_section_are_skipped() {
    let mut engine = rows_engine(50.0);
    drag(&mut engine, (10.0, 10.0), (70.0, 10.0));
    assert_eq!(store(&engine).seat_count(), 4);
}

#[test]
fn test_press_outside_section_does_nothing() {
    let mut engine = rows_engine(50.0);
    drag(&mut engine, (100.0, 100.0), (160.0, 100.0));
    assert_eq!(store(&engine).seat_count(), 0);
    assert!(!in_second_phase(&engine));
}

#[test]
fn test_click_without_drag_places_nothing() {
    let mut engine = rows_engine(200.0);
    click(&mut engine, 10.0, 10.0);
    assert_eq!(store(&engine).seat_count(), 0);
    assert!(!in_second_phase(&engine));
}

#[test]
fn test_second_drag_replicates_rows() {
    let mut engine = rows_engine(200.0);
    drag(&mut engine, (10.0, 10.0), (70.0, 10.0));

    // 28 / 14 = 2 extra rows.
    let mid = press_and_move(&mut engine, (100.0, 100.0), (100.0, 128.0));
    assert!(matches!(mid.overlay, Some(Overlay::SeatPreview { rows: 3, .. })));
    engine.handle_event(HostEvent::up(100.0, 128.0));

    assert!(!in_second_phase(&engine));
    assert_eq!(store(&engine).seat_count(), 15);
    assert_eq!(undo_depth(&engine), 1);
    assert_eq!(
        engine.history().unwrap().undo_description(),
        Some("Place 15 seats")
    );
    assert_eq!(selected_seats(&engine).len(), 15);

    let mut rows: Vec<String> = store(&engine).seats().map(|s| s.row.clone()).collect();
    rows.dedup();
    assert_eq!(rows, vec!["A", "B", "C"]);
    assert!(store(&engine).seats().any(|s| s.y == 38.0));

    // One undo removes the whole matrix.
    assert!(engine.undo());
    assert_eq!(store(&engine).seat_count(), 0);
}

#[test]
fn test_enter_commits_single_row() {
    let mut engine = rows_engine(200.0);
    drag(&mut engine, (10.0, 10.0), (70.0, 10.0));
    engine.handle_event(HostEvent::key("Enter"));

    assert_eq!(store(&engine).seat_count(), 5);
    assert_eq!(
        engine.history().unwrap().undo_description(),
        Some("Place 5 seats")
    );
}

#[test]
fn test_escape_in_second_phase_removes_provisional_row() {
    let mut engine = rows_engine(200.0);
    drag(&mut engine, (10.0, 10.0), (70.0, 10.0));
    assert_eq!(store(&engine).seat_count(), 5);

    let response = engine.handle_event(HostEvent::key("Escape"));
    assert!(response.handled);
    assert!(response.model_changed);
    assert_eq!(store(&engine).seat_count(), 0);
    assert!(!in_second_phase(&engine));
    assert_eq!(undo_depth(&engine), 0);
}

#[test]
fn test_switching_tools_removes_provisional_row() {
    let mut engine = rows_engine(200.0);
    drag(&mut engine, (10.0, 10.0), (70.0, 10.0));
    engine.set_tool(ToolId::Select);
    assert_eq!(store(&engine).seat_count(), 0);
}
