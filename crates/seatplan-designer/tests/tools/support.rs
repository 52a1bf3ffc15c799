//! Helpers shared by the tool tests.
//!
//! The engine starts at scale 1 with no offset, so screen and world
//! coordinates coincide unless a test changes the viewport.

use seatplan_designer::geometry::Point;
use seatplan_designer::input::{HostEvent, Modifiers};
use seatplan_designer::model::{Seat, Section, VenueStore};
use seatplan_designer::overlay::EventResponse;
use seatplan_designer::Engine;
use seatplan_settings::EditorConfig;

pub fn square(id: u64, x: f64, y: f64, size: f64) -> Section {
    Section::new(
        id,
        format!("Section {id}"),
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ],
    )
}

/// Section 1 at (0, 0) and section 2 at (200, 0), both 100 wide, with seat 3
/// in the middle of section 1.
pub fn venue() -> VenueStore {
    let mut store = VenueStore::new();
    store.push_section(square(1, 0.0, 0.0, 100.0)).unwrap();
    store.push_section(square(2, 200.0, 0.0, 100.0)).unwrap();
    store
        .insert_seat(None, Seat::new(3, 1, Point::new(50.0, 50.0), "A", 1))
        .unwrap();
    store
}

pub fn engine_with(store: VenueStore) -> Engine {
    engine_with_config(store, EditorConfig::default())
}

pub fn engine_with_config(store: VenueStore, config: EditorConfig) -> Engine {
    let mut engine = Engine::new(config).unwrap();
    engine.load_document(store);
    engine
}

pub fn store(engine: &Engine) -> &VenueStore {
    engine.store().unwrap()
}

pub fn undo_depth(engine: &Engine) -> usize {
    engine.history().unwrap().undo_depth()
}

pub fn selected_sections(engine: &Engine) -> Vec<u64> {
    engine
        .selection()
        .unwrap()
        .selected_sections()
        .iter()
        .copied()
        .collect()
}

pub fn selected_seats(engine: &Engine) -> Vec<u64> {
    engine
        .selection()
        .unwrap()
        .selected_seats()
        .iter()
        .copied()
        .collect()
}

/// Press and release at one point.
pub fn click(engine: &mut Engine, x: f64, y: f64) -> EventResponse {
    engine.handle_event(HostEvent::down(x, y));
    engine.handle_event(HostEvent::up(x, y))
}

pub fn click_with(engine: &mut Engine, x: f64, y: f64, modifiers: Modifiers) -> EventResponse {
    engine.handle_event(HostEvent::down_with(x, y, modifiers));
    engine.handle_event(HostEvent::up_with(x, y, modifiers))
}

/// Press at `from`, move halfway and then to `to` without releasing.
pub fn press_and_move(engine: &mut Engine, from: (f64, f64), to: (f64, f64)) -> EventResponse {
    engine.handle_event(HostEvent::down(from.0, from.1));
    let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    engine.handle_event(HostEvent::moved(mid.0, mid.1));
    engine.handle_event(HostEvent::moved(to.0, to.1))
}

/// A full drag from `from` to `to`.
pub fn drag(engine: &mut Engine, from: (f64, f64), to: (f64, f64)) -> EventResponse {
    press_and_move(engine, from, to);
    engine.handle_event(HostEvent::up(to.0, to.1))
}

pub fn drag_with(engine: &mut Engine, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) -> EventResponse {
    engine.handle_event(HostEvent::down_with(from.0, from.1, modifiers));
    engine.handle_event(HostEvent::PointerMove {
        x: to.0,
        y: to.1,
        modifiers,
    });
    engine.handle_event(HostEvent::up_with(to.0, to.1, modifiers))
}
