use seatplan_designer::commands::Command;
use seatplan_designer::document::Document;
use seatplan_designer::geometry::{BoundingBox, Point};
use seatplan_designer::model::{Seat, Section, VenueStore};
use seatplan_designer::selection_manager::SelectionManager;

fn square(id: u64, x: f64, y: f64, size: f64) -> Section {
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

/// Sections A (id 1) and B (id 2) side by side, a seat (id 3) in A.
fn venue() -> VenueStore {
    let mut store = VenueStore::new();
    store.push_section(square(1, 0.0, 0.0, 10.0)).unwrap();
    store.push_section(square(2, 20.0, 0.0, 10.0)).unwrap();
    store.insert_seat(None, Seat::new(3, 1, Point::new(5.0, 5.0), "A", 1)).unwrap();
    store
}

#[test]
fn test_select_replaces_or_extends() {
    let store = venue();
    let mut selection = SelectionManager::new();

    selection.select_sections(&store, [1], false);
    selection.select_sections(&store, [2], false);
    assert!(!selection.is_section_selected(1));
    assert!(selection.is_section_selected(2));

    selection.select_sections(&store, [1], true);
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.selected_section(), None);
}

#[test]
fn test_unknown_ids_are_ignored() {
    let store = venue();
    let mut selection = SelectionManager::new();
    selection.select_sections(&store, [1, 42], false);
    selection.select_seats(&store, [3, 43], true);
    assert_eq!(selection.len(), 2);
}

#[test]
fn test_toggle() {
    let store = venue();
    let mut selection = SelectionManager::new();
    selection.toggle_seat(&store, 3);
    assert!(selection.is_seat_selected(3));
    selection.toggle_seat(&store, 3);
    assert!(selection.is_empty());
}

#[test]
fn test_select_all_selects_sections() {
    let store = venue();
    let mut selection = SelectionManager::new();
    selection.select_seats(&store, [3], false);
    selection.select_all(&store);
    assert_eq!(selection.selected_sections().len(), 2);
    assert!(selection.selected_seats().is_empty());
}

#[test]
fn test_select_in_box_uses_precise_overlap() {
    let store = venue();
    let mut selection = SelectionManager::new();

    // Touches only section A, and the seat center.
    assert!(selection.select_in_box(&store, &BoundingBox::new(4.0, 4.0, 6.0, 6.0), false));
    assert!(selection.is_section_selected(1));
    assert!(selection.is_seat_selected(3));
    assert!(!selection.is_section_selected(2));

    // Additive box over B keeps A.
    selection.select_in_box(&store, &BoundingBox::new(25.0, -5.0, 40.0, 5.0), true);
    assert!(selection.is_section_selected(1));
    assert!(selection.is_section_selected(2));

    // Empty area clears when not additive.
    assert!(selection.select_in_box(&store, &BoundingBox::new(100.0, 100.0, 110.0, 110.0), false));
    assert!(selection.is_empty());
}

#[test]
fn test_selection_bounds() {
    let store = venue();
    let mut selection = SelectionManager::new();
    assert!(selection.bounds(&store).is_none());
    selection.select_sections(&store, [1, 2], false);
    assert_eq!(selection.bounds(&store), Some(BoundingBox::new(0.0, 0.0, 30.0, 10.0)));
}

#[test]
fn test_deleting_one_keeps_the_other_selected() {
    let mut doc = Document::new(venue(), 50);
    doc.selection.select_sections(&doc.store, [1, 2], false);

    doc.history
        .execute(Command::delete_section(1), &mut doc.store)
        .unwrap();
    doc.prune_selection();

    assert!(!doc.selection.is_section_selected(1));
    assert!(doc.selection.is_section_selected(2));
    assert_eq!(doc.selection.len(), 1);
}

#[test]
fn test_prune_drops_cascaded_seats() {
    let mut doc = Document::new(venue(), 50);
    doc.selection.select_seats(&doc.store, [3], false);
    doc.selection.select_sections(&doc.store, [2], true);

    doc.history
        .execute(Command::delete_section(1), &mut doc.store)
        .unwrap();
    assert!(doc.prune_selection());

    assert!(!doc.selection.is_seat_selected(3));
    assert!(doc.selection.is_section_selected(2));
    assert!(!doc.prune_selection());
}
