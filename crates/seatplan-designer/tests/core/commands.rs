use seatplan_designer::commands::{Command, CommandOp, EntitySnapshot};
use seatplan_designer::geometry::Point;
use seatplan_designer::model::{Seat, SeatStatus, Section, VenueStore};

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

/// Two sections, the first with two seats.
fn venue() -> VenueStore {
    let mut store = VenueStore::new();
    store.push_section(square(1, 0.0, 0.0, 100.0)).unwrap();
    store.push_section(square(2, 200.0, 0.0, 50.0)).unwrap();
    store.insert_seat(None, Seat::new(3, 1, Point::new(10.0, 10.0), "A", 1)).unwrap();
    store.insert_seat(None, Seat::new(4, 1, Point::new(22.0, 10.0), "A", 2)).unwrap();
    store
}

#[test]
fn test_add_section_and_undo() {
    let mut store = venue();
    let before = store.clone();
    let mut cmd = Command::add_section(square(10, 300.0, 300.0, 10.0));
    assert_eq!(cmd.name(), "Add section Section 10");

    cmd.execute(&mut store).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.sections().last().unwrap().id, 10);

    cmd.undo(&mut store).unwrap();
    assert_eq!(store.sections(), before.sections());
}

#[test]
fn test_delete_section_restores_index_and_seats() {
    let mut store = venue();
    let before = store.clone();
    let mut cmd = Command::delete_section(1);

    cmd.execute(&mut store).unwrap();
    assert!(!store.contains_section(1));
    assert!(!store.contains_seat(3));
    assert_eq!(store.seat_count(), 0);

    cmd.undo(&mut store).unwrap();
    assert_eq!(store.sections(), before.sections());
    assert_eq!(store.section_index(1), Some(0));

    // Redo after undo deletes again.
    cmd.execute(&mut store).unwrap();
    assert!(!store.contains_section(1));
}

#[test]
fn test_remove_seat_restores_position_in_section() {
    let mut store = venue();
    let before = store.clone();
    let mut cmd = Command::remove_seat(3);

    cmd.execute(&mut store).unwrap();
    assert_eq!(store.seat_count(), 1);
    cmd.undo(&mut store).unwrap();
    assert_eq!(store.sections(), before.sections());
    assert_eq!(store.section(1).unwrap().seats[0].id, 3);
}

#[test]
fn test_add_seat_needs_owning_section() {
    let mut store = venue();
    let mut cmd = Command::add_seat(Seat::new(50, 99, Point::new(0.0, 0.0), "A", 1));
    assert!(cmd.execute(&mut store).is_err());
    assert_eq!(store.seat_count(), 2);
}

#[test]
fn test_add_seat_rejects_duplicate_id() {
    let mut store = venue();
    let mut cmd = Command::add_seat(Seat::new(3, 1, Point::new(50.0, 50.0), "B", 1));
    assert!(cmd.execute(&mut store).is_err());
}

#[test]
fn test_translate_moves_standalone_seats() {
    let mut store = venue();
    let mut cmd = Command::translate(&store, &[], &[4], 3.0, -2.0);
    cmd.execute(&mut store).unwrap();
    assert_eq!(store.seat(4).unwrap().position(), Point::new(25.0, 8.0));
    assert_eq!(store.seat(3).unwrap().position(), Point::new(10.0, 10.0));
    assert_eq!(store.section(1).unwrap().points[0], Point::new(0.0, 0.0));
}

#[test]
fn test_seat_inside_moved_section_moves_once() {
    let store = venue();
    let snapshots = EntitySnapshot::capture_all(&store, &[1], &[3]);
    // The seat travels with its section, so it is not captured separately.
    assert_eq!(snapshots.len(), 1);
}

#[test]
fn test_rotate_is_exact_on_undo() {
    let mut store = venue();
    let before = store.clone();
    let mut cmd = Command::rotate(&store, &[1], &[], Point::new(50.0, 50.0), 33.3);

    cmd.execute(&mut store).unwrap();
    let rotated = store.clone();
    assert!((store.seat(3).unwrap().angle - 33.3).abs() < 1e-12);

    cmd.undo(&mut store).unwrap();
    assert_eq!(store.sections(), before.sections());

    cmd.execute(&mut store).unwrap();
    assert_eq!(store.sections(), rotated.sections());
}

#[test]
fn test_translate_fails_when_target_is_gone() {
    let mut store = venue();
    let mut cmd = Command::translate(&store, &[2], &[], 1.0, 1.0);
    store.remove_section(2).unwrap();
    let before = store.clone();
    assert!(cmd.execute(&mut store).is_err());
    assert_eq!(store, before);
}

#[test]
fn test_update_section() {
    let mut store = venue();
    let mut props = store.section(1).unwrap().properties();
    assert!(Command::update_section(&store, 1, props.clone()).is_none());

    props.name = "Balcony".to_string();
    props.opacity = 0.8;
    let mut cmd = Command::update_section(&store, 1, props).unwrap();
    cmd.execute(&mut store).unwrap();
    assert_eq!(store.section(1).unwrap().name, "Balcony");

    cmd.undo(&mut store).unwrap();
    assert_eq!(store.section(1).unwrap().name, "Section 1");
    assert_eq!(store.section(1).unwrap().opacity, Section::DEFAULT_OPACITY);
}

#[test]
fn test_update_seats_only_records_changes() {
    let mut store = venue();
    store.seat_mut(4).unwrap().status = SeatStatus::Sold;

    let mut cmd = Command::update_seats(&store, &[3, 4, 99], |attrs| {
        attrs.status = SeatStatus::Sold;
    })
    .unwrap();
    match &cmd.op {
        CommandOp::UpdateSeats { changes } => {
            assert_eq!(changes.len(), 1);
            assert_eq!(changes[0].seat_id, 3);
        }
        other => panic!("unexpected op {other:?}"),
    }

    cmd.execute(&mut store).unwrap();
    assert_eq!(store.seat(3).unwrap().status, SeatStatus::Sold);
    cmd.undo(&mut store).unwrap();
    assert_eq!(store.seat(3).unwrap().status, SeatStatus::Available);

    assert!(Command::update_seats(&store, &[4], |attrs| attrs.status = SeatStatus::Sold).is_none());
}

#[test]
fn test_batch_rolls_back_on_failure() {
    let mut store = venue();
    let before = store.clone();
    let mut cmd = Command::batch(
        "Mixed",
        vec![
            Command::remove_seat(3),
            Command::translate(&store, &[2], &[], 10.0, 0.0),
            Command::delete_section(99),
        ],
    );
    assert_eq!(cmd.operation_count(), 3);

    assert!(cmd.execute(&mut store).is_err());
    assert_eq!(store.sections(), before.sections());
}

#[test]
fn test_batch_undoes_in_reverse() {
    let mut store = venue();
    let before = store.clone();
    // Deleting the section after removing one of its seats only works if undo
    // restores the section before the seat.
    let mut cmd = Command::batch(
        "Delete",
        vec![Command::remove_seat(3), Command::delete_section(1)],
    );
    cmd.execute(&mut store).unwrap();
    assert_eq!(store.len(), 1);

    cmd.undo(&mut store).unwrap();
    assert_eq!(store.sections(), before.sections());
}

#[test]
fn test_commands_serialize() {
    let cmd = Command::translate(&venue(), &[1], &[], 4.0, 5.0);
    let json = serde_json::to_string(&cmd).unwrap();
    let back: Command = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);
}
