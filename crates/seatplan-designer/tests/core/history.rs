use proptest::prelude::*;
use seatplan_designer::commands::Command;
use seatplan_designer::geometry::Point;
use seatplan_designer::history::HistoryManager;
use seatplan_designer::model::{Seat, Section, VenueStore};

fn square(id: u64, x: f64, y: f64) -> Section {
    Section::new(
        id,
        format!("Section {id}"),
        vec![
            Point::new(x, y),
            Point::new(x + 100.0, y),
            Point::new(x + 100.0, y + 100.0),
            Point::new(x, y + 100.0),
        ],
    )
}

fn store_with_section() -> VenueStore {
    let mut store = VenueStore::new();
    store.push_section(square(1, 0.0, 0.0)).unwrap();
    store.insert_seat(None, Seat::new(2, 1, Point::new(10.0, 10.0), "A", 1)).unwrap();
    store
}

#[test]
fn test_history_manager_creation() {
    let history = HistoryManager::new(50);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(history.capacity(), 50);
}

#[test]
fn test_zero_capacity_keeps_one_entry() {
    assert_eq!(HistoryManager::new(0).capacity(), 1);
}

#[test]
fn test_execute_undo_redo() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();

    history.execute(Command::translate(&store, &[1], &[], 5.0, 0.0), &mut store).unwrap();
    assert_eq!(store.section(1).unwrap().points[0], Point::new(5.0, 0.0));
    assert_eq!(store.seat(2).unwrap().position(), Point::new(15.0, 10.0));
    assert!(history.can_undo());
    assert_eq!(history.undo_description(), Some("Move"));

    assert!(history.undo(&mut store).unwrap());
    assert_eq!(store.section(1).unwrap().points[0], Point::new(0.0, 0.0));
    assert_eq!(store.seat(2).unwrap().position(), Point::new(10.0, 10.0));
    assert!(history.can_redo());
    assert_eq!(history.redo_description(), Some("Move"));

    assert!(history.redo(&mut store).unwrap());
    assert_eq!(store.section(1).unwrap().points[0], Point::new(5.0, 0.0));
    assert!(!history.can_redo());
}

#[test]
fn test_undo_and_redo_on_empty_stacks_are_noops() {
    let mut store = store_with_section();
    let before = store.clone();
    let mut history = HistoryManager::default();
    assert!(!history.undo(&mut store).unwrap());
    assert!(!history.redo(&mut store).unwrap());
    assert_eq!(store, before);
}

#[test]
fn test_execute_clears_redo_stack() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();

    history.execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store).unwrap();
    history.execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store).unwrap();
    history.undo(&mut store).unwrap();
    assert_eq!(history.redo_depth(), 1);

    history.execute(Command::translate(&store, &[1], &[], 0.0, 1.0), &mut store).unwrap();
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(history.undo_depth(), 2);
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut store = store_with_section();
    let mut history = HistoryManager::new(3);

    for i in 0..5 {
        let cmd = Command::translate(&store, &[1], &[], 1.0, 0.0);
        let cmd = Command::batch(format!("Step {i}"), vec![cmd]);
        history.execute(cmd, &mut store).unwrap();
    }

    assert_eq!(history.undo_depth(), 3);
    let names: Vec<&str> = history.entries().map(|e| e.description()).collect();
    assert_eq!(names, vec!["Step 2", "Step 3", "Step 4"]);

    while history.undo(&mut store).unwrap() {}
    // Only the three retained steps could be undone.
    assert_eq!(store.section(1).unwrap().points[0], Point::new(2.0, 0.0));
}

#[test]
fn test_shrinking_capacity_evicts() {
    let mut store = store_with_section();
    let mut history = HistoryManager::new(10);
    for _ in 0..6 {
        history
            .execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store)
            .unwrap();
    }
    history.set_capacity(2);
    assert_eq!(history.undo_depth(), 2);
}

#[test]
fn test_shrinking_capacity_bounds_redo_stack() {
    let mut store = store_with_section();
    let mut history = HistoryManager::new(10);
    for i in 0..10 {
        let cmd = Command::translate(&store, &[1], &[], 1.0, 0.0);
        history
            .execute(Command::batch(format!("Step {i}"), vec![cmd]), &mut store)
            .unwrap();
    }
    while history.undo(&mut store).unwrap() {}
    assert_eq!(history.redo_depth(), 10);

    history.set_capacity(3);
    assert_eq!(history.redo_depth(), 3);
    // The steps closest to the present survive.
    assert_eq!(history.redo_description(), Some("Step 0"));

    while history.redo(&mut store).unwrap() {}
    assert_eq!(store.section(1).unwrap().points[0], Point::new(3.0, 0.0));
    assert_eq!(history.undo_depth(), 3);
}

#[test]
fn test_failed_command_is_not_recorded() {
    let mut store = store_with_section();
    let before = store.clone();
    let mut history = HistoryManager::default();

    assert!(history.execute(Command::delete_section(99), &mut store).is_err());
    assert!(!history.can_undo());
    assert_eq!(store, before);
}

#[test]
fn test_failed_execute_keeps_redo_stack() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();
    history
        .execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store)
        .unwrap();
    history.undo(&mut store).unwrap();

    assert!(history.execute(Command::remove_seat(99), &mut store).is_err());
    assert_eq!(history.redo_depth(), 1);
}

#[test]
fn test_empty_batch_is_noop() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();
    history.execute_batch(Vec::new(), "Nothing", &mut store).unwrap();
    assert!(!history.can_undo());
}

#[test]
fn test_batch_is_one_entry() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();
    let commands = vec![
        Command::add_seat(Seat::new(10, 1, Point::new(20.0, 20.0), "A", 2)),
        Command::add_seat(Seat::new(11, 1, Point::new(30.0, 20.0), "A", 3)),
        Command::add_seat(Seat::new(12, 1, Point::new(40.0, 20.0), "A", 4)),
    ];
    history.execute_batch(commands, "Place 3 seats", &mut store).unwrap();
    assert_eq!(store.seat_count(), 4);
    assert_eq!(history.undo_depth(), 1);

    history.undo(&mut store).unwrap();
    assert_eq!(store.seat_count(), 1);
}

#[test]
fn test_entries_carry_ids_and_timestamps() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();
    history
        .execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store)
        .unwrap();
    history
        .execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store)
        .unwrap();
    let entries: Vec<_> = history.entries().collect();
    assert_ne!(entries[0].id(), entries[1].id());
    assert!(entries[0].timestamp <= entries[1].timestamp);
}

#[test]
fn test_clear() {
    let mut store = store_with_section();
    let mut history = HistoryManager::default();
    history
        .execute(Command::translate(&store, &[1], &[], 1.0, 0.0), &mut store)
        .unwrap();
    history.undo(&mut store).unwrap();
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[derive(Debug, Clone)]
enum Step {
    Move(f64, f64),
    Rotate(f64),
    AddSeat(f64, f64),
    DeleteSection,
    Rename,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (-50.0f64..50.0, -50.0f64..50.0).prop_map(|(dx, dy)| Step::Move(dx, dy)),
        (-180.0f64..180.0).prop_map(Step::Rotate),
        (0.0f64..100.0, 0.0f64..100.0).prop_map(|(x, y)| Step::AddSeat(x, y)),
        Just(Step::DeleteSection),
        Just(Step::Rename),
    ]
}

fn build(store: &mut VenueStore, step: &Step) -> Command {
    match step {
        Step::Move(dx, dy) => Command::translate(store, &[1], &[2], *dx, *dy),
        Step::Rotate(degrees) => {
            Command::rotate(store, &[1], &[], Point::new(50.0, 50.0), *degrees)
        }
        Step::AddSeat(x, y) => {
            let id = store.generate_id();
            Command::add_seat(Seat::new(id, 1, Point::new(*x, *y), "B", 1))
        }
        Step::DeleteSection => Command::delete_section(1),
        Step::Rename => {
            let mut props = store.section(1).map(|s| s.properties()).unwrap_or_else(|| {
                square(1, 0.0, 0.0).properties()
            });
            props.name.push('!');
            Command::update_section(store, 1, props)
                .unwrap_or_else(|| Command::batch("Empty", Vec::new()))
        }
    }
}

proptest! {
    #[test]
    fn undo_restores_and_redo_reapplies_exactly(steps in prop::collection::vec(step(), 1..12)) {
        let mut store = store_with_section();
        let mut history = HistoryManager::new(100);
        let mut states = vec![store.clone()];

        for s in &steps {
            let cmd = build(&mut store, s);
            if history.execute(cmd, &mut store).is_ok() {
                states.push(store.clone());
            }
        }

        let executed = states.len() - 1;
        for i in (0..executed).rev() {
            prop_assert!(history.undo(&mut store).unwrap());
            prop_assert_eq!(store.sections(), states[i].sections());
        }
        prop_assert!(!history.undo(&mut store).unwrap());

        for i in 1..=executed {
            prop_assert!(history.redo(&mut store).unwrap());
            prop_assert_eq!(store.sections(), states[i].sections());
        }
        prop_assert!(!history.redo(&mut store).unwrap());
    }
}
