use grid_path_editor::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const TICK: Duration = DEFAULT_REVEAL_INTERVAL;

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

fn editor_with_endpoints(
    rows: usize,
    cols: usize,
    start: Coordinate,
    end: Coordinate,
) -> PathEditor {
    let mut editor = PathEditor::new(GridConfig::new(rows, cols)).unwrap();
    editor.set_mode(Mode::Start);
    assert!(editor.on_cell_clicked(start).is_some());
    editor.set_mode(Mode::End);
    assert!(editor.on_cell_clicked(end).is_some());
    editor.set_mode(Mode::Obstacle);
    editor
}

fn record(editor: &mut PathEditor) -> Rc<RefCell<Vec<GridEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    editor.subscribe(move |e| sink.borrow_mut().push(*e));
    events
}

#[test]
fn wall_scenario_routes_around_bottom_row() {
    let mut editor = editor_with_endpoints(5, 5, c(0, 0), c(4, 4));
    for row in 0..4 {
        editor.on_cell_clicked(c(row, 2));
    }
    let RunOutcome::Started { steps, .. } = editor.run_search() else {
        panic!("expected a path");
    };
    assert_eq!(steps + 1, 9);
    editor.advance(TICK * 9);
    let grid = editor.grid();
    assert_eq!(grid.path_len(), 9);
    assert!(grid.is_path(c(4, 2)));
    for row in 0..4 {
        assert!(!grid.is_path(c(row, 2)));
    }
    println!("{grid}");
}

#[test]
fn obstacle_on_start_is_rejected() {
    let mut editor = editor_with_endpoints(3, 3, c(1, 1), c(2, 2));
    let events = record(&mut editor);
    assert_eq!(editor.on_cell_clicked(c(1, 1)), None);
    assert_eq!(editor.grid().start(), Some(c(1, 1)));
    assert!(!editor.grid().is_obstacle(&c(1, 1)));
    assert!(events.borrow().is_empty());
}

#[test]
fn run_without_start_asks_for_both_points() {
    let mut editor = PathEditor::new(GridConfig::new(3, 3)).unwrap();
    editor.set_mode(Mode::End);
    editor.on_cell_clicked(c(2, 2));
    let events = record(&mut editor);
    assert!(matches!(editor.run_search(), RunOutcome::MissingEndpoints));
    assert!(!editor.is_revealing());
    assert_eq!(
        *events.borrow(),
        vec![GridEvent::Notice(Notice::EndpointsRequired)]
    );
    assert_eq!(
        Notice::EndpointsRequired.to_string(),
        "Set both a start and an end point first."
    );
}

#[test]
fn enclosed_end_reports_no_path() {
    // |S...|
    // |..#.|
    // |.#E#|
    // |..#.|
    let mut editor = editor_with_endpoints(4, 4, c(0, 0), c(2, 2));
    for blocked in [c(1, 2), c(2, 1), c(2, 3), c(3, 2)] {
        editor.on_cell_clicked(blocked);
    }
    let events = record(&mut editor);
    assert!(matches!(editor.run_search(), RunOutcome::NoPathFound));
    assert_eq!(*events.borrow(), vec![GridEvent::Notice(Notice::NoPathFound)]);
    assert_eq!(editor.advance(TICK * 10), 0);
    assert_eq!(editor.grid().path_len(), 0);
}

#[test]
fn second_run_cancels_first_reveal() {
    let mut editor = editor_with_endpoints(6, 6, c(0, 0), c(0, 5));
    let RunOutcome::Started { handle: first, .. } = editor.run_search() else {
        panic!("expected a path");
    };
    editor.advance(TICK * 2);
    assert_eq!(editor.grid().path_len(), 2);

    // Reroute: move the end to the far corner and search again mid-reveal.
    editor.set_mode(Mode::End);
    editor.on_cell_clicked(c(5, 0));
    let events = record(&mut editor);
    let RunOutcome::Started { steps, .. } = editor.run_search() else {
        panic!("expected a path");
    };
    assert!(first.is_cancelled());
    assert_eq!(editor.grid().path_len(), 0);
    editor.advance(TICK * 20);

    let revealed: Vec<Coordinate> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            GridEvent::PathRevealed(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(revealed.len(), steps + 1);
    assert_eq!(revealed.last(), Some(&c(5, 0)));
    // Only cells of the second path are flagged.
    assert_eq!(editor.grid().path_len(), steps + 1);
    assert!(!editor.grid().is_path(c(0, 5)));
    assert_eq!(
        events
            .borrow()
            .iter()
            .filter(|e| **e == GridEvent::RevealFinished)
            .count(),
        1
    );
}

#[test]
fn reset_cancels_reveal_and_clears_everything() {
    let mut editor = editor_with_endpoints(4, 4, c(0, 0), c(3, 3));
    editor.on_cell_clicked(c(1, 1));
    editor.run_search();
    editor.advance(TICK * 3);
    let events = record(&mut editor);
    editor.reset();
    assert!(!editor.is_revealing());
    assert_eq!(editor.advance(TICK * 10), 0);
    let once = editor.snapshot();
    editor.reset();
    assert_eq!(editor.snapshot(), once);
    assert_eq!(once, GridModel::new(4, 4).snapshot());
    assert_eq!(
        *events.borrow(),
        vec![GridEvent::GridReset, GridEvent::GridReset]
    );
    // The mode survives a reset.
    assert_eq!(editor.mode(), Mode::Obstacle);
}

#[test]
fn canvas_clicks_map_to_cells() {
    let config = GridConfig::from_canvas(400, 400, DEFAULT_CELL_SIZE).unwrap();
    let mut editor = PathEditor::new(config.clone()).unwrap();
    let cell = config.cell_at(95, 15).unwrap();
    assert_eq!(cell, c(0, 2));
    editor.on_cell_clicked(cell);
    assert_eq!(editor.grid().kind(cell), Some(CellKind::Obstacle));
    assert_eq!(config.cell_at(400, 15), None);
}

#[test]
fn reveal_timing() {
    let mut editor = editor_with_endpoints(1, 4, c(0, 0), c(0, 3));
    editor.run_search();
    assert_eq!(editor.until_next_reveal(), Some(TICK));
    assert_eq!(editor.advance(TICK / 2), 0);
    assert_eq!(editor.until_next_reveal(), Some(TICK / 2));
    assert_eq!(editor.advance(TICK / 2), 1);
    assert_eq!(editor.advance(TICK * 3), 3);
    assert_eq!(editor.until_next_reveal(), None);
    assert!(!editor.cancel_reveal());
}
