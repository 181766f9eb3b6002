use grid_path_editor::{Coordinate, GridConfig, GridEvent, Mode, PathEditor, RunOutcome};
use std::thread;

// In this example a path is found on a 6x8 grid with shape
//  ________
// |S  #    |
// |   #    |
// |   #  # |
// |   #  # |
// |      #E|
// |      # |
//  ________
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// The path is then revealed one cell per tick and the grid is printed after every step.

fn main() {
    let mut editor = PathEditor::new(GridConfig::new(6, 8)).unwrap();
    for row in 0..4 {
        editor.on_cell_clicked(Coordinate::new(row, 3));
    }
    for row in 2..6 {
        editor.on_cell_clicked(Coordinate::new(row, 6));
    }
    editor.set_mode(Mode::Start);
    editor.on_cell_clicked(Coordinate::new(0, 0));
    editor.set_mode(Mode::End);
    editor.on_cell_clicked(Coordinate::new(4, 7));
    println!("{}", editor.grid());

    editor.subscribe(|event| match event {
        GridEvent::PathRevealed(c) => println!("Revealed {c}"),
        GridEvent::RevealFinished => println!("Done"),
        GridEvent::Notice(notice) => println!("{notice}"),
        _ => {}
    });

    match editor.run_search() {
        RunOutcome::Started { steps, .. } => println!("Path of {steps} steps found"),
        _ => return,
    }
    while let Some(wait) = editor.until_next_reveal() {
        thread::sleep(wait);
        editor.advance(wait);
        println!("{}", editor.grid());
    }
}
