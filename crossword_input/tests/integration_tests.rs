//! Integration tests for the crossword input bridge
//!
//! These tests drive complete solving and construction sessions through the
//! same calls a host makes: clicks, hidden-field contents and key codes.

use std::cell::RefCell;
use std::rc::Rc;

use crossword_core::{
    blank_clues, enumeration, renumber_clues, Direction, Grid, GridOptions, Ipuz, Position,
};
use crossword_input::{
    load_draft, load_letters, save_draft, save_letters, Draft, FileStore, GridInput, InputConfig,
    InputOutcome, Key, LetterStore, MemoryStore,
};
use tempfile::TempDir;

const FIG: &str = r##"{
    "version": "http://ipuz.org/v2",
    "kind": ["http://ipuz.org/crossword#1"],
    "dimensions": {"width": 3, "height": 3},
    "showenumerations": true,
    "puzzle": [[1, 0, 2], [0, "#", 0], [3, 0, 0]],
    "solution": [["F", "I", "G"], [0, "#", "A"], [0, 0, "S"]],
    "clues": {
        "Across": [{"number": 1, "clue": "Fruit", "enumeration": "3"}],
        "Down": [{"number": 2, "clue": "Vapours", "enumeration": "3"}]
    }
}"##;

/// 5x5 grid with blocks where both coordinates are odd
fn keep_evens() -> Grid {
    let blocks: Vec<Vec<bool>> = (0..5)
        .map(|y| (0..5).map(|x| x % 2 == 1 && y % 2 == 1).collect())
        .collect();
    Grid::from_blocks(&blocks).unwrap()
}

/// Type `text` into the hidden field the way a soft keyboard would
fn type_text(input: &mut GridInput, grid: &mut Grid, text: &str) -> InputOutcome {
    let raw = format!("{}{}", input.buffer(), text);
    input.on_input(grid, &raw)
}

/// Press backspace `count` times in the hidden field
fn backspace(input: &mut GridInput, grid: &mut Grid, count: usize) -> InputOutcome {
    let kept = input.buffer().chars().count().saturating_sub(count);
    let raw: String = input.buffer().chars().take(kept).collect();
    input.on_input(grid, &raw)
}

fn press(input: &mut GridInput, grid: &mut Grid, code: u32, shift: bool) -> InputOutcome {
    match Key::from_key_code(code, shift) {
        Some(key) => input.on_key(grid, key),
        None => InputOutcome::PassThrough,
    }
}

#[test]
fn test_solve_session() {
    let config = InputConfig::default();
    let mut store = MemoryStore::new();
    let mut grid = Grid::solver_from_ipuz(&Ipuz::from_json(FIG).unwrap()).unwrap();
    let mut input = GridInput::new(config.clone());

    // Click 1 across and type a wrong answer
    assert_eq!(input.on_click(&mut grid, 0, 0), InputOutcome::Moved);
    let outcome = type_text(&mut input, &mut grid, "fit");
    assert!(outcome.needs_save());
    save_letters(&mut store, &config, &grid, 1).unwrap();
    assert_eq!(store.load("puzzle1").unwrap().as_deref(), Some("FIT....."));

    // Check clears only the wrong letter
    assert_eq!(grid.check_answer(), 1);
    assert!(!grid.is_active());
    assert_eq!(grid.active_entry_text(), "");

    // 2 down only runs one way
    input.on_click(&mut grid, 2, 0);
    assert_eq!(grid.active_direction(), Some(Direction::Down));
    type_text(&mut input, &mut grid, "gas");
    assert_eq!(grid.export_letters(), "FIG.A..S");

    // Return deactivates
    assert_eq!(press(&mut input, &mut grid, 13, false), InputOutcome::Deactivated);
    save_letters(&mut store, &config, &grid, 1).unwrap();

    // A new session picks up where this one stopped
    let mut resumed = Grid::solver_from_ipuz(&Ipuz::from_json(FIG).unwrap()).unwrap();
    assert!(load_letters(&store, &config, &mut resumed, 1).unwrap());
    assert_eq!(resumed.export_letters(), "FIG.A..S");
    assert_eq!(resumed.check_all(), 0);

    // Clearing everything removes the saved key
    resumed.clear_all();
    save_letters(&mut store, &config, &resumed, 1).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_delete_text_cursor_positions() {
    let mut grid = keep_evens();
    let mut input = GridInput::new(InputConfig::default());
    input.on_click(&mut grid, 0, 0);

    type_text(&mut input, &mut grid, "ABCDE");
    assert_eq!(grid.target(), Some(Position::new(4, 0)));

    backspace(&mut input, &mut grid, 1);
    assert_eq!(grid.active_entry_text(), "ABCD.");
    assert_eq!(grid.target(), Some(Position::new(4, 0)));

    backspace(&mut input, &mut grid, 1);
    assert_eq!(grid.active_entry_text(), "ABC..");
    assert_eq!(grid.target(), Some(Position::new(3, 0)));

    backspace(&mut input, &mut grid, 3);
    assert_eq!(grid.active_entry_text(), ".....");
    assert_eq!(grid.target(), Some(Position::new(0, 0)));

    // Further backspaces stay on the first cell
    backspace(&mut input, &mut grid, 2);
    assert_eq!(grid.target(), Some(Position::new(0, 0)));
}

#[test]
fn test_batched_input_event() {
    // One input event can carry several keystrokes
    let mut batched = keep_evens();
    let mut single = keep_evens();
    let mut batched_input = GridInput::new(InputConfig::default());
    let mut single_input = GridInput::new(InputConfig::default());
    batched_input.on_click(&mut batched, 2, 0);
    single_input.on_click(&mut single, 2, 0);

    type_text(&mut batched_input, &mut batched, "RADIO");
    for ch in "RADIO".chars() {
        type_text(&mut single_input, &mut single, &ch.to_string());
    }

    assert_eq!(batched.snapshot(), single.snapshot());
    assert_eq!(batched.active_entry_text(), "RADIO");
}

#[test]
fn test_autocorrect_replacement() {
    // A soft keyboard rewriting the last word delivers a same-length change
    let mut grid = keep_evens();
    let mut input = GridInput::new(InputConfig::default());
    input.on_click(&mut grid, 0, 2);
    type_text(&mut input, &mut grid, "TEH");

    let raw = input.buffer().replacen("TEH", "THE", 1);
    input.on_input(&mut grid, &raw);
    assert_eq!(grid.active_entry_text(), "THE..");
    assert_eq!(grid.target(), Some(Position::new(3, 2)));
}

#[test]
fn test_keyboard_navigation() {
    let mut grid = keep_evens();
    let mut input = GridInput::new(InputConfig::default());

    // Keys do nothing until an entry is active
    assert_eq!(press(&mut input, &mut grid, 9, false), InputOutcome::Ignored);

    input.on_click(&mut grid, 2, 2);
    assert_eq!(grid.active().anchor, Position::new(0, 2));

    assert_eq!(press(&mut input, &mut grid, 9, false), InputOutcome::Moved);
    assert_eq!(grid.active().anchor, Position::new(0, 4));
    press(&mut input, &mut grid, 9, false);
    assert_eq!(grid.active_direction(), Some(Direction::Down));
    assert_eq!(grid.active().anchor, Position::new(0, 0));

    press(&mut input, &mut grid, 9, true);
    assert_eq!(grid.active_direction(), Some(Direction::Across));
    assert_eq!(grid.active().anchor, Position::new(0, 4));

    // Right arrow walks the target, left at the edge is ignored
    press(&mut input, &mut grid, 39, false);
    assert_eq!(grid.target(), Some(Position::new(1, 4)));
    press(&mut input, &mut grid, 37, false);
    press(&mut input, &mut grid, 37, false);
    assert_eq!(grid.target(), Some(Position::new(0, 4)));

    // Up turns the entry down
    press(&mut input, &mut grid, 38, false);
    assert_eq!(grid.active_direction(), Some(Direction::Down));
    assert_eq!(grid.target(), Some(Position::new(0, 3)));

    assert_eq!(press(&mut input, &mut grid, 27, false), InputOutcome::Deactivated);
    assert_eq!(press(&mut input, &mut grid, 40, false), InputOutcome::Ignored);
}

#[test]
fn test_change_notifications() {
    let mut grid = keep_evens();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.set_listener(move |kind| sink.borrow_mut().push(kind.as_str()));
    let mut input = GridInput::new(InputConfig::default());

    input.on_click(&mut grid, 0, 0);
    type_text(&mut input, &mut grid, "A");
    assert_eq!(*events.borrow(), vec!["move", "move", "text"]);

    // The cursor is already on (1, 0) across and down is not available there
    input.on_click(&mut grid, 1, 0);
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn test_construction_session() {
    let config = InputConfig::default();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drafts.json");

    let mut grid = keep_evens().with_options(GridOptions { editable: true });
    let data = grid.clue_data();
    let mut across = blank_clues(&data.across);
    let down = blank_clues(&data.down);

    // Accept a suggestion for 1 across and write its clue
    grid.activate_clicked(1, 0);
    grid.set_active_entry("SALSA");
    across[grid.active_index().unwrap()].text = "Dance".to_string();
    across[0].enumeration = enumeration("SALSA");

    // Split the middle row and carry the clues over
    grid.toggle_cell(2, 2).unwrap();
    let across = renumber_clues(&across, &grid.clue_positions(Direction::Across), Direction::Across);
    let down = renumber_clues(&down, &grid.clue_positions(Direction::Down), Direction::Down);
    assert_eq!(across.len(), 4);
    assert_eq!(down.len(), 4);
    assert_eq!(across[0].text, "Dance");

    {
        let mut store = FileStore::open(&path, config.expiry_days).unwrap();
        save_draft(&mut store, &config, &Draft { grid, across, down }).unwrap();
    }

    let store = FileStore::open(&path, config.expiry_days).unwrap();
    let draft = load_draft(&store, &config).unwrap().unwrap();
    assert!(draft.grid.is_editable());
    assert!(!draft.grid.is_light(Position::new(2, 2)));
    assert_eq!(draft.grid.export_letters().chars().take(5).collect::<String>(), "SALSA");
    assert_eq!(draft.across[0].text, "Dance");
    assert_eq!(draft.down.len(), 4);

    // The saved document reads back as a plain ipuz puzzle
    let json = store.load(&config.draft_name).unwrap().unwrap();
    let ipuz = Ipuz::from_json(&json).unwrap();
    assert_eq!(
        ipuz.answer(&ipuz.clues.across[0], Direction::Across).as_deref(),
        Some("SALSA")
    );
}
