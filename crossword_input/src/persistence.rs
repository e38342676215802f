//! Saving solving progress and construction drafts
//!
//! Progress is the grid's compact letter string under the puzzle's storage
//! key; an empty grid removes the key instead of saving a blank string. A
//! draft is a whole ipuz document, clues included, under the draft name.

use crossword_core::{clues_from_ipuz, is_blank, Clue, Direction, Grid, GridOptions, Ipuz};

use crate::{config::InputConfig, error::StoreResult, store::LetterStore};

/// Save the letters of puzzle `number`
pub fn save_letters<S: LetterStore>(
    store: &mut S,
    config: &InputConfig,
    grid: &Grid,
    number: u32,
) -> StoreResult<()> {
    let key = config.storage_key(number);
    let letters = grid.export_letters();
    if is_blank(&letters) {
        log::info!("removing saved letters for {}", key);
        store.remove(&key)
    } else {
        log::info!("saving letters for {}", key);
        store.save(&key, &letters)
    }
}

/// Restore saved letters of puzzle `number`; returns false if none were saved
pub fn load_letters<S: LetterStore>(
    store: &S,
    config: &InputConfig,
    grid: &mut Grid,
    number: u32,
) -> StoreResult<bool> {
    let key = config.storage_key(number);
    match store.load(&key)? {
        Some(letters) => {
            log::info!("restoring letters for {}", key);
            grid.import_letters(&letters)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// A puzzle under construction
#[derive(Debug)]
pub struct Draft {
    pub grid: Grid,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

impl Draft {
    pub fn clues(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    pub fn to_ipuz(&self) -> Ipuz {
        self.grid.to_ipuz(
            self.across.iter().map(Clue::to_ipuz).collect(),
            self.down.iter().map(Clue::to_ipuz).collect(),
        )
    }
}

pub fn save_draft<S: LetterStore>(store: &mut S, config: &InputConfig, draft: &Draft) -> StoreResult<()> {
    let json = draft.to_ipuz().to_json()?;
    log::info!("saving draft {}", config.draft_name);
    store.save(&config.draft_name, &json)
}

/// Load the saved draft, if any, as an editable grid
pub fn load_draft<S: LetterStore>(store: &S, config: &InputConfig) -> StoreResult<Option<Draft>> {
    let Some(json) = store.load(&config.draft_name)? else {
        return Ok(None);
    };

    let ipuz = Ipuz::from_json(&json)?;
    let grid = Grid::from_ipuz(&ipuz)?.with_options(GridOptions { editable: true });
    let data = grid.clue_data();
    let across = clues_from_ipuz(&ipuz.clues.across, &data.across)?;
    let down = clues_from_ipuz(&ipuz.clues.down, &data.down)?;

    log::info!("loaded draft {}", config.draft_name);
    Ok(Some(Draft { grid, across, down }))
}

pub fn clear_draft<S: LetterStore>(store: &mut S, config: &InputConfig) -> StoreResult<()> {
    store.remove(&config.draft_name)
}
