//! Keystroke-buffer input bridge
//!
//! Soft keyboards deliver neither reliable key codes nor an event for a
//! backspace in an empty field. Typing therefore goes into a hidden text
//! field pre-filled with placeholders; each input event hands over the whole
//! field and the bridge diffs it against the previous contents. Hardware
//! keys that never change the field (arrows, tab, return) come in through
//! [`GridInput::on_key`].

use crossword_core::Grid;

use crate::{config::InputConfig, key::Key};

/// What the host should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing was active; the event had no effect
    Ignored,
    /// Let the key reach the text field
    PassThrough,
    /// The active entry was cleared
    Deactivated,
    /// A new entry or target is active; refill the field with [`GridInput::buffer`]
    Moved,
    /// Letters may have changed and should be saved
    Edited {
        /// The field was re-seeded and must be refilled
        reseed: bool,
    },
}

impl InputOutcome {
    pub fn needs_reseed(&self) -> bool {
        matches!(self, InputOutcome::Moved | InputOutcome::Edited { reseed: true })
    }

    pub fn needs_save(&self) -> bool {
        matches!(self, InputOutcome::Edited { .. })
    }
}

/// Bridge between a hidden text field and the grid
#[derive(Debug, Clone)]
pub struct GridInput {
    config: InputConfig,
    prev: String,
}

impl GridInput {
    pub fn new(config: InputConfig) -> Self {
        let prev = config.seed_buffer();
        Self { config, prev }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Field contents as of the last event
    pub fn buffer(&self) -> &str {
        &self.prev
    }

    /// Re-seed the field; returns the text to place in it
    pub fn reset(&mut self) -> &str {
        self.prev = self.config.seed_buffer();
        &self.prev
    }

    /// Pointer press on cell `(x, y)`
    pub fn on_click(&mut self, grid: &mut Grid, x: usize, y: usize) -> InputOutcome {
        let was_active = grid.is_active();
        if grid.activate_clicked(x, y) {
            self.reset();
            InputOutcome::Moved
        } else if was_active && !grid.is_active() {
            InputOutcome::Deactivated
        } else {
            InputOutcome::Ignored
        }
    }

    /// The hidden field now holds `raw`
    pub fn on_input(&mut self, grid: &mut Grid, raw: &str) -> InputOutcome {
        if !grid.is_active() {
            return InputOutcome::Ignored;
        }

        let current: String = raw.chars().filter(|&ch| ch != ' ').collect();
        log::trace!(
            "field changed from {} to {} chars",
            self.prev.chars().count(),
            current.chars().count()
        );
        grid.update_letters(&self.prev, &current);
        self.prev = current;
        InputOutcome::Edited { reseed: false }
    }

    /// Hardware key press
    pub fn on_key(&mut self, grid: &mut Grid, key: Key) -> InputOutcome {
        if !grid.is_active() {
            return InputOutcome::Ignored;
        }

        log::debug!("key {:?}", key);
        match key {
            Key::Tab => {
                grid.activate_next();
                self.reset();
                InputOutcome::Moved
            }
            Key::BackTab => {
                grid.activate_previous();
                self.reset();
                InputOutcome::Moved
            }
            Key::Enter | Key::Escape => {
                grid.clear_active();
                InputOutcome::Deactivated
            }
            Key::Left | Key::Right | Key::Up | Key::Down => {
                if let Some((dx, dy)) = key.arrow_delta() {
                    grid.move_target(dx, dy);
                }
                self.reset();
                InputOutcome::Moved
            }
            Key::Delete => {
                grid.delete_letter(false);
                self.reset();
                InputOutcome::Edited { reseed: true }
            }
            Key::Backspace if self.config.legacy_backspace => {
                grid.delete_letter(true);
                self.reset();
                InputOutcome::Edited { reseed: true }
            }
            Key::Backspace | Key::Char(_) => InputOutcome::PassThrough,
        }
    }
}
