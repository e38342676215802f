//! # Crossword Input
//!
//! Host-side collaborators of the crossword grid.
//!
//! ## Philosophy
//!
//! - **Snapshots, not keystrokes**: Soft keyboards report text, not keys, so
//!   typing is recovered by diffing a hidden field's contents
//! - **Keys as values**: Hardware keys arrive as a platform-independent [`Key`]
//! - **Storage behind a trait**: Saved progress goes through [`LetterStore`],
//!   so tests run against memory and hosts against whatever they have
//!
//! ## Design
//!
//! - [`GridInput`] turns clicks, field contents and keys into grid operations
//!   and tells the host what to do next through [`InputOutcome`]
//! - [`InputConfig`] carries the tunables, loadable from JSON
//! - `persistence` saves solving progress and construction drafts

pub mod config;
pub mod error;
pub mod input;
pub mod key;
pub mod persistence;
pub mod store;

pub use config::InputConfig;
pub use error::{StoreError, StoreResult};
pub use input::{GridInput, InputOutcome};
pub use key::Key;
pub use persistence::{clear_draft, load_draft, load_letters, save_draft, save_letters, Draft};
pub use store::{FileStore, LetterStore, MemoryStore};
