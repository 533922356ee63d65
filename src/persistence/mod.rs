//! Whole-document save files and the lenient readers behind them

pub mod lenient;
mod save;

pub use save::{SaveError, SaveFile, SaveGame};
