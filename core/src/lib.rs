//! Board generation and click sequencing for the matching game, free of any
//! toolkit so it can be driven headless.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod timer;
pub mod types;

pub use board::{Board, Cell};
pub use config::GameConfig;
pub use error::{ConfigError, GameError, Result};
pub use game::{ClickOutcome, Game, GameSummary, Phase};
pub use timer::{HideTicket, HideTimer, ManualTimer};
pub use types::{GridSize, Position, Symbol, TileColor, TileStatus};
