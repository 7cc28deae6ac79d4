use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load sprite {path:?}")]
    Sprite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sprite {0:?} contains no glyphs")]
    EmptySprite(PathBuf),

    #[error("invalid game config: {0}")]
    InvalidConfig(&'static str),

    /// The terminal cannot fit the bordered play area.
    #[error("terminal is {actual:?} cells, need at least {needed:?}")]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
