pub mod catalog;
pub mod config;
pub mod core;
pub mod puzzle;
pub mod replay;
pub mod utils;

// module re-exports
pub use crate::core::definitions::{
    Cell, Figure, GameStatus, Interaction, MatchInterface, MoveError, NotationError, PlyState,
    Selection, SetupError,
};
pub use crate::core::engine::{Board, Color, Piece, PieceKind};
pub use crate::core::game::{Game, PromotionPolicy};
pub use crate::core::notation::import;
pub use crate::core::utils::Square;
pub use crate::puzzle::{PuzzleNavigator, PuzzleSession, PuzzleStatus};
pub use crate::replay::{build_replay, Replay, ReplayViewer, Snapshot};
