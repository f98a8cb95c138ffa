use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::engine::{Board, Color, PieceKind};
use crate::core::utils::Square;

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceKind,
    pub color: Color,
    /** piece stands on either end of the most recent move */
    pub last_move: bool,
    /** king of the side to move while it is attacked */
    pub in_check: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Four-way classification of the side to move.
    pub fn classify(checked: bool, has_moves: bool) -> GameStatus {
        match (checked, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Playing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Per-ply state machine of a live game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlyState {
    AwaitingMove,
    /// A pawn reached the last rank and waits for the chosen piece kind.
    AwaitingPromotion { square: Square, color: Color },
    /// Terminal position reached, nothing is accepted until reset.
    Resolved,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("unknown piece symbol '{0}'")]
    UnknownSymbol(char),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files instead of 8")]
    RankWidth { rank: usize, files: usize },
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("empty notation")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no {0} king on the board")]
    MissingKing(Color),
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("piece on {square} belongs to {color}, but it is not their turn")]
    WrongTurn { square: Square, color: Color },
    #[error("{from}-{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("game is already over")]
    GameOver,
    #[error("promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Position(#[from] MoveError),
    #[error("puzzle catalog is empty")]
    EmptyCatalog,
}

/// What a rendering/input collaborator can ask of a running match.
pub trait MatchInterface {
    fn board(&self) -> &Board;
    fn status(&self) -> GameStatus;
    fn current_player(&self) -> Color;
    fn last_move(&self) -> Option<(Square, Square)>;
    fn pending_promotion(&self) -> Option<(Square, Color)>;
    /// Legal destinations of the piece on `square`; empty when it can't move now.
    fn possible_moves(&self, square: Square) -> Result<Vec<Square>, MoveError>;
    /// Whether new moves are accepted at all.
    fn accepts_moves(&self) -> bool;

    fn current_board(&self) -> Vec<Vec<Cell>> {
        Square::all()
            .collect::<Vec<_>>()
            .chunks(8)
            .map(|row| row.iter().map(|square| self.cell(*square)).collect())
            .collect()
    }

    fn cell(&self, square: Square) -> Cell {
        match self.board().get(square) {
            None => Cell::Empty,
            Some(piece) => Cell::Figure(Figure {
                kind: piece.kind,
                color: piece.color,
                last_move: self
                    .last_move()
                    .map(|(from, to)| from == square || to == square)
                    .unwrap_or(false),
                in_check: piece.kind == PieceKind::King
                    && piece.color == self.current_player()
                    && matches!(self.status(), GameStatus::Check | GameStatus::Checkmate),
            }),
        }
    }

    fn checked(&self) -> bool {
        matches!(self.status(), GameStatus::Check | GameStatus::Checkmate)
    }

    fn game_ended(&self) -> bool {
        self.status().is_terminal()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Piece picked up, its destinations are cached for hint rendering.
    Selected(Square),
    /// Second click hit a cached destination.
    Move(Square, Square),
    Cleared,
    Ignored,
}

/// Two-click move entry: select a piece, then a destination.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    selected: Option<Square>,
    destinations: Vec<Square>,
}

impl Selection {
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    pub fn click<M: MatchInterface>(
        &mut self,
        game: &M,
        square: Square,
    ) -> Result<Interaction, MoveError> {
        if !game.accepts_moves() {
            self.clear();
            return Ok(Interaction::Ignored);
        }
        let own_piece = game
            .board()
            .get(square)
            .map(|piece| piece.color == game.current_player())
            .unwrap_or(false);
        match self.selected {
            Some(from) if self.destinations.contains(&square) => {
                self.clear();
                Ok(Interaction::Move(from, square))
            }
            _ if own_piece => {
                self.destinations = game.possible_moves(square)?;
                self.selected = Some(square);
                Ok(Interaction::Selected(square))
            }
            Some(_) => {
                self.clear();
                Ok(Interaction::Cleared)
            }
            None => Ok(Interaction::Ignored),
        }
    }
}
