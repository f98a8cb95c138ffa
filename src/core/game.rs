use log::{debug, trace, warn};

use crate::core::definitions::{GameStatus, MatchInterface, MoveError, PlyState, SetupError};
use crate::core::engine::{Board, Color, PieceKind};
use crate::core::notation;
use crate::core::utils::Square;

/// How a pawn reaching its last rank is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromotionPolicy {
    /// Suspend until [`Game::promote`] supplies the kind.
    #[default]
    Ask,
    /// Scripted and puzzle play: always a queen, no suspension.
    AutoQueen,
}

/// One live game: the position plus everything needed to continue it.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
    last_move: Option<(Square, Square)>,
    status: GameStatus,
    ply: PlyState,
    policy: PromotionPolicy,
    history: Vec<(Square, Square)>,
}

impl Game {
    pub fn new(board: Board) -> Result<Game, MoveError> {
        Game::with_player(board, Color::White)
    }

    pub fn with_player(board: Board, player: Color) -> Result<Game, MoveError> {
        let mut game = Game {
            board,
            turn: player,
            ..Default::default()
        };
        game.status = game.classify()?;
        if game.status.is_terminal() {
            game.ply = PlyState::Resolved;
        }
        Ok(game)
    }

    /// Position from layout notation, with an optional `w`/`b` side field.
    pub fn from_notation(layout: &str) -> Result<Game, SetupError> {
        let board = notation::import(layout)?;
        let player = notation::side_to_move(layout)?;
        Ok(Game::with_player(board, player)?)
    }

    pub fn with_policy(mut self, policy: PromotionPolicy) -> Game {
        self.policy = policy;
        self
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn ply_state(&self) -> PlyState {
        self.ply
    }

    pub fn history(&self) -> &[(Square, Square)] {
        &self.history
    }

    /// Status of the side to move, recomputed from the board.
    pub fn classify(&self) -> Result<GameStatus, MoveError> {
        let checked = self.board.is_checked(self.turn)?;
        let has_moves = self.board.has_legal_move(self.turn, self.en_passant)?;
        Ok(GameStatus::classify(checked, has_moves))
    }

    pub fn legal_moves(&self, from: Square) -> Result<Vec<Square>, MoveError> {
        self.board.legal_moves(from, self.en_passant)
    }

    /// Plays `from`-`to` for the side to move.
    ///
    /// The move must be one of [`Game::legal_moves`]; anything else is
    /// reported, never silently dropped. With [`PromotionPolicy::Ask`] a pawn
    /// reaching the last rank leaves the game awaiting [`Game::promote`] and
    /// the returned status is the one from before the move.
    pub fn apply(&mut self, from: Square, to: Square) -> Result<GameStatus, MoveError> {
        match self.ply {
            PlyState::AwaitingMove => (),
            PlyState::AwaitingPromotion { .. } => return Err(MoveError::PromotionPending),
            PlyState::Resolved => return Err(MoveError::GameOver),
        }
        let piece = self.board.get(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.turn {
            return Err(MoveError::WrongTurn {
                square: from,
                color: piece.color,
            });
        }
        if !self.legal_moves(from)?.contains(&to) {
            warn!("Rejected illegal move {from}-{to} for {}", self.turn);
            return Err(MoveError::IllegalMove { from, to });
        }
        let executed = self.board.execute(from, to, self.en_passant)?;
        trace!("{} {:?} {from}-{to}: {executed:?}", piece.color, piece.kind);
        self.en_passant = executed.en_passant_target;
        self.last_move = Some((from, to));
        self.history.push((from, to));
        if let Some(square) = executed.promotion {
            match self.policy {
                PromotionPolicy::Ask => {
                    debug!("Waiting for promotion choice on {square}");
                    self.ply = PlyState::AwaitingPromotion {
                        square,
                        color: piece.color,
                    };
                    return Ok(self.status);
                }
                PromotionPolicy::AutoQueen => self.board.promote(square, PieceKind::Queen)?,
            }
        }
        self.finish_ply()
    }

    /// Resolves a pending promotion with the chosen kind.
    pub fn promote(&mut self, kind: PieceKind) -> Result<GameStatus, MoveError> {
        let PlyState::AwaitingPromotion { square, .. } = self.ply else {
            return Err(MoveError::NoPromotionPending);
        };
        self.board.promote(square, kind)?;
        debug!("Pawn on {square} promoted to {kind:?}");
        self.finish_ply()
    }

    fn finish_ply(&mut self) -> Result<GameStatus, MoveError> {
        self.turn = self.turn.opposite();
        let status = self.classify()?;
        if status != self.status {
            debug!("Status {:?} -> {status:?} ({} to move)", self.status, self.turn);
        }
        self.status = status;
        self.ply = if status.is_terminal() {
            PlyState::Resolved
        } else {
            PlyState::AwaitingMove
        };
        Ok(status)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            turn: Color::White,
            en_passant: None,
            last_move: None,
            status: GameStatus::Playing,
            ply: PlyState::AwaitingMove,
            policy: PromotionPolicy::default(),
            history: Vec::new(),
        }
    }
}

impl MatchInterface for Game {
    fn board(&self) -> &Board {
        &self.board
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn current_player(&self) -> Color {
        self.turn
    }

    fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    fn pending_promotion(&self) -> Option<(Square, Color)> {
        match self.ply {
            PlyState::AwaitingPromotion { square, color } => Some((square, color)),
            _ => None,
        }
    }

    fn possible_moves(&self, square: Square) -> Result<Vec<Square>, MoveError> {
        match self.board.get(square) {
            Some(piece) if piece.color == self.turn && self.accepts_moves() => {
                self.legal_moves(square)
            }
            _ => Ok(Vec::new()),
        }
    }

    fn accepts_moves(&self) -> bool {
        self.ply == PlyState::AwaitingMove
    }
}
