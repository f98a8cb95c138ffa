use std::{fmt::Display, ops::AddAssign};

use crate::core::definitions::{GameStatus, MatchInterface, MoveError};
use crate::core::engine::PieceKind;
use crate::core::game::{Game, PromotionPolicy};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub all: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        self.all += rhs.all;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} ep: {:<4} cs: {:<4} pr: {:<4} Ch: {:<4} CM: {:4}",
            self.all,
            self.captures,
            self.en_passant,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates,
        )
    }
}

/// Counts leaf positions `depth` plies below `game`, promoting to queens only.
pub fn perft(game: &Game, depth: usize) -> Result<PerftResult, MoveError> {
    if depth == 0 {
        return Ok(PerftResult {
            all: 1,
            ..Default::default()
        });
    }
    let game = game.clone().with_policy(PromotionPolicy::AutoQueen);
    let mut total = PerftResult::default();
    for (from, to) in game
        .board()
        .all_legal_moves(game.turn(), game.en_passant_target())?
    {
        let mut child = game.clone();
        let status = child.apply(from, to)?;
        if depth > 1 {
            total += perft(&child, depth - 1)?;
            continue;
        }
        let board = game.board();
        let mover = board.get(from).ok_or(MoveError::NoPiece(from))?;
        let en_passant = Some(to) == game.en_passant_target()
            && mover.kind == PieceKind::Pawn
            && board.get(to).is_none();
        total += PerftResult {
            all: 1,
            captures: usize::from(board.get(to).is_some() || en_passant),
            en_passant: usize::from(en_passant),
            castles: usize::from(
                mover.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2,
            ),
            promotions: usize::from(
                mover.kind == PieceKind::Pawn && to.row() == mover.color.promotion_row(),
            ),
            checks: usize::from(matches!(status, GameStatus::Check | GameStatus::Checkmate)),
            checkmates: usize::from(status == GameStatus::Checkmate),
        };
    }
    Ok(total)
}
