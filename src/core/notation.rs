use log::debug;

use crate::core::definitions::NotationError;
use crate::core::engine::{Board, Color, Piece, PieceKind};
use crate::core::utils::Square;

/// Parses the board field of a FEN-like layout, e.g. `"4k3/8/8/8/8/8/8/4K3"`.
///
/// Every imported piece counts as already moved: the notation carries no
/// history, so castling is never available on an imported board.
pub fn import(notation: &str) -> Result<Board, NotationError> {
    let layout = notation
        .split_whitespace()
        .next()
        .ok_or(NotationError::Empty)?;
    let ranks: Vec<&str> = layout.split('/').collect();
    if ranks.len() != 8 {
        return Err(NotationError::RankCount(ranks.len()));
    }
    let mut board = Board::new();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for symbol in rank.chars() {
            if let Some(empty) = symbol.to_digit(10) {
                col += empty as usize;
                continue;
            }
            let kind = PieceKind::from_letter(symbol).ok_or(NotationError::UnknownSymbol(symbol))?;
            let color = if symbol.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let square = Square::new(row, col).ok_or(NotationError::RankWidth {
                rank: 8 - row,
                files: col + 1,
            })?;
            board.place(
                square,
                Piece {
                    color,
                    kind,
                    has_moved: true,
                },
            );
            col += 1;
        }
        if col != 8 {
            return Err(NotationError::RankWidth {
                rank: 8 - row,
                files: col,
            });
        }
    }
    debug!("Imported layout '{layout}'");
    Ok(board)
}

/// Side to move from the optional second field; white when absent.
pub fn side_to_move(notation: &str) -> Result<Color, NotationError> {
    match notation.split_whitespace().nth(1) {
        None | Some("w") => Ok(Color::White),
        Some("b") => Ok(Color::Black),
        Some(other) => Err(NotationError::InvalidSide(other.to_owned())),
    }
}

/// Board field of the layout notation for `board`.
pub fn export(board: &Board) -> String {
    let mut layout = String::with_capacity(72);
    for row in 0..8 {
        let mut empty = 0;
        for col in 0..8 {
            match Square::new(row, col).and_then(|square| board.get(square)) {
                Some(piece) => {
                    if empty > 0 {
                        layout.push_str(&empty.to_string());
                        empty = 0;
                    }
                    layout.push(piece.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            layout.push_str(&empty.to_string());
        }
        if row < 7 {
            layout.push('/');
        }
    }
    layout
}
