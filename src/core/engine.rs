use std::fmt::Display;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::definitions::MoveError;
use crate::core::utils::{
    between_in_row, in_direction, Square, BISHOP_DIR, KING_MOVES, KNIGHT_MOVES, QUEEN_DIR,
    ROOK_DIR,
};

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    #[default]
    White,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /** row step of a pawn push */
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> usize {
        self.opposite().back_row()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may become, in the order a chooser offers them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        PieceKind::PROMOTIONS.contains(&self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            has_moved: false,
        }
    }

    /** Letter of layout notation: uppercase for white. */
    pub fn letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// Side effects of [`Board::execute`] beyond relocating the moving piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Executed {
    pub captured: Option<Piece>,
    /** square skipped by a pawn double step, valid for the next ply only */
    pub en_passant_target: Option<Square>,
    /** pawn landed on its last rank and needs a new kind */
    pub promotion: Option<Square>,
}

/** 8x8 grid, row 0 is rank 8. Cheap to copy. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn new() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.cells[square.row()][square.col()] = Some(piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()].take()
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn king_square(&self, color: Color) -> Result<Square, MoveError> {
        self.iter_pieces()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(square, _)| square)
            .ok_or(MoveError::MissingKing(color))
    }

    /// Candidate destinations of the piece on `from`, ignoring self-check and castling.
    pub fn pseudo_moves(&self, from: Square, en_passant: Option<Square>) -> Vec<Square> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        let mut moves = Vec::with_capacity(28);
        match piece.kind {
            PieceKind::Pawn => {
                let forward = piece.color.forward();
                if let Some(front) = from.offset(forward, 0) {
                    if self.get(front).is_none() {
                        moves.push(front);
                        if from.row() == piece.color.pawn_row() {
                            if let Some(double) = front.offset(forward, 0) {
                                if self.get(double).is_none() {
                                    moves.push(double);
                                }
                            }
                        }
                    }
                }
                for target in [-1, 1].iter().filter_map(|d_col| from.offset(forward, *d_col)) {
                    match self.get(target) {
                        Some(other) if other.color != piece.color => moves.push(target),
                        None if Some(target) == en_passant => moves.push(target),
                        _ => (),
                    }
                }
            }
            PieceKind::Knight | PieceKind::King => {
                let offsets = if piece.kind == PieceKind::Knight {
                    KNIGHT_MOVES
                } else {
                    KING_MOVES
                };
                for target in offsets
                    .iter()
                    .filter_map(|(d_row, d_col)| from.offset(*d_row, *d_col))
                {
                    match self.get(target) {
                        Some(other) if other.color == piece.color => (),
                        _ => moves.push(target),
                    }
                }
            }
            // Sliding pieces
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let directions = match piece.kind {
                    PieceKind::Bishop => BISHOP_DIR,
                    PieceKind::Rook => ROOK_DIR,
                    _ => QUEEN_DIR,
                };
                for dir in directions {
                    for target in in_direction(from, *dir) {
                        match self.get(target) {
                            None => moves.push(target),
                            Some(other) if other.color != piece.color => {
                                moves.push(target);
                                break;
                            }
                            Some(_) => break,
                        }
                    }
                }
            }
        }
        moves
    }

    fn attacks(&self, from: Square, piece: Piece, target: Square) -> bool {
        match piece.kind {
            // pushes never capture, diagonals threaten even when empty
            PieceKind::Pawn => [-1, 1]
                .iter()
                .filter_map(|d_col| from.offset(piece.color.forward(), *d_col))
                .any(|square| square == target),
            _ => self.pseudo_moves(from, None).contains(&target),
        }
    }

    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        self.iter_pieces()
            .filter(|(_, piece)| piece.color == by)
            .any(|(from, piece)| self.attacks(from, piece, target))
    }

    pub fn is_checked(&self, color: Color) -> Result<bool, MoveError> {
        let king = self.king_square(color)?;
        Ok(self.is_attacked(king, color.opposite()))
    }

    /** Relocation plus en passant removal only, on a copy. */
    fn simulate(&self, from: Square, to: Square, en_passant: Option<Square>) -> Board {
        let mut board = *self;
        if let Some(piece) = board.remove(from) {
            if piece.kind == PieceKind::Pawn && Some(to) == en_passant {
                board.remove(Square::at(from.row() as u8, to.col() as u8));
            }
            board.place(to, piece);
        }
        board
    }

    /// Destinations of the piece on `from` that don't leave its king attacked.
    pub fn legal_moves(
        &self,
        from: Square,
        en_passant: Option<Square>,
    ) -> Result<Vec<Square>, MoveError> {
        let Some(piece) = self.get(from) else {
            return Ok(Vec::new());
        };
        let mut moves = Vec::new();
        for to in self.pseudo_moves(from, en_passant) {
            if !self.simulate(from, to, en_passant).is_checked(piece.color)? {
                moves.push(to);
            }
        }
        if piece.kind == PieceKind::King {
            moves.extend(self.castling_moves(from, piece));
        }
        Ok(moves)
    }

    fn castling_moves(&self, from: Square, king: Piece) -> Vec<Square> {
        let back = king.color.back_row() as u8;
        let opponent = king.color.opposite();
        if king.has_moved || from != Square::at(back, 4) || self.is_attacked(from, opponent) {
            return Vec::new();
        }
        // (rook file, king destination file, file the king crosses)
        [(7, 6, 5), (0, 2, 3)]
            .into_iter()
            .filter(|&(rook_col, dest_col, transit_col)| {
                let rook_square = Square::at(back, rook_col);
                let rook_ready = matches!(
                    self.get(rook_square),
                    Some(rook) if rook.kind == PieceKind::Rook
                        && rook.color == king.color
                        && !rook.has_moved
                );
                rook_ready
                    && between_in_row(from, rook_square).all(|square| self.get(square).is_none())
                    && !self.is_attacked(Square::at(back, transit_col), opponent)
                    && !self.is_attacked(Square::at(back, dest_col), opponent)
            })
            .map(|(_, dest_col, _)| Square::at(back, dest_col))
            .collect()
    }

    pub fn all_legal_moves(
        &self,
        color: Color,
        en_passant: Option<Square>,
    ) -> Result<Vec<(Square, Square)>, MoveError> {
        let mut moves = Vec::new();
        for (from, _) in self.iter_pieces().filter(|(_, piece)| piece.color == color) {
            moves.extend(
                self.legal_moves(from, en_passant)?
                    .into_iter()
                    .map(|to| (from, to)),
            );
        }
        Ok(moves)
    }

    pub fn has_legal_move(
        &self,
        color: Color,
        en_passant: Option<Square>,
    ) -> Result<bool, MoveError> {
        for (from, _) in self.iter_pieces().filter(|(_, piece)| piece.color == color) {
            if !self.legal_moves(from, en_passant)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether the piece on `from` is a pawn that lands on its last rank at `to`.
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        matches!(
            self.get(from),
            Some(piece) if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row()
        )
    }

    /** Execute move mechanics without checking legality. */
    pub fn execute(
        &mut self,
        from: Square,
        to: Square,
        en_passant: Option<Square>,
    ) -> Result<Executed, MoveError> {
        let promotes = self.is_promotion(from, to);
        let mut piece = self.remove(from).ok_or(MoveError::NoPiece(from))?;
        let mut executed = Executed {
            captured: self.get(to),
            ..Default::default()
        };
        if piece.kind == PieceKind::Pawn && Some(to) == en_passant && executed.captured.is_none() {
            // the jumped pawn sits beside the mover, not on the target
            executed.captured = self.remove(Square::at(from.row() as u8, to.col() as u8));
            trace!("En passant on {to} removed {:?}", executed.captured);
        }
        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let (rook_from, rook_to) = if to.col() > from.col() { (7, 5) } else { (0, 3) };
            let row = from.row() as u8;
            if let Some(mut rook) = self.remove(Square::at(row, rook_from)) {
                rook.has_moved = true;
                self.place(Square::at(row, rook_to), rook);
            }
        }
        if piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            executed.en_passant_target = Square::new((from.row() + to.row()) / 2, from.col());
        }
        piece.has_moved = true;
        self.place(to, piece);
        if promotes {
            executed.promotion = Some(to);
        }
        Ok(executed)
    }

    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), MoveError> {
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        match self.cells[square.row()][square.col()].as_mut() {
            Some(piece) if piece.kind == PieceKind::Pawn => {
                piece.kind = kind;
                Ok(())
            }
            _ => Err(MoveError::NoPiece(square)),
        }
    }
}

impl Default for Board {
    /** Standard initial position. */
    fn default() -> Self {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Board::new();
        for (col, kind) in BACK.into_iter().enumerate() {
            let col = col as u8;
            board.place(Square::at(0, col), Piece::new(Color::Black, kind));
            board.place(Square::at(1, col), Piece::new(Color::Black, PieceKind::Pawn));
            board.place(Square::at(6, col), Piece::new(Color::White, PieceKind::Pawn));
            board.place(Square::at(7, col), Piece::new(Color::White, kind));
        }
        board
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let cell = self
                    .get(Square::at(row, col))
                    .map(|piece| piece.glyph())
                    .unwrap_or('·');
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
