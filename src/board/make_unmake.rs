//! Applying and reverting moves with exact inverse semantics.

use super::types::{CastlingRights, Color, Move, MoveKind, Piece, Square};
use super::Board;

/// Irreversible pre-move state saved by [`Board::try_make`] and consumed by
/// [`Board::unmake`]. Everything else a move changes is recoverable from
/// the move itself.
#[derive(Clone, Copy, Debug)]
pub struct UnmakeInfo {
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
}

/// Rook origin and destination for a castle, keyed on the king's
/// destination square.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    if king_to.file() == 6 {
        (Square::new(rank, 7), Square::new(rank, 5))
    } else {
        (Square::new(rank, 0), Square::new(rank, 3))
    }
}

/// One rank behind `to` from the mover's point of view: the en-passant
/// victim's square, and the skipped square of a double push.
fn square_behind(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => to.offset(-8),
        Color::Black => to.offset(8),
    }
}

impl Board {
    /// Try to play a pseudo-legal move.
    ///
    /// Applies the move, then tests the mover's king: if it is attacked the
    /// move was illegal, the board is restored to its exact prior state and
    /// `None` is returned. Otherwise the side to move flips and the
    /// irreversible state is returned for the matching [`Board::unmake`].
    #[must_use]
    pub fn try_make(&mut self, mv: Move) -> Option<UnmakeInfo> {
        let mover = self.side_to_move;
        let info = UnmakeInfo {
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        };

        self.apply(mv, mover);

        if self.is_in_check(mover) {
            self.revert(mv, mover, info);
            return None;
        }

        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = mover.opponent();
        Some(info)
    }

    /// Revert the most recent [`Board::try_make`], restoring the position
    /// to bytewise equality with its pre-move state.
    pub fn unmake(&mut self, mv: Move, info: UnmakeInfo) {
        let mover = self.side_to_move.opponent();
        self.side_to_move = mover;
        if mover == Color::Black {
            self.fullmove_number -= 1;
        }
        self.revert(mv, mover, info);
    }

    /// Piece movement and bookkeeping, minus side flip and legality.
    fn apply(&mut self, mv: Move, mover: Color) {
        let opponent = mover.opponent();

        self.remove_piece(mv.from, mover, mv.piece);

        match mv.kind {
            MoveKind::EnPassant => {
                self.remove_piece(square_behind(mv.to, mover), opponent, Piece::Pawn);
            }
            MoveKind::Capture(captured) | MoveKind::Promotion(Some(captured)) => {
                self.remove_piece(mv.to, opponent, captured);
            }
            _ => {}
        }

        let placed = if mv.is_promotion() {
            Piece::Queen
        } else {
            mv.piece
        };
        self.set_piece(mv.to, mover, placed);

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv.to);
            self.remove_piece(rook_from, mover, Piece::Rook);
            self.set_piece(rook_to, mover, Piece::Rook);
        }

        self.update_castling_rights(mv, mover);

        self.en_passant = if mv.kind == MoveKind::DoublePush {
            Some(square_behind(mv.to, mover))
        } else {
            None
        };

        if mv.piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    /// Mirror of [`Board::apply`]: unwind piece movement, restore the
    /// irreversible state from `info`.
    fn revert(&mut self, mv: Move, mover: Color, info: UnmakeInfo) {
        let opponent = mover.opponent();

        let placed = if mv.is_promotion() {
            Piece::Queen
        } else {
            mv.piece
        };
        self.remove_piece(mv.to, mover, placed);
        self.set_piece(mv.from, mover, mv.piece);

        match mv.kind {
            MoveKind::EnPassant => {
                self.set_piece(square_behind(mv.to, mover), opponent, Piece::Pawn);
            }
            MoveKind::Capture(captured) | MoveKind::Promotion(Some(captured)) => {
                self.set_piece(mv.to, opponent, captured);
            }
            _ => {}
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv.to);
            self.remove_piece(rook_to, mover, Piece::Rook);
            self.set_piece(rook_from, mover, Piece::Rook);
        }

        self.castling = info.castling;
        self.en_passant = info.en_passant;
        self.halfmove_clock = info.halfmove_clock;
    }

    /// A king move loses both rights; a rook leaving its origin square, or
    /// anything landing on a rook origin square, loses that right.
    fn update_castling_rights(&mut self, mv: Move, mover: Color) {
        if mv.piece == Piece::King {
            self.castling.remove_both(mover);
        }
        for sq in [mv.from, mv.to] {
            match sq.index() {
                0 => self.castling.remove(Color::White, false),
                7 => self.castling.remove(Color::White, true),
                56 => self.castling.remove(Color::Black, false),
                63 => self.castling.remove(Color::Black, true),
                _ => {}
            }
        }
    }
}
