//! Static evaluation: material balance only.

use super::types::{Color, Piece, ALL_PIECES};
use super::Board;

/// Centipawn values indexed by [`Piece::index`]. The king carries no
/// material weight; losing it ends the game before evaluation matters.
const MATERIAL: [i32; 6] = [100, 320, 330, 500, 900, 0];

impl Board {
    /// Material balance in centipawns from the side to move's perspective.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let mut score = 0;
        for piece in ALL_PIECES {
            let value = MATERIAL[piece.index()];
            score += value * self.pieces[Color::White.index()][piece.index()].popcount() as i32;
            score -= value * self.pieces[Color::Black.index()][piece.index()].popcount() as i32;
        }
        match self.side_to_move {
            Color::White => score,
            Color::Black => -score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(Board::new().evaluate(), 0);
    }

    #[test]
    fn evaluation_is_from_the_movers_perspective() {
        let white_up = Board::from_fen("4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1");
        assert_eq!(white_up.evaluate(), 900);
        let black_to_move = Board::from_fen("4k3/8/8/8/8/8/4Q3/4K3 b - - 0 1");
        assert_eq!(black_to_move.evaluate(), -900);
    }

    #[test]
    fn kings_carry_no_material() {
        let bare = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(bare.evaluate(), 0);
    }

    #[test]
    fn mixed_material_sums() {
        // White: rook + pawn (600); Black: knight + bishop (650).
        let board = Board::from_fen("4k3/8/2nb4/8/8/8/4P3/R3K3 w - - 0 1");
        assert_eq!(board.evaluate(), 600 - 650);
    }
}
