//! FEN parsing and emission, plus UCI move-token lookup.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::types::{Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Parse a position from FEN.
    ///
    /// The position field lays out ranks 8 down to 1, `/`-separated, with
    /// digits skipping empty files. Halfmove and fullmove counters are
    /// optional. On error the previous position (owned by the caller) is
    /// untouched; this constructor builds a fresh board.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }

        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::TooManyFiles { rank });
                    }
                    board.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles { rank });
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        for c in fields[2].chars() {
            match c {
                'K' => board.castling.set(Color::White, true),
                'Q' => board.castling.set(Color::White, false),
                'k' => board.castling.set(Color::Black, true),
                'q' => board.castling.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        board.en_passant = if fields[3] == "-" {
            None
        } else {
            Some(fields[3].parse::<Square>().map_err(|_| {
                FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                }
            })?)
        };

        if let Some(half) = fields.get(4) {
            board.halfmove_clock = half.parse().unwrap_or(0);
        }
        if let Some(full) = fields.get(5) {
            board.fullmove_number = full.parse().unwrap_or(1);
        }

        Ok(board)
    }

    /// Parse a position from FEN.
    ///
    /// # Panics
    /// Panics on invalid FEN. Use [`Board::try_from_fen`] for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// Emit the position as a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        if self.castling.has(Color::White, true) {
            castling.push('K');
        }
        if self.castling.has(Color::White, false) {
            castling.push('Q');
        }
        if self.castling.has(Color::Black, true) {
            castling.push('k');
        }
        if self.castling.has(Color::Black, false) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            side,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Look up the legal move matching a long-algebraic token.
    ///
    /// The token is validated (length and character ranges) before any
    /// indexing. Matching is by origin and destination square; since the
    /// generator promotes only to queens, a trailing promotion letter does
    /// not take part in the match.
    pub fn find_move(&mut self, token: &str) -> Result<Move, MoveParseError> {
        if !token.is_ascii() {
            return Err(MoveParseError::InvalidSquare {
                notation: token.to_string(),
            });
        }
        if token.len() < 4 || token.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: token.len() });
        }
        let from: Square = token[0..2].parse()?;
        let to: Square = token[2..4].parse()?;

        self.legal_moves()
            .iter()
            .find(|m| m.from == from && m.to == to)
            .ok_or(MoveParseError::NoMatchingMove {
                notation: token.to_string(),
            })
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_round_trips() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn counters_are_optional() {
        let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number, 1);
    }

    #[test]
    fn en_passant_square_is_parsed() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
                .unwrap();
        assert_eq!(board.en_passant(), Some(Square::new(5, 4)));
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert_eq!(
            Board::try_from_fen("8/8/8 w - -"),
            Err(FenError::InvalidRankCount { found: 3 })
        );
        assert_eq!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w"),
            Err(FenError::TooFewFields { found: 2 })
        );
        assert!(matches!(
            Board::try_from_fen("4x3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'x' })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w Z - 0 1"),
            Err(FenError::InvalidCastling { char: 'Z' })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - e9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn find_move_matches_by_from_and_to() {
        let mut board = Board::new();
        let mv = board.find_move("e2e4").unwrap();
        assert_eq!(mv.to_string(), "e2e4");
        assert!(matches!(
            board.find_move("e2e5"),
            Err(MoveParseError::NoMatchingMove { .. })
        ));
        assert!(matches!(
            board.find_move("xx11"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            board.find_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
    }
}
