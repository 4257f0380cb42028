//! Pseudo-legal move generation and the legality filter.

use super::attack_tables::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::types::{pop_lsb, Bitboard, Color, Move, MoveKind, MoveList, Piece, Square};
use super::Board;

impl Board {
    /// Generate all pseudo-legal moves for the side to move, in a fixed
    /// order: pawns, knights, bishops, rooks, queens, king, castling.
    ///
    /// Moves respect piece movement and blockers, castling prerequisites
    /// other than post-move check, and en-passant availability. Whether a
    /// move leaves the mover's own king attacked is decided by
    /// [`Board::try_make`].
    #[must_use]
    pub fn generate_pseudo_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        let us = self.side_to_move;
        let own = self.occupied[us.index()];

        let mut pawns = self.pieces[us.index()][Piece::Pawn.index()];
        while !pawns.is_empty() {
            let from = pop_lsb(&mut pawns);
            self.pawn_moves(from, us, &mut list);
        }

        self.leaper_moves(Piece::Knight, &KNIGHT_ATTACKS, own, &mut list);

        for (piece, attacks) in [
            (Piece::Bishop, bishop_attacks as fn(usize, Bitboard) -> Bitboard),
            (Piece::Rook, rook_attacks),
            (Piece::Queen, queen_attacks),
        ] {
            let mut movers = self.pieces[us.index()][piece.index()];
            while !movers.is_empty() {
                let from = pop_lsb(&mut movers);
                let targets = attacks(from.index(), self.all_occupied).and(own.not());
                self.push_targets(from, piece, targets, &mut list);
            }
        }

        self.leaper_moves(Piece::King, &KING_ATTACKS, own, &mut list);
        self.castle_moves(us, &mut list);

        list
    }

    fn pawn_moves(&self, from: Square, us: Color, list: &mut MoveList) {
        let (push, start_rank, promo_rank) = match us {
            Color::White => (8i8, 1, 7),
            Color::Black => (-8i8, 6, 0),
        };

        let single = from.offset(push);
        if self.is_square_empty(single) {
            if single.rank() == promo_rank {
                list.push(Move::new(from, single, Piece::Pawn, MoveKind::Promotion(None)));
            } else {
                list.push(Move::new(from, single, Piece::Pawn, MoveKind::Quiet));
                if from.rank() == start_rank {
                    let double = single.offset(push);
                    if self.is_square_empty(double) {
                        list.push(Move::new(from, double, Piece::Pawn, MoveKind::DoublePush));
                    }
                }
            }
        }

        let them = us.opponent();
        let mut captures =
            PAWN_ATTACKS[us.index()][from.index()].and(self.occupied[them.index()]);
        while !captures.is_empty() {
            let to = pop_lsb(&mut captures);
            let (_, captured) = self.piece_at(to).expect("capture target is occupied");
            let kind = if to.rank() == promo_rank {
                MoveKind::Promotion(Some(captured))
            } else {
                MoveKind::Capture(captured)
            };
            list.push(Move::new(from, to, Piece::Pawn, kind));
        }

        if let Some(ep) = self.en_passant {
            if PAWN_ATTACKS[us.index()][from.index()].contains(ep) {
                list.push(Move::new(from, ep, Piece::Pawn, MoveKind::EnPassant));
            }
        }
    }

    fn leaper_moves(
        &self,
        piece: Piece,
        table: &[Bitboard; 64],
        own: Bitboard,
        list: &mut MoveList,
    ) {
        let mut movers = self.pieces[self.side_to_move.index()][piece.index()];
        while !movers.is_empty() {
            let from = pop_lsb(&mut movers);
            let targets = table[from.index()].and(own.not());
            self.push_targets(from, piece, targets, list);
        }
    }

    /// Emit one move per target square, tagging captures with the piece
    /// found there.
    fn push_targets(&self, from: Square, piece: Piece, targets: Bitboard, list: &mut MoveList) {
        let mut targets = targets;
        while !targets.is_empty() {
            let to = pop_lsb(&mut targets);
            let kind = match self.piece_at(to) {
                Some((_, captured)) => MoveKind::Capture(captured),
                None => MoveKind::Quiet,
            };
            list.push(Move::new(from, to, piece, kind));
        }
    }

    /// Castling: the right must be held, the between squares empty, and
    /// none of king origin, transit and destination attacked.
    fn castle_moves(&self, us: Color, list: &mut MoveList) {
        let rank = match us {
            Color::White => 0,
            Color::Black => 7,
        };
        let them = us.opponent();
        let king_from = Square::new(rank, 4);

        if self.castling.has(us, true) {
            let transit = Square::new(rank, 5);
            let king_to = Square::new(rank, 6);
            if self.is_square_empty(transit)
                && self.is_square_empty(king_to)
                && !self.is_attacked(king_from, them)
                && !self.is_attacked(transit, them)
                && !self.is_attacked(king_to, them)
            {
                list.push(Move::new(king_from, king_to, Piece::King, MoveKind::CastleKingside));
            }
        }

        if self.castling.has(us, false) {
            let transit = Square::new(rank, 3);
            let king_to = Square::new(rank, 2);
            if self.is_square_empty(Square::new(rank, 1))
                && self.is_square_empty(king_to)
                && self.is_square_empty(transit)
                && !self.is_attacked(king_from, them)
                && !self.is_attacked(transit, them)
                && !self.is_attacked(king_to, them)
            {
                list.push(Move::new(king_from, king_to, Piece::King, MoveKind::CastleQueenside));
            }
        }
    }

    /// Generate only the legal moves: pseudo-legal filtered through
    /// make/unmake.
    #[must_use]
    pub fn legal_moves(&mut self) -> MoveList {
        let mut legal = MoveList::new();
        for mv in self.generate_pseudo_moves().iter() {
            if let Some(info) = self.try_make(mv) {
                self.unmake(mv, info);
                legal.push(mv);
            }
        }
        legal
    }

    /// The side to move is checkmated: in check with no legal moves.
    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// The side to move is stalemated: not in check, no legal moves.
    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree at `depth`.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for mv in self.generate_pseudo_moves().iter() {
            if let Some(info) = self.try_make(mv) {
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
                self.unmake(mv, info);
            }
        }
        nodes
    }
}
