//! Seeded random-playout tests for make/unmake stability.

use rand::prelude::*;

use crate::board::{Board, Move, UnmakeInfo};

fn random_playout(board: &mut Board, rng: &mut StdRng, plies: usize) -> Vec<(Move, UnmakeInfo)> {
    let mut history = Vec::with_capacity(plies);
    for _ in 0..plies {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let info = board.try_make(mv).expect("legal move applies");
        history.push((mv, info));
    }
    history
}

#[test]
fn long_playout_unwinds_to_the_start_position() {
    let mut board = Board::new();
    let initial = board.clone();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    let mut history = random_playout(&mut board, &mut rng, 200);
    while let Some((mv, info)) = history.pop() {
        board.unmake(mv, info);
    }
    assert_eq!(board, initial);
}

#[test]
fn playout_keeps_exactly_one_king_per_side() {
    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..120 {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let _ = board.try_make(mv).expect("legal move applies");

        use crate::board::{Color, Piece};
        for color in [Color::White, Color::Black] {
            assert_eq!(
                board.pieces[color.index()][Piece::King.index()].popcount(),
                1,
                "after {mv}: {color} must have exactly one king"
            );
        }
    }
}

#[test]
fn legal_moves_are_stable_across_make_unmake() {
    let mut board = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
    let collect = |board: &mut Board| -> Vec<String> {
        let mut all: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
        all.sort();
        all
    };

    let before = collect(&mut board);
    for mv in board.generate_pseudo_moves().iter() {
        if let Some(info) = board.try_make(mv) {
            board.unmake(mv, info);
        }
    }
    assert_eq!(collect(&mut board), before);
}

#[test]
fn fen_round_trips_through_random_positions() {
    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(42);
    random_playout(&mut board, &mut rng, 60);

    let fen = board.to_fen();
    let restored = Board::from_fen(&fen);
    assert_eq!(restored, board);
    assert_eq!(restored.to_fen(), fen);
}
