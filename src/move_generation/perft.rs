//! Legal-move-tree node counting.
//!
//! Counts are compared against published reference tables to validate the
//! generator. Leaf classification (captures, castles, checks, ...) follows the
//! usual perft conventions: only moves made at the final ply are classified.

use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::play_unchecked;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, has_legal_move};
use crate::moves::move_descriptions::ChessMove;
use crate::utils::long_algebraic::move_to_notation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(game_state) {
        perft_recurse(game_state, &mv, depth, &mut total);
    }
    total
}

/// Same totals as [`perft`], with one scoped worker per root move.
pub fn perft_parallel(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(game_state, depth);
    }

    let root_moves = all_legal_moves(game_state);
    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(game_state, mv, depth, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            // A worker can only fail by panicking, which we re-raise here.
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

/// Node count below each root move, keyed by its log notation.
pub fn perft_divide(game_state: &GameState, depth: u8) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    all_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(game_state, &mv, depth, &mut counts);
            (move_to_notation(&mv), counts.nodes)
        })
        .collect()
}

fn perft_recurse(parent: &GameState, mv: &ChessMove, remaining: u8, counts: &mut PerftCounts) {
    let mut child = parent.clone();
    play_unchecked(&mut child, mv);

    if remaining == 1 {
        classify_leaf(&child, mv, counts);
        return;
    }

    for next in all_legal_moves(&child) {
        perft_recurse(&child, &next, remaining - 1, counts);
    }
}

fn classify_leaf(child: &GameState, mv: &ChessMove, counts: &mut PerftCounts) {
    counts.nodes += 1;

    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.castle_side().is_some() {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }
    if is_king_in_check(child, child.side_to_move) {
        counts.checks += 1;
        if !has_legal_move(child) {
            counts.checkmates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide, perft_parallel, PerftCounts};
    use crate::game_state::chess_rules::STARTING_POSITION_TEXT;
    use crate::game_state::game_state::GameState;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";

    fn game(text: &str) -> GameState {
        GameState::from_position_text(text).expect("perft position should parse")
    }

    #[test]
    fn starting_position_node_counts() {
        let start = game(STARTING_POSITION_TEXT);
        assert_eq!(perft(&start, 1).nodes, 20);
        assert_eq!(perft(&start, 2).nodes, 400);

        let depth_3 = perft(&start, 3);
        assert_eq!(
            depth_3,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_exercises_castling_and_en_passant() {
        let position = game(KIWIPETE);

        let depth_1 = perft(&position, 1);
        assert_eq!(depth_1.nodes, 48);
        assert_eq!(depth_1.captures, 8);
        assert_eq!(depth_1.castles, 2);

        let depth_2 = perft(&position, 2);
        assert_eq!(depth_2.nodes, 2039);
        assert_eq!(depth_2.captures, 351);
        assert_eq!(depth_2.en_passant, 1);
        assert_eq!(depth_2.castles, 91);
        assert_eq!(depth_2.checks, 3);
    }

    #[test]
    fn position_3_node_counts() {
        let position = game(POSITION_3);
        assert_eq!(perft(&position, 1).nodes, 14);
        assert_eq!(perft(&position, 2).nodes, 191);

        let depth_3 = perft(&position, 3);
        assert_eq!(depth_3.nodes, 2812);
        assert_eq!(depth_3.captures, 209);
        assert_eq!(depth_3.en_passant, 2);
        assert_eq!(depth_3.checks, 267);
    }

    #[test]
    fn parallel_and_divide_agree_with_serial() {
        let position = game(KIWIPETE);
        assert_eq!(perft_parallel(&position, 2), perft(&position, 2));

        let divided = perft_divide(&position, 2);
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2039);
        assert!(divided.iter().any(|(notation, _)| notation == "O-O"));
    }

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&GameState::new_game(), 0).nodes, 1);
    }
}
