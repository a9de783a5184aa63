//! Crate root module declarations for the Plum Arena project.
//!
//! Exposes the chess rules engine (game state, move geometry, legal move
//! generation), the model-facing layer (prompting, reply parsing, completion
//! transport, model catalog), the players, and the match utilities so the
//! binary, tests and benches can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod ray_trace;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod perft;
}

pub mod llm {
    pub mod completion_client;
    pub mod model_catalog;
    pub mod prompt;
    pub mod response_parser;
}

pub mod engines {
    pub mod engine_llm;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod engine_match_harness;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_record;
    pub mod long_algebraic;
    pub mod render_game_state;
}
