//! Prompt text for the move-proposal loop.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::square_name;
use crate::utils::long_algebraic::move_to_shorthand;

pub const SYSTEM_INSTRUCTION: &str = "You are a chess engine. Respond ONLY with a chess move in \
this exact format: from:e2 to:e4. No explanations, analysis, reasoning, or other text. Only the \
move format.";

/// Notation entries shown under RECENT.
pub const RECENT_HISTORY_LEN: usize = 10;
/// Legal moves are enumerated only on the first few attempts.
pub const LEGAL_LIST_ATTEMPTS: u32 = 3;
pub const LEGAL_LIST_CAP: usize = 20;

/// What went wrong on the previous attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryFeedback {
    pub invalid_move: Option<(Square, Square)>,
    pub error: String,
}

pub fn build_prompt(game_state: &GameState, attempt: u32, feedback: Option<&RetryFeedback>) -> String {
    let player = game_state.side_to_move().name();
    let history = game_state.move_history();
    let recent = if history.is_empty() {
        "Start".to_owned()
    } else {
        history[history.len().saturating_sub(RECENT_HISTORY_LEN)..].join(" ")
    };

    let mut prompt = format!(
        "You are playing chess as {player}.\n\nBOARD:\n{}\n\nFEN: {}\nTO MOVE: {player}\nRECENT: {recent}",
        game_state.board_text(),
        game_state.position_text(),
    );

    if attempt > 1 {
        if let Some(feedback) = feedback {
            prompt.push_str(&format!("\n\nPREVIOUS ATTEMPT FAILED (Attempt #{attempt}):"));
            if let Some((from, to)) = feedback.invalid_move {
                prompt.push_str(&format!(
                    "\nInvalid move attempted: from:{} to:{}",
                    square_name(from),
                    square_name(to)
                ));
            }
            prompt.push_str(&format!("\nError: {}", feedback.error));
            prompt.push_str("\nYou MUST provide a DIFFERENT, LEGAL move this time!");
        }
    }

    if attempt <= LEGAL_LIST_ATTEMPTS {
        prompt.push_str("\n\nVALID MOVES AVAILABLE:\n");
        prompt.push_str(&legal_move_listing(game_state));
    }

    prompt.push_str(&format!(
        "\n\nThink silently about your best move, then respond with ONLY this exact format:\n\n\
         from:e2 to:e4\n\n\
         Examples:\n\
         from:e2 to:e4 (pawn)\n\
         from:g1 to:f3 (knight)\n\
         from:f1 to:c4 (bishop)\n\
         from:e1 to:g1 (castle)\n\n\
         CRITICAL RULES:\n\
         - NO explanations, analysis, reasoning, or other text\n\
         - ONLY the exact move format: from:X to:Y\n\
         - Must be a LEGAL move according to chess rules\n\
         - Must be YOUR piece ({player})\n\
         - Cannot leave your king in check"
    ));

    if attempt > 1 {
        prompt.push_str(&format!(
            "\n- This is attempt #{attempt} - provide a DIFFERENT valid move!"
        ));
    }

    prompt.push_str("\n\nYour move:");
    prompt
}

/// `from:e2 to:e4, from:g1 to:f3, ...`, capped with a remainder count.
pub fn legal_move_listing(game_state: &GameState) -> String {
    let moves = game_state.all_legal_moves();
    if moves.is_empty() {
        return "No valid moves available (checkmate or stalemate)".to_owned();
    }

    let mut listing = moves
        .iter()
        .take(LEGAL_LIST_CAP)
        .map(move_to_shorthand)
        .collect::<Vec<_>>()
        .join(", ");
    if moves.len() > LEGAL_LIST_CAP {
        listing.push_str(&format!(" ... ({} more)", moves.len() - LEGAL_LIST_CAP));
    }
    listing
}
