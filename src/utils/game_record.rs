//! Game record export: tag-pair headers followed by numbered move text.
//!
//! Moves are written in the engine's own log notation, not SAN, so the
//! output is for reading and archiving rather than for PGN importers.

use chrono::NaiveDate;

use crate::game_state::chess_types::GameResult;
use crate::game_state::game_state::GameState;

pub const DEFAULT_EVENT: &str = "Plum Arena Match";

pub fn result_token(result: GameResult) -> &'static str {
    match result {
        GameResult::WhiteWins => "1-0",
        GameResult::BlackWins => "0-1",
        GameResult::Stalemate => "1/2-1/2",
        GameResult::InProgress => "*",
    }
}

pub fn write_game_record(game_state: &GameState, white: &str, black: &str, date: NaiveDate) -> String {
    let result = result_token(game_state.result());
    let date = date.format("%Y.%m.%d").to_string();
    let headers = [
        ("Event", DEFAULT_EVENT),
        ("Date", date.as_str()),
        ("White", white),
        ("Black", black),
        ("Result", result),
    ];

    let mut out = String::new();
    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_value(value)));
    }
    out.push('\n');

    let history = game_state.move_history();
    let mut movetext_parts = Vec::<String>::with_capacity(history.len() + 1);
    for (ply, notation) in history.iter().enumerate() {
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", (ply / 2) + 1, notation));
        } else {
            movetext_parts.push(notation.clone());
        }
    }
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
