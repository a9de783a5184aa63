//! Free-text move extraction.
//!
//! Model replies are matched against an ordered list of patterns, most
//! specific first; the first hit wins. Only square syntax is checked here,
//! legality is the rules engine's call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::game_state::chess_types::Square;
use crate::utils::algebraic::algebraic_to_square;

/// Which pattern produced a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// `from:e2 to:e4`
    Labeled,
    /// `from e2 to e4`
    Unlabeled,
    /// `e2-e4` or `e2 to e4`
    Separated,
    /// `move e2 to e4`. Kept for completeness of the cascade, but
    /// [`ReplyFormat::Separated`] is tried first and already matches the
    /// `e2 to e4` inside such replies with the same squares, so a parse never
    /// reports this variant.
    MoveTo,
    /// `e2e4`
    Concatenated,
    /// First two square tokens anywhere in the reply.
    BareSquares,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMove {
    pub from: Square,
    pub to: Square,
    pub format: ReplyFormat,
}

static PAIR_PATTERNS: Lazy<[(ReplyFormat, Regex); 5]> = Lazy::new(|| {
    [
        (
            ReplyFormat::Labeled,
            pattern(r"from\s*:\s*([a-h][1-8])\s+to\s*:\s*([a-h][1-8])"),
        ),
        (
            ReplyFormat::Unlabeled,
            pattern(r"from\s+([a-h][1-8])\s+to\s+([a-h][1-8])"),
        ),
        (
            ReplyFormat::Separated,
            pattern(r"([a-h][1-8])\s*(?:-|to)\s*([a-h][1-8])"),
        ),
        (
            ReplyFormat::MoveTo,
            pattern(r"move\s+([a-h][1-8])\s+to\s+([a-h][1-8])"),
        ),
        (
            ReplyFormat::Concatenated,
            pattern(r"\b([a-h][1-8])([a-h][1-8])\b"),
        ),
    ]
});

static SQUARE_TOKEN: Lazy<Regex> = Lazy::new(|| pattern(r"\b[a-h][1-8]\b"));

fn pattern(source: &str) -> Regex {
    Regex::new(&format!("(?i){source}")).expect("reply pattern literal should compile")
}

/// Extract an origin/destination pair from a model reply, or `None` when no
/// pattern matches.
pub fn parse_reply(reply: &str) -> Option<ParsedMove> {
    let cleaned = reply.trim().to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    for (format, regex) in PAIR_PATTERNS.iter() {
        if let Some(caps) = regex.captures(&cleaned) {
            let from = algebraic_to_square(caps.get(1)?.as_str())?;
            let to = algebraic_to_square(caps.get(2)?.as_str())?;
            return Some(ParsedMove {
                from,
                to,
                format: *format,
            });
        }
    }

    let mut squares = SQUARE_TOKEN
        .find_iter(&cleaned)
        .filter_map(|m| algebraic_to_square(m.as_str()));
    let from = squares.next()?;
    let to = squares.next()?;
    Some(ParsedMove {
        from,
        to,
        format: ReplyFormat::BareSquares,
    })
}
