// src/render.rs
// Canonical events -> text. Pure projection with no I/O; colors come from
// an injected palette so tests and the notification path can render plain.

use chrono::NaiveDate;

use crate::aggregate::ScoreBoard;
use crate::event::{CanonicalEvent, MatchStatus, ScoreSummary, Side};
use crate::favorites::Favorites;

/// Escape set used by the report. `ANSI` targets bar widgets that pass
/// escapes through; `PLAIN` renders bare text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub white: &'static str,
}

impl Palette {
    pub const ANSI: Palette = Palette {
        reset: "\x1b[0m",
        bold: "\x1b[1m",
        dim: "\x1b[2m",
        cyan: "\x1b[96m",
        green: "\x1b[92m",
        red: "\x1b[91m",
        yellow: "\x1b[93m",
        white: "\x1b[97m",
    };

    pub const PLAIN: Palette = Palette {
        reset: "",
        bold: "",
        dim: "",
        cyan: "",
        green: "",
        red: "",
        yellow: "",
        white: "",
    };
}

/// Single-period report: tournament headers, one line per event, a blank
/// line between tournaments.
pub fn render_board(board: &ScoreBoard, palette: &Palette, favorites: &Favorites) -> String {
    let mut lines: Vec<String> = Vec::new();
    for group in &board.groups {
        lines.push(format!(
            "{}{}--- {} ---{}",
            palette.bold, palette.cyan, group.name, palette.reset
        ));
        for event in &group.events {
            lines.push(event_line(event, palette, favorites));
        }
        lines.push(String::new());
    }
    let text = lines.join("\n");
    text.trim_end().to_string()
}

/// Multi-period report: one dated block per non-empty day, blank-line
/// separated. Returns an empty string when every day is empty.
pub fn render_date_blocks(
    days: &[(NaiveDate, ScoreBoard)],
    palette: &Palette,
    favorites: &Favorites,
) -> String {
    let blocks: Vec<String> = days
        .iter()
        .filter(|(_, board)| !board.is_empty())
        .map(|(date, board)| {
            format!(
                "{}\n{}",
                day_header(*date, palette),
                render_board(board, palette, favorites)
            )
        })
        .collect();
    blocks.join("\n\n")
}

fn day_header(date: NaiveDate, palette: &Palette) -> String {
    format!(
        "📅 {}{}{}{}",
        palette.bold,
        palette.white,
        date.format("%Y-%m-%d (%A)"),
        palette.reset
    )
}

fn event_line(event: &CanonicalEvent, palette: &Palette, favorites: &Favorites) -> String {
    let a = participant(event, Side::A, palette, favorites);
    let b = participant(event, Side::B, palette, favorites);
    let line = format!("  {a} v {b}");
    match score_part(event, palette) {
        Some(score) => format!("{line} {score}"),
        None => line,
    }
}

/// One participant's display chunk: winner/loser color on the name, then
/// the favorite star and the server dot prepended as markers.
fn participant(
    event: &CanonicalEvent,
    side: Side,
    palette: &Palette,
    favorites: &Favorites,
) -> String {
    let name = match side {
        Side::A => &event.participant_a,
        Side::B => &event.participant_b,
    };
    let mut text = match event.winner {
        Some(w) if w == side => format!("{}{}{}", palette.green, name, palette.reset),
        Some(_) => format!("{}{}{}", palette.red, name, palette.reset),
        None => name.clone(),
    };
    if favorites.matches(name) {
        text = format!("{}★{} {text}", palette.yellow, palette.reset);
    }
    if event.server == Some(side) {
        text = format!("{}●{} {text}", palette.green, palette.reset);
    }
    text
}

fn score_part(event: &CanonicalEvent, palette: &Palette) -> Option<String> {
    if event.status == MatchStatus::Upcoming {
        return Some(format!("{}(Soon){}", palette.dim, palette.reset));
    }
    match &event.score {
        Some(ScoreSummary::Goals { score, clock }) => {
            let mut part = format!("[{}{}{}]", palette.yellow, score, palette.reset);
            if !clock.is_empty() {
                part.push_str(&format!(" ({}{}{})", palette.yellow, clock, palette.reset));
            }
            Some(part)
        }
        Some(ScoreSummary::Sets { sets, game }) => {
            let mut part = format!("[{}{}{}]", palette.yellow, sets, palette.reset);
            if let Some(game) = game {
                part.push_str(&format!(" ({}{}{})", palette.yellow, game, palette.reset));
            }
            Some(part)
        }
        None => None,
    }
}
