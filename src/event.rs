// src/event.rs
// The normalized, sport-agnostic match representation the whole pipeline
// hands around after raw decoding.

use crate::policy::OFF_TOUR_RANK;

/// Lifecycle phase of a match, folded from the upstream status synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

/// Which participant a marker points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Sport-specific score detail. Absent for upcoming matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreSummary {
    /// Goal score plus a clock/status token ("34'", "HT", "FT").
    Goals { score: String, clock: String },
    /// Set score plus current-game points when known.
    Sets { sets: String, game: Option<String> },
}

/// One normalized match.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEvent {
    /// Upstream id; `None` means the event can be neither deduplicated nor
    /// tracked for notifications.
    pub id: Option<String>,
    pub participant_a: String,
    pub participant_b: String,
    /// Grouping label composed from category and competition name.
    pub tournament: String,
    /// Lower is more important; `OFF_TOUR_RANK` for untiered categories.
    pub priority_rank: u32,
    pub status: MatchStatus,
    pub score: Option<ScoreSummary>,
    /// Serving participant, tennis live matches only.
    pub server: Option<Side>,
    /// Set only once the match is finished.
    pub winner: Option<Side>,
}

impl CanonicalEvent {
    pub fn on_main_tour(&self) -> bool {
        self.priority_rank < OFF_TOUR_RANK
    }

    /// Plain one-line form used as the notification body and as the value
    /// stored in the watch state file.
    pub fn notify_summary(&self) -> String {
        let names = format!("{} vs {}", self.participant_a, self.participant_b);
        match &self.score {
            Some(ScoreSummary::Goals { score, .. }) => format!("{names} [{score}]"),
            Some(ScoreSummary::Sets { sets, game: Some(game) }) => {
                format!("{names} [{sets}] ({game})")
            }
            Some(ScoreSummary::Sets { sets, game: None }) => format!("{names} [{sets}]"),
            None => names,
        }
    }
}
