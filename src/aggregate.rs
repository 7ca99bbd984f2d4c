// src/aggregate.rs
// Grouping and cross-source merging, plus the per-sport ordering and
// filter policies applied between normalization and rendering.

use std::collections::HashSet;

use crate::event::{CanonicalEvent, MatchStatus};
use crate::policy::{GroupRules, SportPolicy, OFF_TOUR_RANK};

/// Events of one tournament, in feed traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentGroup {
    pub name: String,
    pub events: Vec<CanonicalEvent>,
}

impl TournamentGroup {
    fn min_rank(&self) -> u32 {
        self.events
            .iter()
            .map(|e| e.priority_rank)
            .min()
            .unwrap_or(OFF_TOUR_RANK)
    }

    fn has_main_tour(&self) -> bool {
        self.events.iter().any(|e| e.on_main_tour())
    }
}

/// Ordered set of tournament groups ready for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    pub groups: Vec<TournamentGroup>,
}

impl ScoreBoard {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub fn filter_by_status(events: Vec<CanonicalEvent>, status: MatchStatus) -> Vec<CanonicalEvent> {
    events.into_iter().filter(|e| e.status == status).collect()
}

/// Merge the live snapshot with the daily schedule: every live event is
/// kept, upcoming events only when their id is not already live. Events
/// without an id are never deduplicated.
pub fn merge_live_with_upcoming(
    live: Vec<CanonicalEvent>,
    upcoming: Vec<CanonicalEvent>,
) -> Vec<CanonicalEvent> {
    let live_ids: HashSet<String> = live.iter().filter_map(|e| e.id.clone()).collect();
    let offered = upcoming.len();
    let mut merged = live;
    let live_count = merged.len();
    merged.extend(
        upcoming
            .into_iter()
            .filter(|e| e.id.as_ref().map_or(true, |id| !live_ids.contains(id))),
    );
    let duplicates = offered - (merged.len() - live_count);
    if duplicates > 0 {
        tracing::debug!(duplicates, "schedule entries already live, deduplicated");
    }
    merged
}

/// Bucket events by tournament, apply the sport's tournament-level policy,
/// and order the groups for display.
pub fn group_events(events: Vec<CanonicalEvent>, policy: &SportPolicy) -> ScoreBoard {
    let mut groups: Vec<TournamentGroup> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|g| g.name == event.tournament) {
            Some(group) => group.events.push(event),
            None => groups.push(TournamentGroup {
                name: event.tournament.clone(),
                events: vec![event],
            }),
        }
    }

    match &policy.rules {
        GroupRules::AllowList(_) => {
            groups.sort_by(|a, b| a.name.cmp(&b.name));
        }
        GroupRules::Tiers(_) => {
            apply_main_tour_filter(&mut groups);
            groups.sort_by(|a, b| a.min_rank().cmp(&b.min_rank()).then_with(|| a.name.cmp(&b.name)));
        }
    }

    ScoreBoard { groups }
}

/// Strict all-or-nothing rule: one main-tour event anywhere hides every
/// tournament that has none.
fn apply_main_tour_filter(groups: &mut Vec<TournamentGroup>) {
    if !groups.iter().any(TournamentGroup::has_main_tour) {
        return;
    }
    let before = groups.len();
    groups.retain(TournamentGroup::has_main_tour);
    if groups.len() < before {
        tracing::debug!(
            hidden = before - groups.len(),
            "off-tour tournaments hidden because a main-tour event is present"
        );
    }
}
