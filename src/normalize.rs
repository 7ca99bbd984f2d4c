// src/normalize.rs
// Raw feed document -> canonical events. Upstream sloppiness stops here:
// missing fields get documented defaults and undecodable records are
// dropped one at a time, so later stages can assume clean input.

use serde_json::Value;

use crate::event::{CanonicalEvent, MatchStatus, ScoreSummary, Side};
use crate::feed::raw::{decode_element, FlexValue, RawFeed, RawMatch, RawParticipant, RawStage};
use crate::policy::{Sport, SportPolicy};

/// Normalize a whole feed document under a sport policy. Stages rejected by
/// the policy contribute nothing; records that cannot be decoded are
/// dropped individually and never abort the rest of the batch.
pub fn normalize_feed(feed: RawFeed, policy: &SportPolicy) -> Vec<CanonicalEvent> {
    let mut out = Vec::new();
    let mut dropped = 0usize;

    for stage_value in feed.stages {
        let Some(stage) = decode_element::<RawStage>(stage_value, "stage") else {
            dropped += 1;
            continue;
        };
        let category = stage.category.as_deref().unwrap_or("").trim();
        let competition_raw = stage.competition.as_deref().unwrap_or("").trim();

        // Policy admission works on the raw pair; the display label gets
        // its fallback only afterwards.
        let Some(rank) = policy.admit(category, competition_raw) else {
            continue;
        };
        let competition = if competition_raw.is_empty() {
            policy.sport.unknown_competition()
        } else {
            competition_raw
        };
        let tournament = tournament_label(category, competition);

        for event_value in stage.events {
            match normalize_event(event_value, &tournament, rank, policy.sport) {
                Some(ev) => out.push(ev),
                None => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = out.len(), "normalization dropped feed records");
    }
    out
}

/// Grouping key shared by both sports: category-qualified competition name.
fn tournament_label(category: &str, competition: &str) -> String {
    if category.is_empty() {
        competition.to_string()
    } else {
        format!("{category} - {competition}")
    }
}

fn normalize_event(value: Value, tournament: &str, rank: u32, sport: Sport) -> Option<CanonicalEvent> {
    let m = decode_element::<RawMatch>(value, "event")?;

    let (placeholder_a, placeholder_b) = sport.placeholders();
    let name_a = first_name(&m.side_a, placeholder_a);
    let name_b = first_name(&m.side_b, placeholder_b);
    let id_a = first_id(&m.side_a);
    let id_b = first_id(&m.side_b);

    let code = m.status_code.as_deref().unwrap_or("").trim();
    let live_indicator =
        !m.progress.is_unset() || !m.game_a.is_unset() || !m.game_b.is_unset();
    let status = map_status(code, live_indicator);

    let score = match (status, sport) {
        (MatchStatus::Upcoming, _) => None,
        (_, Sport::Soccer) => Some(ScoreSummary::Goals {
            score: format!(
                "{} - {}",
                m.score_a.display_or("0"),
                m.score_b.display_or("0")
            ),
            clock: soccer_clock(code, &m.progress),
        }),
        (_, Sport::Tennis) => Some(ScoreSummary::Sets {
            sets: format!(
                "{}-{}",
                m.score_a.display_or("0"),
                m.score_b.display_or("0")
            ),
            game: if status == MatchStatus::Live {
                match (m.game_a.as_key(), m.game_b.as_key()) {
                    (Some(a), Some(b)) => Some(format!("{a}-{b}")),
                    _ => None,
                }
            } else {
                None
            },
        }),
    };

    // Server resolution is binary: a serving id equal to side A's
    // (including both missing) maps to A, anything else to B.
    let server = if sport == Sport::Tennis && status == MatchStatus::Live {
        Some(if m.serving_id == id_a { Side::A } else { Side::B })
    } else {
        None
    };

    let winner = if status == MatchStatus::Finished {
        infer_winner(&m.winner_id, &id_a, &id_b, &m.score_a, &m.score_b)
    } else {
        None
    };

    Some(CanonicalEvent {
        id: m.id.as_key(),
        participant_a: name_a,
        participant_b: name_b,
        tournament: tournament.to_string(),
        priority_rank: rank,
        status,
        score,
        server,
        winner,
    })
}

/// Total mapping from the upstream status zoo. Unrecognized codes fold to
/// Live when a live-progress field is present, otherwise to Finished.
fn map_status(code: &str, live_indicator: bool) -> MatchStatus {
    match code {
        "NS" => MatchStatus::Upcoming,
        "FT" | "AET" | "AP" | "Ret." | "W.O." | "Finished" => MatchStatus::Finished,
        "In Progress" => MatchStatus::Live,
        _ if live_indicator => MatchStatus::Live,
        _ => MatchStatus::Finished,
    }
}

/// Clock token for the soccer line: the running minute, except for codes
/// where the minute would be misleading (half-time, full-time variants).
fn soccer_clock(code: &str, progress: &FlexValue) -> String {
    match progress.as_key() {
        Some(minute) if !matches!(code, "FT" | "HT" | "AET" | "AP") => format!("{minute}'"),
        _ => code.to_string(),
    }
}

/// Explicit winner id matched against both participant ids, then the
/// numeric score fallback (strictly greater wins). Unset when neither
/// applies.
fn infer_winner(
    winner_id: &FlexValue,
    id_a: &FlexValue,
    id_b: &FlexValue,
    score_a: &FlexValue,
    score_b: &FlexValue,
) -> Option<Side> {
    if !winner_id.is_unset() {
        if winner_id == id_a {
            return Some(Side::A);
        }
        if winner_id == id_b {
            return Some(Side::B);
        }
    }
    match (score_a.as_int(), score_b.as_int()) {
        (Some(a), Some(b)) if a > b => Some(Side::A),
        (Some(a), Some(b)) if b > a => Some(Side::B),
        _ => None,
    }
}

fn first_name(side: &[RawParticipant], placeholder: &str) -> String {
    side.first()
        .and_then(|p| p.name.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

fn first_id(side: &[RawParticipant]) -> FlexValue {
    side.first().map(|p| p.id.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tennis() -> SportPolicy {
        SportPolicy::standard(Sport::Tennis)
    }

    fn soccer() -> SportPolicy {
        SportPolicy::standard(Sport::Soccer)
    }

    #[test]
    fn status_mapping_is_total() {
        for code in ["FT", "AET", "AP", "Ret.", "W.O.", "Finished"] {
            assert_eq!(map_status(code, false), MatchStatus::Finished, "{code}");
        }
        assert_eq!(map_status("NS", false), MatchStatus::Upcoming);
        assert_eq!(map_status("In Progress", false), MatchStatus::Live);
        assert_eq!(map_status("HT", true), MatchStatus::Live);
        assert_eq!(map_status("Weird", true), MatchStatus::Live);
        assert_eq!(map_status("Weird", false), MatchStatus::Finished);
        assert_eq!(map_status("", false), MatchStatus::Finished);
    }

    #[test]
    fn clock_prefers_minute_outside_break_codes() {
        assert_eq!(soccer_clock("L", &FlexValue::Number(34)), "34'");
        assert_eq!(soccer_clock("HT", &FlexValue::Number(45)), "HT");
        assert_eq!(soccer_clock("FT", &FlexValue::Number(90)), "FT");
        assert_eq!(soccer_clock("Postp.", &FlexValue::Absent), "Postp.");
    }

    #[test]
    fn missing_fields_get_placeholders_and_defaults() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "ATP", "Snm": "Open", "Events": [{"Eps": "In Progress", "Epr": 1}]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &tennis());
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.participant_a, "Player 1");
        assert_eq!(e.participant_b, "Player 2");
        assert_eq!(e.id, None);
        assert_eq!(
            e.score,
            Some(ScoreSummary::Sets { sets: "0-0".into(), game: None })
        );
    }

    #[test]
    fn stage_without_competition_gets_the_unknown_label() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "ITF", "Events": [{"Eps": "NS"}]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &tennis());
        assert_eq!(events[0].tournament, "ITF - Unknown Tournament");
    }

    #[test]
    fn allow_list_rejects_whole_stage() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [
                {"Cnm": "England", "Snm": "Championship", "Events": [{"Eps": "FT"}]},
                {"Cnm": "England", "Snm": "Premier League", "Events": [{"Eps": "FT"}]}
            ]
        }))
        .unwrap();
        let events = normalize_feed(feed, &soccer());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tournament, "England - Premier League");
    }

    #[test]
    fn bad_event_record_drops_alone() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "ATP", "Snm": "Open", "Events": [
                42,
                {"Eid": "1", "Eps": "NS"}
            ]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &tennis());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn upcoming_has_no_score_and_no_winner() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "England", "Snm": "Premier League", "Events": [
                {"Eid": 5, "Eps": "NS", "T1": [{"Nm": "Arsenal"}], "T2": [{"Nm": "Chelsea"}]}
            ]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &soccer());
        let e = &events[0];
        assert_eq!(e.status, MatchStatus::Upcoming);
        assert!(e.score.is_none());
        assert!(e.winner.is_none());
    }

    #[test]
    fn winner_by_explicit_id_beats_scores() {
        let w = infer_winner(
            &FlexValue::Number(7),
            &FlexValue::Number(9),
            &FlexValue::Number(7),
            &FlexValue::Number(2),
            &FlexValue::Number(0),
        );
        assert_eq!(w, Some(Side::B));
    }

    #[test]
    fn winner_numeric_fallback_and_unset_cases() {
        let a = infer_winner(
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Number(2),
            &FlexValue::Number(1),
        );
        assert_eq!(a, Some(Side::A));
        let tie = infer_winner(
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Number(1),
            &FlexValue::Number(1),
        );
        assert_eq!(tie, None);
        let text = infer_winner(
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Absent,
            &FlexValue::Text("abandoned".into()),
            &FlexValue::Number(1),
        );
        assert_eq!(text, None);
    }

    #[test]
    fn winner_inference_is_idempotent() {
        let args = (
            FlexValue::Number(7),
            FlexValue::Number(7),
            FlexValue::Number(9),
            FlexValue::Number(1),
            FlexValue::Number(2),
        );
        let first = infer_winner(&args.0, &args.1, &args.2, &args.3, &args.4);
        let second = infer_winner(&args.0, &args.1, &args.2, &args.3, &args.4);
        assert_eq!(first, Some(Side::A));
        assert_eq!(first, second);
    }

    #[test]
    fn server_binary_fallback() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "ATP", "Snm": "Open", "Events": [
                {"Eid": 1, "Eps": "In Progress", "Esv": "9", "T1": [{"Nm": "A", "ID": 9}], "T2": [{"Nm": "B", "ID": 4}]},
                {"Eid": 2, "Eps": "In Progress", "Esv": "4", "T1": [{"Nm": "A", "ID": 9}], "T2": [{"Nm": "B", "ID": 4}]},
                {"Eid": 3, "Eps": "In Progress", "T1": [{"Nm": "A"}], "T2": [{"Nm": "B"}]}
            ]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &tennis());
        assert_eq!(events[0].server, Some(Side::A));
        assert_eq!(events[1].server, Some(Side::B));
        // Ids absent on both ends compare equal, so the fallback says A.
        assert_eq!(events[2].server, Some(Side::A));
    }

    #[test]
    fn finished_tennis_match_keeps_sets_but_not_game() {
        let feed: RawFeed = serde_json::from_value(json!({
            "Stages": [{"Cnm": "WTA", "Snm": "Open", "Events": [
                {"Eid": 1, "Eps": "FT", "Tr1": "2", "Tr2": "1", "Tr1G": 30, "Tr2G": 15}
            ]}]
        }))
        .unwrap();
        let events = normalize_feed(feed, &tennis());
        assert_eq!(
            events[0].score,
            Some(ScoreSummary::Sets { sets: "2-1".into(), game: None })
        );
        assert_eq!(events[0].winner, Some(Side::A));
    }
}
