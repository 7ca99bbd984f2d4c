// src/report.rs
// Assembles the report modes from the pipeline pieces (fetch, normalize,
// aggregate, render) and falls back to a sentinel line when a report
// comes out empty.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};

use crate::aggregate::{filter_by_status, group_events, merge_live_with_upcoming};
use crate::event::{CanonicalEvent, MatchStatus};
use crate::favorites::Favorites;
use crate::feed::FeedSource;
use crate::normalize::normalize_feed;
use crate::policy::{Sport, SportPolicy};
use crate::render::{render_board, render_date_blocks, Palette};

pub const SOCCER_EMPTY_TODAY: &str = "No matches today in the top leagues.";
pub const SOCCER_EMPTY_WEEK: &str = "No results in the top leagues for the past week.";
pub const TENNIS_EMPTY: &str = "No events to display.";

/// How far back the soccer sweep looks, in days.
const SWEEP_DAYS: i64 = 7;

/// Today's report. Soccer shows the whole dated feed; tennis merges the
/// live snapshot (live matches) with today's schedule (upcoming matches).
pub async fn today_report(
    source: &dyn FeedSource,
    sport: Sport,
    palette: &Palette,
    favorites: &Favorites,
) -> Result<String> {
    let policy = SportPolicy::standard(sport);
    let today = Local::now().date_naive();
    match sport {
        Sport::Soccer => {
            let events = day_events_or_empty(source, sport, today, &policy).await;
            let board = group_events(events, &policy);
            if board.is_empty() {
                return Ok(SOCCER_EMPTY_TODAY.to_string());
            }
            Ok(render_board(&board, palette, favorites))
        }
        Sport::Tennis => {
            let live = filter_by_status(
                normalize_feed(source.live(sport).await?, &policy),
                MatchStatus::Live,
            );
            let scheduled = filter_by_status(
                normalize_feed(source.by_date(sport, today).await?, &policy),
                MatchStatus::Upcoming,
            );
            let board = group_events(merge_live_with_upcoming(live, scheduled), &policy);
            if board.is_empty() {
                return Ok(TENNIS_EMPTY.to_string());
            }
            Ok(render_board(&board, palette, favorites))
        }
    }
}

/// Prior-period report. Soccer sweeps the past week day by day; tennis
/// shows yesterday's finished matches.
pub async fn past_report(
    source: &dyn FeedSource,
    sport: Sport,
    palette: &Palette,
    favorites: &Favorites,
) -> Result<String> {
    let policy = SportPolicy::standard(sport);
    let today = Local::now().date_naive();
    match sport {
        Sport::Soccer => {
            let mut days = Vec::new();
            for days_ago in 1..=SWEEP_DAYS {
                let date = today - Duration::days(days_ago);
                let events = day_events_or_empty(source, sport, date, &policy).await;
                days.push((date, group_events(events, &policy)));
            }
            let text = render_date_blocks(&days, palette, favorites);
            if text.is_empty() {
                return Ok(SOCCER_EMPTY_WEEK.to_string());
            }
            Ok(text)
        }
        Sport::Tennis => {
            let yesterday = today - Duration::days(1);
            let finished = filter_by_status(
                normalize_feed(source.by_date(sport, yesterday).await?, &policy),
                MatchStatus::Finished,
            );
            let board = group_events(finished, &policy);
            if board.is_empty() {
                return Ok(TENNIS_EMPTY.to_string());
            }
            Ok(render_board(&board, palette, favorites))
        }
    }
}

/// One day of the soccer feed; a failed fetch degrades to an empty day so
/// the sweep and the today report keep going.
async fn day_events_or_empty(
    source: &dyn FeedSource,
    sport: Sport,
    date: NaiveDate,
    policy: &SportPolicy,
) -> Vec<CanonicalEvent> {
    match source.by_date(sport, date).await {
        Ok(feed) => normalize_feed(feed, policy),
        Err(e) => {
            tracing::warn!(error = ?e, %date, "day fetch failed, treating as empty");
            Vec::new()
        }
    }
}
