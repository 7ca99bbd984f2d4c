// src/watch.rs
// Edge-triggered match tracking for check-notify. A fresh snapshot of live
// favorite matches is diffed against the persisted one; transitions become
// desktop notifications and the snapshot is fully replaced.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::aggregate::filter_by_status;
use crate::event::{CanonicalEvent, MatchStatus};
use crate::favorites::{self, Favorites};
use crate::feed::FeedSource;
use crate::normalize::normalize_feed;
use crate::notify::DesktopNotifier;
use crate::policy::{Sport, SportPolicy};

pub const ENV_STATE_DIR: &str = "SCOREBAR_STATE_DIR";
const DEFAULT_STATE_DIR: &str = "state";

/// Persisted snapshot: event id -> one-line summary at the time it was
/// last seen live.
pub type WatchState = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started { id: String, summary: String },
    Ended { id: String, summary: String },
}

/// State file location: `$SCOREBAR_STATE_DIR` (default `state/`) plus a
/// per-sport file name, so the two sports never collide.
pub fn state_path(sport: Sport) -> PathBuf {
    let dir = std::env::var(ENV_STATE_DIR).unwrap_or_else(|_| DEFAULT_STATE_DIR.to_string());
    Path::new(&dir).join(format!("live_{}.json", sport.feed_path()))
}

/// Missing or corrupt state reads as "no prior state".
pub async fn read_state(path: &Path) -> WatchState {
    match fs::read_to_string(path).await {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => WatchState::default(),
    }
}

/// Full replace. Persist failures propagate so the caller can decide; a
/// silently missed write would desynchronize the next diff.
pub async fn write_state(path: &Path, state: &WatchState) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating state dir {}", dir.display()))?;
    }
    let body = serde_json::to_vec_pretty(state).context("encoding watch state")?;
    fs::write(path, body)
        .await
        .with_context(|| format!("writing watch state to {}", path.display()))?;
    Ok(())
}

/// The fresh snapshot: live events involving a favorite, keyed by id.
/// Events without an id cannot be tracked and are skipped.
pub fn live_favorite_summaries(events: &[CanonicalEvent], favorites: &Favorites) -> WatchState {
    events
        .iter()
        .filter(|e| e.status == MatchStatus::Live)
        .filter(|e| favorites.matches(&e.participant_a) || favorites.matches(&e.participant_b))
        .filter_map(|e| e.id.clone().map(|id| (id, e.notify_summary())))
        .collect()
}

/// Pure transition computation. Ids only in `current` start and ids only
/// in `previous` end; ids present in both produce nothing.
pub fn diff_states(current: &WatchState, previous: &WatchState) -> Vec<Transition> {
    let mut out = Vec::new();
    for (id, summary) in current {
        if !previous.contains_key(id) {
            out.push(Transition::Started {
                id: id.clone(),
                summary: summary.clone(),
            });
        }
    }
    for (id, summary) in previous {
        if !current.contains_key(id) {
            out.push(Transition::Ended {
                id: id.clone(),
                summary: summary.clone(),
            });
        }
    }
    out
}

/// check-notify entrypoint. Every failure is swallowed: no stdout, no
/// state mutation, exit stays 0 (the surrounding bar must never break).
pub async fn run_check(source: &dyn FeedSource, sport: Sport, notifier: &DesktopNotifier) {
    if let Err(e) = check_once(source, sport, notifier).await {
        tracing::warn!(error = ?e, "notification check aborted");
    }
}

async fn check_once(source: &dyn FeedSource, sport: Sport, notifier: &DesktopNotifier) -> Result<()> {
    let favorites = favorites::load_default().context("loading favorites")?;
    if favorites.is_empty() {
        tracing::debug!("no favorites configured, nothing to watch");
    }

    let feed = source.live(sport).await.context("fetching live feed")?;
    let events = filter_by_status(
        normalize_feed(feed, &SportPolicy::standard(sport)),
        MatchStatus::Live,
    );
    let current = live_favorite_summaries(&events, &favorites);

    let path = state_path(sport);
    let previous = read_state(&path).await;

    let transitions = diff_states(&current, &previous);
    for transition in &transitions {
        match transition {
            Transition::Started { summary, .. } => {
                notifier.send(&format!("{} Match started", sport.glyph()), summary);
            }
            Transition::Ended { summary, .. } => {
                notifier.send(&format!("{} Match ended", sport.glyph()), summary);
            }
        }
    }
    if !transitions.is_empty() {
        tracing::info!(count = transitions.len(), "match transitions notified");
    }

    write_state(&path, &current).await
}
