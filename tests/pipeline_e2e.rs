// End-to-end report assembly against canned feed sources: fetch,
// normalize, aggregate, render, sentinel and error degradation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use scorebar::favorites::Favorites;
use scorebar::feed::raw::RawFeed;
use scorebar::feed::{FeedSource, StaticFeed};
use scorebar::render::Palette;
use scorebar::report::{self, SOCCER_EMPTY_TODAY, TENNIS_EMPTY};
use scorebar::Sport;

const EMPTY_DOC: &str = r#"{"Stages": []}"#;

/// Serves a document only for one calendar day; every other day is empty.
struct DayScopedFeed {
    day: NaiveDate,
    doc: String,
}

#[async_trait]
impl FeedSource for DayScopedFeed {
    async fn live(&self, _sport: Sport) -> Result<RawFeed> {
        Ok(serde_json::from_str(EMPTY_DOC)?)
    }

    async fn by_date(&self, _sport: Sport, date: NaiveDate) -> Result<RawFeed> {
        if date == self.day {
            Ok(serde_json::from_str(&self.doc)?)
        } else {
            Ok(serde_json::from_str(EMPTY_DOC)?)
        }
    }

    fn name(&self) -> &'static str {
        "day-scoped"
    }
}

/// Every fetch fails, for exercising degradation paths.
struct BrokenFeed;

#[async_trait]
impl FeedSource for BrokenFeed {
    async fn live(&self, _sport: Sport) -> Result<RawFeed> {
        anyhow::bail!("connection refused")
    }

    async fn by_date(&self, _sport: Sport, _date: NaiveDate) -> Result<RawFeed> {
        anyhow::bail!("connection refused")
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn upcoming_event_renders_pending_marker_without_bracket() {
    let dated = r#"{
        "Stages": [
            {"Cnm": "England", "Snm": "Premier League", "Events": [
                {"Eid": "10", "Eps": "NS",
                 "T1": [{"Nm": "Arsenal"}], "T2": [{"Nm": "Chelsea"}]}
            ]}
        ]
    }"#;
    let source = StaticFeed::from_json(EMPTY_DOC, dated).unwrap();
    let text = report::today_report(&source, Sport::Soccer, &Palette::PLAIN, &Favorites::default())
        .await
        .unwrap();
    assert!(text.contains("  Arsenal v Chelsea (Soon)"));
    assert!(!text.contains('['));
}

#[tokio::test]
async fn finished_event_resolves_winner_by_numeric_fallback() {
    let dated = r#"{
        "Stages": [
            {"Cnm": "England", "Snm": "Premier League", "Events": [
                {"Eid": "11", "Eps": "FT", "Tr1": "2", "Tr2": "1",
                 "T1": [{"Nm": "Arsenal"}], "T2": [{"Nm": "Chelsea"}]}
            ]}
        ]
    }"#;
    let source = StaticFeed::from_json(EMPTY_DOC, dated).unwrap();
    let text = report::today_report(&source, Sport::Soccer, &Palette::ANSI, &Favorites::default())
        .await
        .unwrap();
    assert!(text.contains("\x1b[92mArsenal\x1b[0m"), "A won on goals");
    assert!(text.contains("\x1b[91mChelsea\x1b[0m"));
}

#[tokio::test]
async fn tennis_today_merges_live_and_schedule() {
    let live = r#"{
        "Stages": [
            {"Cnm": "ATP", "Snm": "Wimbledon", "Events": [
                {"Eid": "100", "Eps": "In Progress", "Esv": "1", "Tr1": "1", "Tr2": "0",
                 "Tr1G": "30", "Tr2G": "15",
                 "T1": [{"Nm": "C. Alcaraz", "ID": "1"}], "T2": [{"Nm": "J. Sinner", "ID": "2"}]}
            ]}
        ]
    }"#;
    let dated = r#"{
        "Stages": [
            {"Cnm": "ATP", "Snm": "Wimbledon", "Events": [
                {"Eid": "100", "Eps": "NS",
                 "T1": [{"Nm": "C. Alcaraz", "ID": "1"}], "T2": [{"Nm": "J. Sinner", "ID": "2"}]},
                {"Eid": "101", "Eps": "NS",
                 "T1": [{"Nm": "N. Djokovic", "ID": "3"}], "T2": [{"Nm": "C. Ruud", "ID": "4"}]}
            ]}
        ]
    }"#;
    let source = StaticFeed::from_json(live, dated).unwrap();
    let text = report::today_report(&source, Sport::Tennis, &Palette::PLAIN, &Favorites::default())
        .await
        .unwrap();

    // Live copy wins for the shared id: serving marker and score present.
    assert!(text.contains("  ● C. Alcaraz v J. Sinner [1-0] (30-15)"));
    assert_eq!(text.matches("C. Alcaraz").count(), 1);
    assert!(text.contains("  N. Djokovic v C. Ruud (Soon)"));
}

#[tokio::test]
async fn soccer_sweep_emits_exactly_one_block_for_one_populated_day() {
    let doc = r#"{
        "Stages": [
            {"Cnm": "Italy", "Snm": "Serie A", "Events": [
                {"Eid": "20", "Eps": "FT", "Tr1": "0", "Tr2": "0",
                 "T1": [{"Nm": "Inter"}], "T2": [{"Nm": "Milan"}]}
            ]}
        ]
    }"#;
    let day = Local::now().date_naive() - Duration::days(3);
    let source = DayScopedFeed {
        day,
        doc: doc.to_string(),
    };
    let text = report::past_report(&source, Sport::Soccer, &Palette::PLAIN, &Favorites::default())
        .await
        .unwrap();
    assert_eq!(text.matches("📅").count(), 1);
    assert!(text.contains(&day.format("%Y-%m-%d").to_string()));
    assert!(text.contains("  Inter v Milan [0 - 0] (FT)"));
}

#[tokio::test]
async fn empty_feeds_fall_back_to_sentinels() {
    let source = StaticFeed::from_json(EMPTY_DOC, EMPTY_DOC).unwrap();
    let soccer =
        report::today_report(&source, Sport::Soccer, &Palette::PLAIN, &Favorites::default())
            .await
            .unwrap();
    assert_eq!(soccer, SOCCER_EMPTY_TODAY);
    let tennis =
        report::today_report(&source, Sport::Tennis, &Palette::PLAIN, &Favorites::default())
            .await
            .unwrap();
    assert_eq!(tennis, TENNIS_EMPTY);
}

#[tokio::test]
async fn soccer_fetch_failures_degrade_to_empty_days() {
    let today = report::today_report(&BrokenFeed, Sport::Soccer, &Palette::PLAIN, &Favorites::default())
        .await
        .unwrap();
    assert_eq!(today, SOCCER_EMPTY_TODAY);
    let week = report::past_report(&BrokenFeed, Sport::Soccer, &Palette::PLAIN, &Favorites::default())
        .await
        .unwrap();
    assert_eq!(week, report::SOCCER_EMPTY_WEEK);
}

#[tokio::test]
async fn tennis_fetch_failures_surface_to_the_caller() {
    let result =
        report::today_report(&BrokenFeed, Sport::Tennis, &Palette::PLAIN, &Favorites::default())
            .await;
    assert!(result.is_err());
}
