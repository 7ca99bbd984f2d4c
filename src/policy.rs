// src/policy.rs
// Sport identity plus the per-sport stage admission tables. Policy data is
// plain structures handed into the pipeline, never consulted as globals by
// the algorithms.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Rank assigned to categories outside the tier table. Anything below this
/// counts as a main tour.
pub const OFF_TOUR_RANK: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Sport {
    Soccer,
    Tennis,
}

impl Sport {
    /// Path segment used by the upstream endpoints.
    pub fn feed_path(self) -> &'static str {
        match self {
            Sport::Soccer => "soccer",
            Sport::Tennis => "tennis",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Sport::Soccer => "⚽",
            Sport::Tennis => "🎾",
        }
    }

    /// Placeholder names for missing participants.
    pub fn placeholders(self) -> (&'static str, &'static str) {
        match self {
            Sport::Soccer => ("Team 1", "Team 2"),
            Sport::Tennis => ("Player 1", "Player 2"),
        }
    }

    pub fn unknown_competition(self) -> &'static str {
        match self {
            Sport::Soccer => "Unknown League",
            Sport::Tennis => "Unknown Tournament",
        }
    }
}

/// How a sport decides which stages enter the pipeline and how important
/// they are. The two variants are distinct policies, not parametrizations
/// of one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupRules {
    /// Strict allow-list `{category: [competition names]}`; a stage whose
    /// pair is not listed contributes nothing.
    AllowList(BTreeMap<String, Vec<String>>),
    /// Tier table `{category: rank}`; every stage is admitted, unlisted
    /// categories at `OFF_TOUR_RANK`.
    Tiers(BTreeMap<String, u32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SportPolicy {
    pub sport: Sport,
    pub rules: GroupRules,
}

static SOCCER_LEAGUES: Lazy<BTreeMap<String, Vec<String>>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 8] = [
        ("England", &["Premier League"]),
        ("Spain", &["LaLiga"]),
        ("Germany", &["Bundesliga"]),
        ("Italy", &["Serie A"]),
        ("France", &["Ligue 1"]),
        (
            "Europe",
            &[
                "Champions League",
                "Europa League",
                "Europa Conference League",
                "European Championship",
            ],
        ),
        ("World", &["World Cup"]),
        ("South America", &["Copa America"]),
    ];
    table
        .into_iter()
        .map(|(country, leagues)| {
            (
                country.to_string(),
                leagues.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
});

static TENNIS_TIERS: Lazy<BTreeMap<String, u32>> = Lazy::new(|| {
    BTreeMap::from([
        ("ATP".to_string(), 0),
        ("WTA".to_string(), 1),
        ("CHALLENGER".to_string(), 2),
    ])
});

impl SportPolicy {
    pub fn new(sport: Sport, rules: GroupRules) -> Self {
        Self { sport, rules }
    }

    /// Built-in tables for the sport.
    pub fn standard(sport: Sport) -> Self {
        let rules = match sport {
            Sport::Soccer => GroupRules::AllowList(SOCCER_LEAGUES.clone()),
            Sport::Tennis => GroupRules::Tiers(TENNIS_TIERS.clone()),
        };
        Self { sport, rules }
    }

    /// Stage admission: `None` rejects the stage outright, `Some(rank)`
    /// admits it with a priority rank.
    pub fn admit(&self, category: &str, competition: &str) -> Option<u32> {
        match &self.rules {
            GroupRules::AllowList(allowed) => allowed
                .get(category)
                .is_some_and(|leagues| leagues.iter().any(|l| l == competition))
                .then_some(0),
            GroupRules::Tiers(tiers) => {
                Some(tiers.get(category).copied().unwrap_or(OFF_TOUR_RANK))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_rejects_unlisted_pairs() {
        let p = SportPolicy::standard(Sport::Soccer);
        assert_eq!(p.admit("England", "Premier League"), Some(0));
        assert_eq!(p.admit("England", "Championship"), None);
        assert_eq!(p.admit("Narnia", "Premier League"), None);
    }

    #[test]
    fn tiers_rank_known_categories_and_admit_the_rest() {
        let p = SportPolicy::standard(Sport::Tennis);
        assert_eq!(p.admit("ATP", "Wimbledon"), Some(0));
        assert_eq!(p.admit("WTA", "Wimbledon"), Some(1));
        assert_eq!(p.admit("CHALLENGER", "Lugano"), Some(2));
        assert_eq!(p.admit("ITF", "Anywhere"), Some(OFF_TOUR_RANK));
    }

    #[test]
    fn custom_tables_are_injectable() {
        let rules = GroupRules::AllowList(BTreeMap::from([(
            "Testland".to_string(),
            vec!["Test League".to_string()],
        )]));
        let p = SportPolicy::new(Sport::Soccer, rules);
        assert_eq!(p.admit("Testland", "Test League"), Some(0));
        assert_eq!(p.admit("England", "Premier League"), None);
    }
}
