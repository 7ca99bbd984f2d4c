// src/favorites.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_FAVORITES_PATH: &str = "SCOREBAR_FAVORITES";

/// Tracked participant names, lower-cased. A participant matches when any
/// entry is a substring of the lower-cased display name, so "alcaraz"
/// tracks "C. Alcaraz" even when upstream abbreviates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    names: Vec<String>,
}

impl Favorites {
    pub fn from_names(items: Vec<String>) -> Self {
        Self {
            names: clean_list(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn matches(&self, participant: &str) -> bool {
        if self.names.is_empty() {
            return false;
        }
        let hay = participant.to_lowercase();
        self.names.iter().any(|n| hay.contains(n.as_str()))
    }
}

/// Load favorites from an explicit path. Supports TOML or JSON formats.
pub fn load_from(path: &Path) -> Result<Favorites> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading favorites from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    Ok(Favorites::from_names(parse_favorites(&content, ext.as_str())?))
}

/// Load favorites using env var + fallbacks:
/// 1) $SCOREBAR_FAVORITES
/// 2) config/favorites.toml
/// 3) config/favorites.json
pub fn load_default() -> Result<Favorites> {
    if let Ok(p) = std::env::var(ENV_FAVORITES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        } else {
            return Err(anyhow!("SCOREBAR_FAVORITES points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/favorites.toml");
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from("config/favorites.json");
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(Favorites::default())
}

fn parse_favorites(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("players");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported favorites format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlFavorites {
        players: Vec<String>,
    }
    let v: TomlFavorites = toml::from_str(s)?;
    Ok(v.players)
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(v)
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() {
            set.insert(t);
        }
    }
    set.into_iter().collect()
}
