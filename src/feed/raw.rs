// src/feed/raw.rs
// Wire shapes for the LiveScore feed. The upstream schema is unversioned and
// drifts (numbers arrive as strings, whole objects go missing), so every
// field is optional and scalars go through FlexValue.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A scalar that deserializes from a number, a string, or null.
/// Numeric strings are folded into `Number` so ids compare equal no matter
/// which form the feed picked this time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlexValue {
    Number(i64),
    Text(String),
    Absent,
}

impl Default for FlexValue {
    fn default() -> Self {
        FlexValue::Absent
    }
}

impl FlexValue {
    /// Numeric view, parsing textual values.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FlexValue::Number(n) => Some(*n),
            FlexValue::Text(s) => s.trim().parse().ok(),
            FlexValue::Absent => None,
        }
    }

    /// Canonical string form usable as a map/dedup key. Empty text counts
    /// as absent.
    pub fn as_key(&self) -> Option<String> {
        match self {
            FlexValue::Number(n) => Some(n.to_string()),
            FlexValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Display form with a fallback for absent/empty values.
    pub fn display_or(&self, default: &str) -> String {
        self.as_key().unwrap_or_else(|| default.to_string())
    }

    pub fn is_unset(&self) -> bool {
        self.as_key().is_none()
    }
}

impl fmt::Display for FlexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexValue::Number(n) => write!(f, "{n}"),
            FlexValue::Text(s) => write!(f, "{s}"),
            FlexValue::Absent => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for FlexValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct FlexVisitor;

        impl<'de> Visitor<'de> for FlexVisitor {
            type Value = FlexValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, string, or null")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexValue::Number(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexValue::Number(v as i64))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if let Ok(n) = v.parse::<i64>() {
                    Ok(FlexValue::Number(n))
                } else {
                    Ok(FlexValue::Text(v.to_string()))
                }
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if let Ok(n) = v.parse::<i64>() {
                    Ok(FlexValue::Number(n))
                } else {
                    Ok(FlexValue::Text(v))
                }
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexValue::Absent)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexValue::Absent)
            }
        }

        deserializer.deserialize_any(FlexVisitor)
    }
}

/// Top-level feed document. Stage elements stay as raw JSON so one
/// malformed stage cannot fail the whole decode.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawFeed {
    #[serde(rename = "Stages", default)]
    pub stages: Vec<Value>,
}

/// One competition grouping. Event elements stay raw for the same reason
/// stage elements do.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStage {
    /// Country or tour category ("England", "ATP").
    #[serde(rename = "Cnm", default)]
    pub category: Option<String>,
    /// Competition name ("Premier League", "Wimbledon").
    #[serde(rename = "Snm", default)]
    pub competition: Option<String>,
    #[serde(rename = "Events", default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawParticipant {
    #[serde(rename = "Nm", default)]
    pub name: Option<String>,
    #[serde(rename = "ID", default)]
    pub id: FlexValue,
}

/// One match record. Field meanings per the upstream app API:
/// `Eps` status code, `Epr` live progress (minute), `Tr1`/`Tr2` primary
/// score components, `Tr1G`/`Tr2G` tennis in-game points, `Esv` serving
/// participant id, `Ewt` winner participant id.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawMatch {
    #[serde(rename = "Eid", default)]
    pub id: FlexValue,
    #[serde(rename = "Eps", default)]
    pub status_code: Option<String>,
    #[serde(rename = "Epr", default)]
    pub progress: FlexValue,
    #[serde(rename = "T1", default)]
    pub side_a: Vec<RawParticipant>,
    #[serde(rename = "T2", default)]
    pub side_b: Vec<RawParticipant>,
    #[serde(rename = "Tr1", default)]
    pub score_a: FlexValue,
    #[serde(rename = "Tr2", default)]
    pub score_b: FlexValue,
    #[serde(rename = "Tr1G", default)]
    pub game_a: FlexValue,
    #[serde(rename = "Tr2G", default)]
    pub game_b: FlexValue,
    #[serde(rename = "Esv", default)]
    pub serving_id: FlexValue,
    #[serde(rename = "Ewt", default)]
    pub winner_id: FlexValue,
}

/// Success/skip decode for one stage or event element. A failure drops that
/// element only; the caller keeps iterating.
pub fn decode_element<T: DeserializeOwned>(value: Value, what: &'static str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!(error = %e, what, "dropping undecodable feed element");
            None
        }
    }
}
