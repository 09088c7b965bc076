use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Kick-off as epoch milliseconds.
    #[serde(default)]
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<MatchTeams>,
    #[serde(default)]
    pub sources: Vec<MatchSource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Match {
    /// A match counts as live once its start time has passed.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.date <= now.timestamp_millis()
    }

    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTeams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<MatchTeam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<MatchTeam>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTeam {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSource {
    pub source: String,
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn liveness_is_derived_from_kickoff() {
        let m: Match = serde_json::from_value(json!({
            "id": "m1",
            "title": "A vs B",
            "date": 1_700_000_000_000i64
        }))
        .expect("decodes");

        let before = Utc.timestamp_millis_opt(1_699_999_999_999).unwrap();
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert!(!m.is_live(before));
        assert!(m.is_live(at));
        assert!(m.sources.is_empty());
        assert!(!m.is_popular());
    }
}
